//! Fixed-cell monochrome bitmap fonts.
//!
//! Glyphs are stored as 1 bit per pixel, most-significant bit first, row-major, with every row
//! padded to a whole number of bytes. [`pack`] produces this layout from greyscale coverage and
//! [`glyph`] reads it back.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod glyph;
pub mod pack;
