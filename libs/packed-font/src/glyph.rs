//! Interface for reading packed glyphs.

#[cfg(feature = "std")]
use std::io::{self, Write};

use crate::pack::{packed_len, row_stride};

/// An array of equally sized [`Glyph`]s stored back to back.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct GlyphArray<'buffer> {
    /// The width of a [`Glyph`] in pixels.
    width: u8,
    /// The height of a [`Glyph`] in pixels.
    height: u8,
    /// The underlying storage holding the array of [`Glyph`]s.
    buffer: &'buffer [u8],
}

impl<'buffer> GlyphArray<'buffer> {
    /// Creates a new [`GlyphArray`] over `buffer`, which holds packed glyphs of `width` by
    /// `height` pixels.
    pub const fn new(buffer: &'buffer [u8], width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            buffer,
        }
    }

    /// Creates a new [`GlyphArray`] from a blob produced by [`GlyphArray::dump()`].
    ///
    /// Returns [`None`] if the blob is too short, describes an empty glyph, or does not hold a
    /// whole number of glyphs.
    pub const fn from_dump(dump: &'buffer [u8]) -> Option<Self> {
        let [width, height, buffer @ ..] = dump else {
            return None;
        };

        let glyph_byte_count = packed_len(*width, *height);
        if glyph_byte_count == 0 || buffer.is_empty() || buffer.len() % glyph_byte_count != 0 {
            return None;
        }

        Some(Self::new(buffer, *width, *height))
    }

    /// Returns the [`Glyph`] at `index` or `None` if out of bounds.
    pub fn get(&self, index: usize) -> Option<Glyph<'buffer>> {
        if index >= self.glyph_count() {
            return None;
        }

        let glyph_byte_count = packed_len(self.width, self.height);
        let start = index * glyph_byte_count;

        let glyph = Glyph {
            width: self.width,
            height: self.height,
            buffer: &self.buffer[start..start + glyph_byte_count],
        };
        Some(glyph)
    }

    /// Returns the width of a [`Glyph`] in pixels.
    pub const fn width(&self) -> u8 {
        self.width
    }

    /// Returns the height of a [`Glyph`] in pixels.
    pub const fn height(&self) -> u8 {
        self.height
    }

    /// Returns the number of [`Glyph`]s in this [`GlyphArray`].
    pub const fn glyph_count(&self) -> usize {
        let glyph_byte_count = packed_len(self.width, self.height);
        if glyph_byte_count == 0 {
            return 0;
        }

        self.buffer.len() / glyph_byte_count
    }

    /// Returns an [`Iterator`] over every [`Glyph`] in order.
    pub fn iter(&self) -> impl Iterator<Item = Glyph<'buffer>> + use<'buffer> {
        let array = *self;
        (0..array.glyph_count()).filter_map(move |index| array.get(index))
    }

    /// Dumps the [`GlyphArray`] into the `writer`.
    ///
    /// The dump is the glyph width, the glyph height and then the packed glyphs.
    ///
    /// # Errors
    ///
    /// Returns any error produced by `writer`.
    #[cfg(feature = "std")]
    pub fn dump<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(&[self.width, self.height])?;
        writer.write_all(self.buffer)
    }
}

/// Stores the on/off layout of a specific glyph in a font.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Glyph<'buffer> {
    /// The width of a [`Glyph`] in pixels.
    width: u8,
    /// The height of a [`Glyph`] in pixels.
    height: u8,
    /// The bytes holding the [`Glyph`].
    buffer: &'buffer [u8],
}

impl<'buffer> Glyph<'buffer> {
    /// Returns the packed bytes of this [`Glyph`].
    pub const fn bytes(&self) -> &'buffer [u8] {
        self.buffer
    }

    /// Returns `true` if no pixel of this [`Glyph`] is on.
    pub fn is_blank(&self) -> bool {
        self.buffer.iter().all(|&byte| byte == 0)
    }
}

impl<'buffer> IntoIterator for Glyph<'buffer> {
    type IntoIter = GlyphRowsIter<'buffer>;
    type Item = GlyphRow<'buffer>;

    fn into_iter(self) -> Self::IntoIter {
        GlyphRowsIter {
            width: self.width,
            height: self.height,
            buffer: self.buffer,
            index: 0,
        }
    }
}

/// An [`Iterator`] over the rows of a [`Glyph`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct GlyphRowsIter<'buffer> {
    /// The width of a [`Glyph`] in pixels.
    width: u8,
    /// The height of a [`Glyph`] in pixels.
    height: u8,
    /// The bytes holding the [`Glyph`].
    buffer: &'buffer [u8],
    /// The index of the next [`GlyphRow`] to be returned.
    index: u8,
}

impl<'buffer> Iterator for GlyphRowsIter<'buffer> {
    type Item = GlyphRow<'buffer>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.height {
            return None;
        }

        let stride = row_stride(self.width);
        let start = stride * self.index as usize;

        self.index += 1;
        let row = GlyphRow {
            width: self.width,
            buffer: &self.buffer[start..start + stride],
        };
        Some(row)
    }
}

/// A row in the [`Glyph`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct GlyphRow<'buffer> {
    /// The number of pixels in the row.
    width: u8,
    /// The bytes holding the [`Glyph`]'s row.
    buffer: &'buffer [u8],
}

impl<'buffer> IntoIterator for GlyphRow<'buffer> {
    type Item = bool;
    type IntoIter = GlyphRowIter<'buffer>;

    fn into_iter(self) -> Self::IntoIter {
        GlyphRowIter {
            width: self.width,
            buffer: self.buffer,
            index: 0,
        }
    }
}

/// An [`Iterator`] over the pixels in a [`GlyphRow`], from left to right.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct GlyphRowIter<'buffer> {
    /// The width of a [`Glyph`] in pixels.
    width: u8,
    /// The bytes holding the [`Glyph`]'s row.
    buffer: &'buffer [u8],
    /// The index of next pixel to be returned.
    index: u8,
}

impl Iterator for GlyphRowIter<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.width {
            return None;
        }

        let byte_index = (self.index / 8) as usize;
        let bit_index = 7 - (self.index % 8);
        let bit = (self.buffer[byte_index] >> bit_index) & 0b1;

        self.index += 1;
        Some(bit == 1)
    }
}
