//! [`GlyphSource`] implementation backed by [`fontdue`].

use std::{error, fmt};

use fontdue::{Font, FontSettings};

use crate::raster::{CoverageBitmap, GlyphError, GlyphSource, InkBox};

/// A TrueType or OpenType font rasterized at a fixed pixel size.
pub struct FontdueSource {
    /// The parsed font.
    font: Font,
    /// The pixel size glyphs are rasterized at.
    px: f32,
    /// The distance from the ascender line to the baseline, in whole pixels.
    ascent: i32,
}

impl FontdueSource {
    /// Parses `bytes` as a font that will be rasterized at `size` pixels.
    ///
    /// # Errors
    ///
    /// Returns [`LoadFontError`] if `bytes` is not a font `fontdue` understands.
    pub fn from_bytes(bytes: &[u8], size: u8) -> Result<Self, LoadFontError> {
        let font = Font::from_bytes(bytes, FontSettings::default()).map_err(LoadFontError)?;

        let px = f32::from(size);
        let ascent = match font.horizontal_line_metrics(px) {
            Some(metrics) => metrics.ascent.round() as i32,
            None => {
                log::debug!("font has no horizontal line metrics, using the baseline as origin");
                0
            }
        };

        Ok(Self { font, px, ascent })
    }

    /// Returns `Ok(())` if the font has a glyph for `c`.
    fn check_glyph(&self, c: char) -> Result<(), GlyphError> {
        if self.font.lookup_glyph_index(c) == 0 {
            return Err(GlyphError::Missing(c));
        }

        Ok(())
    }
}

impl GlyphSource for FontdueSource {
    fn measure(&self, c: char) -> Result<InkBox, GlyphError> {
        self.check_glyph(c)?;

        let metrics = self.font.metrics(c, self.px);
        let width = u32::try_from(metrics.width)
            .map_err(|_| GlyphError::Rasterizer(format!("ink of {c:?} is too wide")))?;
        let height = u32::try_from(metrics.height)
            .map_err(|_| GlyphError::Rasterizer(format!("ink of {c:?} is too tall")))?;

        // fontdue measures `ymin` upwards from the baseline to the bottom of the ink.
        let top = self.ascent - (metrics.ymin + height as i32);

        Ok(InkBox {
            left: metrics.xmin,
            top,
            width,
            height,
        })
    }

    fn rasterize(&self, c: char) -> Result<CoverageBitmap, GlyphError> {
        self.check_glyph(c)?;

        let (metrics, bitmap) = self.font.rasterize(c, self.px);
        CoverageBitmap::from_pixels(metrics.width, metrics.height, bitmap).ok_or_else(|| {
            GlyphError::Rasterizer(format!("coverage of {c:?} does not match its metrics"))
        })
    }
}

/// An error that occurs when `fontdue` cannot parse a font.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadFontError(&'static str);

impl fmt::Display for LoadFontError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font could not be parsed: {}", self.0)
    }
}

impl error::Error for LoadFontError {}
