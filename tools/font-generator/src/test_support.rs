//! Glyph sources and table fixtures shared by the tests of every module.

use std::collections::{HashMap, HashSet};

use packed_font::pack::Threshold;

use crate::{
    raster::{CellSize, CharRange, CoverageBitmap, GlyphError, GlyphSource, InkBox},
    source::FontdueSource,
    table::{TableLayout, TableMetadata},
};

/// DejaVu Sans Mono reduced to the space, `.`, `A` and `g` glyphs.
pub const SUBSET_FONT: &[u8] = include_bytes!("../fixtures/DejaVuSansMono-Subset.ttf");

/// The characters [`SUBSET_FONT`] has glyphs for.
pub const SUBSET_CHARACTERS: [char; 4] = [' ', '.', 'A', 'g'];

/// Returns [`SUBSET_FONT`] rasterized at 14 pixels.
///
/// # Panics
///
/// Panics if `fontdue` rejects the fixture.
pub fn subset_source() -> FontdueSource {
    FontdueSource::from_bytes(SUBSET_FONT, 14).unwrap()
}

/// Returns the layout of the default table.
pub fn default_layout() -> TableLayout {
    TableLayout {
        cell: CellSize::new(14, 18).unwrap(),
        range: CharRange::PRINTABLE_ASCII,
        threshold: Threshold::DEFAULT,
    }
}

/// Returns metadata describing the default table.
pub fn default_metadata() -> TableMetadata {
    TableMetadata {
        family: "inter".to_owned(),
        label: "Inter Regular".to_owned(),
        source_name: "Inter-Regular.otf".to_owned(),
        point_size: 14,
    }
}

/// A glyph with explicitly chosen ink.
#[derive(Clone, Copy, Debug)]
struct FakeGlyph {
    /// The ink box reported by [`GlyphSource::measure()`].
    ink: InkBox,
    /// The coverage of every ink pixel.
    coverage: u8,
}

/// A [`GlyphSource`] that invents ink for every character.
///
/// Characters without an explicit glyph get a box and coverage pattern derived from their code,
/// so every character renders something different but deterministic.
#[derive(Clone, Debug, Default)]
pub struct FakeSource {
    /// Explicitly configured glyphs.
    glyphs: HashMap<char, FakeGlyph>,
    /// Characters whose measurement fails.
    failing: HashSet<char>,
    /// Characters whose rasterized ink disagrees with their measurement.
    mismatched: HashSet<char>,
}

impl FakeSource {
    /// Creates a [`FakeSource`] with only derived glyphs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gives `c` a solid block of ink.
    pub fn with_glyph(
        mut self,
        c: char,
        left: i32,
        top: i32,
        width: u32,
        height: u32,
        coverage: u8,
    ) -> Self {
        let ink = InkBox {
            left,
            top,
            width,
            height,
        };
        self.glyphs.insert(c, FakeGlyph { ink, coverage });
        self
    }

    /// Makes measuring `c` fail.
    pub fn failing_measure(mut self, c: char) -> Self {
        self.failing.insert(c);
        self
    }

    /// Makes rasterizing `c` return ink one pixel wider than measured.
    pub fn mismatched(mut self, c: char) -> Self {
        self.mismatched.insert(c);
        self
    }
}

impl GlyphSource for FakeSource {
    fn measure(&self, c: char) -> Result<InkBox, GlyphError> {
        if self.failing.contains(&c) {
            return Err(GlyphError::Missing(c));
        }

        if let Some(glyph) = self.glyphs.get(&c) {
            return Ok(glyph.ink);
        }

        let code = c as u32;
        Ok(InkBox {
            left: (code % 2) as i32,
            top: (code % 3) as i32,
            width: 4 + code % 6,
            height: 6 + code % 7,
        })
    }

    fn rasterize(&self, c: char) -> Result<CoverageBitmap, GlyphError> {
        let ink = self.measure(c)?;
        let width = ink.width as usize + usize::from(self.mismatched.contains(&c));
        let height = ink.height as usize;

        let pixels = match self.glyphs.get(&c) {
            Some(glyph) => vec![glyph.coverage; width * height],
            None => (0..width * height)
                .map(|index| ((index * 31 + c as usize) % 256) as u8)
                .collect(),
        };

        CoverageBitmap::from_pixels(width, height, pixels)
            .ok_or_else(|| GlyphError::Rasterizer("bad fake bitmap".to_owned()))
    }
}
