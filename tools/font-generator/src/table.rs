//! Construction of the packed font table from a [`GlyphSource`].

use packed_font::{
    glyph::GlyphArray,
    pack::{Threshold, pack_into, packed_len},
};

use crate::raster::{CellSize, CharRange, GlyphOutcome, GlyphSource, render_glyph};

/// The shape of a [`FontTable`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct TableLayout {
    /// The cell every glyph is rendered into.
    pub cell: CellSize,
    /// The characters in the table.
    pub range: CharRange,
    /// The coverage a pixel must exceed to be on.
    pub threshold: Threshold,
}

/// Descriptive information carried into the emitted table.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct TableMetadata {
    /// Identifier prefix of the emitted declarations, such as `inter`.
    pub family: String,
    /// Human readable font name, such as `Inter Regular`.
    pub label: String,
    /// File name of the font the table was generated from.
    pub source_name: String,
    /// The nominal size glyphs were rasterized at, in pixels.
    pub point_size: u8,
}

/// Packed glyphs for every character of a [`CharRange`], in ascending order.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct FontTable {
    /// The shape of the table.
    layout: TableLayout,
    /// Descriptive information about the table.
    metadata: TableMetadata,
    /// The packed glyphs, back to back.
    glyphs: Vec<u8>,
    /// The character codes that could not be rendered.
    blank: Vec<u8>,
}

impl FontTable {
    /// Renders and packs every character of `layout` from `source`.
    ///
    /// Characters that fail to render are kept as empty glyphs so the table always holds
    /// [`CharRange::len()`] entries.
    pub fn build<S: GlyphSource + ?Sized>(
        source: &S,
        layout: TableLayout,
        metadata: TableMetadata,
    ) -> Self {
        let cell = layout.cell;
        let outcomes = layout
            .range
            .codes()
            .map(|code| (code, render_glyph(source, char::from(code), cell)))
            .collect::<Vec<_>>();

        let stride = packed_len(cell.width(), cell.height());
        let mut glyphs = vec![0; stride * outcomes.len()];
        let mut blank = Vec::new();

        for ((code, outcome), packed) in outcomes.iter().zip(glyphs.chunks_exact_mut(stride)) {
            match outcome {
                GlyphOutcome::Rendered(coverage) => {
                    log::debug!("packing glyph {code}");
                    pack_into(
                        coverage.pixels(),
                        cell.width(),
                        cell.height(),
                        layout.threshold,
                        packed,
                    );
                }
                GlyphOutcome::Blank(error) => {
                    log::warn!("glyph {code} left blank: {error}");
                    blank.push(*code);
                }
            }
        }

        Self {
            layout,
            metadata,
            glyphs,
            blank,
        }
    }

    /// Returns the shape of the table.
    pub const fn layout(&self) -> &TableLayout {
        &self.layout
    }

    /// Returns the descriptive information of the table.
    pub const fn metadata(&self) -> &TableMetadata {
        &self.metadata
    }

    /// Returns the number of glyphs in the table.
    pub fn glyph_count(&self) -> usize {
        self.layout.range.len()
    }

    /// Returns the number of bytes in a single packed glyph.
    pub const fn stride(&self) -> usize {
        packed_len(self.layout.cell.width(), self.layout.cell.height())
    }

    /// Returns every character code with its packed glyph, in ascending order.
    pub fn glyphs(&self) -> impl Iterator<Item = (u8, &[u8])> {
        self.layout
            .range
            .codes()
            .zip(self.glyphs.chunks_exact(self.stride()))
    }

    /// Returns the character codes that were left blank because they could not be rendered.
    pub fn blank_codes(&self) -> &[u8] {
        &self.blank
    }

    /// Returns the table as a [`GlyphArray`].
    pub fn as_glyph_array(&self) -> GlyphArray<'_> {
        GlyphArray::new(
            &self.glyphs,
            self.layout.cell.width(),
            self.layout.cell.height(),
        )
    }
}
