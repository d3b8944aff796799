//! Rendering of individual characters into fixed-size greyscale cells.
//!
//! The font itself is accessed through [`GlyphSource`], which only has to measure and rasterize
//! the ink of a single character. Placement of that ink inside a cell happens here.

use std::{error, fmt};

/// The fixed pixel region every glyph is rendered into.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct CellSize {
    /// The width of the cell in pixels.
    width: u8,
    /// The height of the cell in pixels.
    height: u8,
}

impl CellSize {
    /// Creates a new [`CellSize`], returning [`None`] if either dimension is zero.
    pub const fn new(width: u8, height: u8) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }

        Some(Self { width, height })
    }

    /// Returns the width of the cell in pixels.
    pub const fn width(&self) -> u8 {
        self.width
    }

    /// Returns the height of the cell in pixels.
    pub const fn height(&self) -> u8 {
        self.height
    }
}

/// An inclusive range of character codes rendered into a table.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct CharRange {
    /// The first character code.
    first: u8,
    /// The last character code.
    last: u8,
}

impl CharRange {
    /// The printable ASCII characters, from space to tilde.
    pub const PRINTABLE_ASCII: Self = Self {
        first: b' ',
        last: b'~',
    };

    /// Returns the number of characters in the range.
    pub const fn len(&self) -> usize {
        (self.last - self.first) as usize + 1
    }

    /// Returns the character codes of the range in ascending order.
    pub fn codes(&self) -> impl Iterator<Item = u8> + use<> {
        self.first..=self.last
    }
}

/// The tight box around the ink of a glyph.
///
/// `left` and `top` are relative to the drawing origin, whose y axis starts at the ascender line
/// of the font, so `top` grows downwards.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct InkBox {
    /// Horizontal distance from the origin to the first column of ink.
    pub left: i32,
    /// Vertical distance from the origin to the first row of ink.
    pub top: i32,
    /// Width of the ink in pixels.
    pub width: u32,
    /// Height of the ink in pixels.
    pub height: u32,
}

/// A row-major greyscale image where each value is how much of the pixel is covered by ink.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct CoverageBitmap {
    /// Width in pixels.
    width: usize,
    /// Height in pixels.
    height: usize,
    /// Coverage values, `width * height` of them.
    pixels: Vec<u8>,
}

impl CoverageBitmap {
    /// Creates an all-zero [`CoverageBitmap`].
    pub fn blank(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    /// Creates a [`CoverageBitmap`] from row-major `pixels`.
    ///
    /// Returns [`None`] if `pixels` does not hold exactly `width * height` values.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<u8>) -> Option<Self> {
        if pixels.len() != width * height {
            return None;
        }

        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Returns the width in pixels.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Returns the height in pixels.
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Returns the coverage values in row-major order.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Copies `ink` onto this bitmap with its top-left corner at (`x`, `y`), clipping anything
    /// that falls outside.
    fn draw(&mut self, ink: &CoverageBitmap, x: i64, y: i64) {
        if ink.width == 0 {
            return;
        }

        for (ink_y, row) in ink.pixels.chunks_exact(ink.width).enumerate() {
            let Some(target_y) = clip(y + ink_y as i64, self.height) else {
                continue;
            };

            for (ink_x, &coverage) in row.iter().enumerate() {
                let Some(target_x) = clip(x + ink_x as i64, self.width) else {
                    continue;
                };

                self.pixels[target_y * self.width + target_x] = coverage;
            }
        }
    }
}

/// Returns `position` as an index if it lies within `0..limit`.
fn clip(position: i64, limit: usize) -> Option<usize> {
    usize::try_from(position).ok().filter(|&index| index < limit)
}

/// A font that can measure and rasterize single characters.
pub trait GlyphSource {
    /// Measures the ink of `c`.
    ///
    /// # Errors
    ///
    /// Returns [`GlyphError`] if `c` cannot be measured.
    fn measure(&self, c: char) -> Result<InkBox, GlyphError>;

    /// Rasterizes the ink of `c`, returning a bitmap as large as its [`InkBox`].
    ///
    /// # Errors
    ///
    /// Returns [`GlyphError`] if `c` cannot be rasterized.
    fn rasterize(&self, c: char) -> Result<CoverageBitmap, GlyphError>;
}

/// Various errors that can occur while rendering a single glyph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GlyphError {
    /// The font has no glyph for the character.
    Missing(char),
    /// The rasterized ink does not match the measured [`InkBox`].
    SizeMismatch {
        /// The measured ink box.
        measured: InkBox,
        /// The width of the rasterized ink.
        width: usize,
        /// The height of the rasterized ink.
        height: usize,
    },
    /// The font library reported an error.
    Rasterizer(String),
}

impl fmt::Display for GlyphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(c) => write!(f, "font has no glyph for {c:?}"),
            Self::SizeMismatch {
                measured,
                width,
                height,
            } => write!(
                f,
                "rasterized ink is {width}x{height} but measured ink is {}x{}",
                measured.width, measured.height
            ),
            Self::Rasterizer(message) => write!(f, "rasterizer error: {message}"),
        }
    }
}

impl error::Error for GlyphError {}

/// The result of attempting to render a single character.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GlyphOutcome {
    /// The character was rendered into a cell-sized [`CoverageBitmap`].
    Rendered(CoverageBitmap),
    /// The character could not be rendered and its cell stays empty.
    Blank(GlyphError),
}

/// Returns the position of the drawing origin inside `cell` that centers `ink`.
///
/// The ink box's top is subtracted from the vertical offset, which places the top of the ink at
/// half the free vertical space regardless of where the font puts its baseline.
pub fn centering_offset(cell: CellSize, ink: &InkBox) -> (i64, i64) {
    let x = (i64::from(cell.width) - i64::from(ink.width)).div_euclid(2);
    let y = (i64::from(cell.height) - i64::from(ink.height)).div_euclid(2) - i64::from(ink.top);

    (x, y)
}

/// Renders `c` from `source` into a bitmap of `cell` size, centered on its ink.
///
/// Any failure to measure or rasterize `c` produces [`GlyphOutcome::Blank`].
pub fn render_glyph<S: GlyphSource + ?Sized>(source: &S, c: char, cell: CellSize) -> GlyphOutcome {
    match try_render_glyph(source, c, cell) {
        Ok(coverage) => GlyphOutcome::Rendered(coverage),
        Err(error) => GlyphOutcome::Blank(error),
    }
}

/// Renders `c` from `source` into a bitmap of `cell` size.
fn try_render_glyph<S: GlyphSource + ?Sized>(
    source: &S,
    c: char,
    cell: CellSize,
) -> Result<CoverageBitmap, GlyphError> {
    let ink_box = source.measure(c)?;
    let (origin_x, origin_y) = centering_offset(cell, &ink_box);

    let ink = source.rasterize(c)?;
    let size_matches = ink.width() as u64 == u64::from(ink_box.width)
        && ink.height() as u64 == u64::from(ink_box.height);
    if !size_matches {
        return Err(GlyphError::SizeMismatch {
            measured: ink_box,
            width: ink.width(),
            height: ink.height(),
        });
    }

    let mut canvas = CoverageBitmap::blank(usize::from(cell.width), usize::from(cell.height));
    canvas.draw(
        &ink,
        origin_x + i64::from(ink_box.left),
        origin_y + i64::from(ink_box.top),
    );

    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeSource;

    /// The cell size used by the default font table.
    const CELL: CellSize = match CellSize::new(14, 18) {
        Some(cell) => cell,
        None => unreachable!(),
    };

    /// Returns the bounding box of every pixel above zero as `(x0, y0, x1, y1)`.
    fn ink_extent(bitmap: &CoverageBitmap) -> Option<(usize, usize, usize, usize)> {
        let mut extent: Option<(usize, usize, usize, usize)> = None;
        for (index, &coverage) in bitmap.pixels().iter().enumerate() {
            if coverage == 0 {
                continue;
            }

            let (x, y) = (index % bitmap.width(), index / bitmap.width());
            extent = Some(match extent {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });
        }
        extent
    }

    #[test]
    fn cell_size_rejects_empty_cells() {
        assert!(CellSize::new(0, 18).is_none());
        assert!(CellSize::new(14, 0).is_none());
        assert_eq!(CELL.width(), 14);
        assert_eq!(CELL.height(), 18);
    }

    #[test]
    fn printable_ascii_has_95_codes() {
        let range = CharRange::PRINTABLE_ASCII;
        assert_eq!(range.len(), 95);

        let codes = range.codes().collect::<Vec<_>>();
        assert_eq!(codes.len(), 95);
        assert_eq!(codes.first(), Some(&32));
        assert_eq!(codes.last(), Some(&126));
    }

    #[test]
    fn centering_uses_floor_division() {
        let ink = InkBox {
            left: 0,
            top: 0,
            width: 9,
            height: 12,
        };
        assert_eq!(centering_offset(CELL, &ink), (2, 3));

        let oversized = InkBox {
            left: 0,
            top: 0,
            width: 17,
            height: 21,
        };
        assert_eq!(centering_offset(CELL, &oversized), (-2, -2));
    }

    #[test]
    fn vertical_offset_subtracts_ink_top() {
        let ink = InkBox {
            left: 1,
            top: 4,
            width: 9,
            height: 12,
        };
        assert_eq!(centering_offset(CELL, &ink), (2, -1));
    }

    #[test]
    fn centers_ink_inside_cell() {
        let source = FakeSource::new().with_glyph('A', 0, 0, 9, 12, 255);

        let GlyphOutcome::Rendered(bitmap) = render_glyph(&source, 'A', CELL) else {
            panic!("'A' should render");
        };
        assert_eq!(bitmap.width(), 14);
        assert_eq!(bitmap.height(), 18);
        assert_eq!(ink_extent(&bitmap), Some((2, 3, 10, 14)));
    }

    #[test]
    fn ink_top_lands_at_half_the_free_space() {
        let source = FakeSource::new().with_glyph('g', 1, 7, 6, 10, 200);

        let GlyphOutcome::Rendered(bitmap) = render_glyph(&source, 'g', CELL) else {
            panic!("'g' should render");
        };
        // origin = ((14 - 6) / 2, (18 - 10) / 2 - 7) = (4, -3), ink at origin + (1, 7)
        assert_eq!(ink_extent(&bitmap), Some((5, 4, 10, 13)));
    }

    #[test]
    fn oversized_ink_is_clipped() {
        let source = FakeSource::new().with_glyph('W', 0, 0, 20, 24, 255);

        let GlyphOutcome::Rendered(bitmap) = render_glyph(&source, 'W', CELL) else {
            panic!("'W' should render");
        };
        assert!(bitmap.pixels().iter().all(|&coverage| coverage == 255));
    }

    #[test]
    fn empty_ink_renders_blank_cell() {
        let source = FakeSource::new().with_glyph(' ', 0, 0, 0, 0, 0);

        let GlyphOutcome::Rendered(bitmap) = render_glyph(&source, ' ', CELL) else {
            panic!("' ' should render");
        };
        assert_eq!(bitmap, CoverageBitmap::blank(14, 18));
    }

    #[test]
    fn measurement_failure_is_blank() {
        let source = FakeSource::new().failing_measure('Q');

        assert_eq!(
            render_glyph(&source, 'Q', CELL),
            GlyphOutcome::Blank(GlyphError::Missing('Q'))
        );
    }

    #[test]
    fn mismatched_ink_is_blank() {
        let source = FakeSource::new().mismatched('M');

        assert!(matches!(
            render_glyph(&source, 'M', CELL),
            GlyphOutcome::Blank(GlyphError::SizeMismatch { .. })
        ));
    }

    #[test]
    fn from_pixels_checks_length() {
        assert!(CoverageBitmap::from_pixels(3, 2, vec![0; 5]).is_none());
        assert!(CoverageBitmap::from_pixels(3, 2, vec![0; 6]).is_some());
        assert!(CoverageBitmap::from_pixels(0, 0, Vec::new()).is_some());
    }
}
