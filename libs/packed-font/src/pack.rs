//! Quantization of greyscale coverage into packed glyph rows.

/// The coverage value a pixel must exceed to be considered inked.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Threshold(pub u8);

impl Threshold {
    /// The default [`Threshold`], chosen so that lightly antialiased edges still produce ink.
    pub const DEFAULT: Self = Self(64);

    /// Returns `true` if a pixel with the given `coverage` is on.
    pub const fn is_on(self, coverage: u8) -> bool {
        coverage > self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Returns the number of bytes used to store a single row of a glyph `width` pixels wide.
pub const fn row_stride(width: u8) -> usize {
    width.div_ceil(8) as usize
}

/// Returns the number of bytes used to store a packed glyph of `width` by `height` pixels.
pub const fn packed_len(width: u8, height: u8) -> usize {
    row_stride(width) * height as usize
}

/// Packs the `width` by `height` greyscale `coverage` bitmap into `out`.
///
/// Bit `7 - j` of each output byte is set when pixel `j` of the corresponding group of eight
/// pixels has coverage above `threshold`. Padding bits at the end of a row are always clear.
///
/// # Panics
///
/// Panics if `coverage` does not hold exactly `width * height` pixels or if `out` is not exactly
/// [`packed_len()`] bytes long.
pub fn pack_into(coverage: &[u8], width: u8, height: u8, threshold: Threshold, out: &mut [u8]) {
    assert_eq!(coverage.len(), width as usize * height as usize);
    assert_eq!(out.len(), packed_len(width, height));

    if width == 0 {
        return;
    }

    let rows = coverage.chunks_exact(width as usize);
    let packed_rows = out.chunks_exact_mut(row_stride(width));
    for (row, packed_row) in rows.zip(packed_rows) {
        for (pixels, byte) in row.chunks(8).zip(packed_row.iter_mut()) {
            *byte = pack_byte(pixels, threshold);
        }
    }
}

/// Packs up to eight `pixels` into a single byte, most-significant bit first.
fn pack_byte(pixels: &[u8], threshold: Threshold) -> u8 {
    pixels
        .iter()
        .enumerate()
        .filter(|&(_, &coverage)| threshold.is_on(coverage))
        .fold(0, |byte, (index, _)| byte | (0x80 >> index))
}
