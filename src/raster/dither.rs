//! # Binarization
//!
//! Thermal heads print black or nothing. Two ways of getting from an 8-bit
//! grayscale bitmap to dots live here:
//!
//! - **Threshold** for rendered text and rules: a pixel prints when its luma
//!   is below [`TEXT_THRESHOLD`]. Anti-aliased glyph edges snap cleanly.
//! - **Ordered dither** (Bayer 8×8) for photographs such as the drink
//!   side-channel images, where a hard threshold would flatten everything.
//!
//! ```text
//!     0   1   2   3   4   5   6   7   (x mod 8)
//! 0 │ 0  32   8  40   2  34  10  42
//! 1 │48  16  56  24  50  18  58  26
//! 2 │12  44   4  36  14  46   6  38
//! 3 │60  28  52  20  62  30  54  22
//! 4 │ 3  35  11  43   1  33   9  41
//! 5 │51  19  59  27  49  17  57  25
//! 6 │15  47   7  39  13  45   5  37
//! 7 │63  31  55  23  61  29  53  21
//! (y mod 8)
//! ```
//!
//! Both produce rows packed MSB-first, ready for `GS v 0`.
//!
//! ```
//! use labelpress::raster::dither;
//!
//! let row = vec![true, true, false, false, true, false, true, false];
//! assert_eq!(dither::pack_row(&row), vec![0b11001010]);
//! ```

/// Bayer 8x8 ordered dithering matrix (values 0-63, each exactly once).
pub const BAYER8: [[u8; 8]; 8] = [
    [0, 32, 8, 40, 2, 34, 10, 42],
    [48, 16, 56, 24, 50, 18, 58, 26],
    [12, 44, 4, 36, 14, 46, 6, 38],
    [60, 28, 52, 20, 62, 30, 54, 22],
    [3, 35, 11, 43, 1, 33, 9, 41],
    [51, 19, 59, 27, 49, 17, 57, 25],
    [15, 47, 7, 39, 13, 45, 5, 37],
    [63, 31, 55, 23, 61, 29, 53, 21],
];

/// Luma below which a text pixel prints.
pub const TEXT_THRESHOLD: u8 = 128;

/// Dither threshold at a pixel position, in (0, 1).
///
/// `(BAYER8[y & 7][x & 7] + 0.5) / 64`, so pure black always prints and
/// pure white never does.
#[inline]
pub fn threshold(x: usize, y: usize) -> f32 {
    (BAYER8[y & 7][x & 7] as f32 + 0.5) / 64.0
}

/// Whether a dot prints for `intensity` (0.0 = white, 1.0 = black).
///
/// ```
/// use labelpress::raster::dither::should_print;
///
/// assert!(should_print(3, 5, 1.0));
/// assert!(!should_print(3, 5, 0.0));
/// ```
#[inline]
pub fn should_print(x: usize, y: usize, intensity: f32) -> bool {
    intensity > threshold(x, y)
}

/// Ink intensity of an 8-bit luma value (inverted: dark = 1.0).
#[inline]
pub fn luma_intensity(luma: u8) -> f32 {
    1.0 - luma as f32 / 255.0
}

/// Pack booleans into bytes, MSB = leftmost dot, zero-padded on the right.
///
/// ```
/// use labelpress::raster::dither::pack_row;
///
/// assert_eq!(pack_row(&[true; 12]), vec![0xFF, 0xF0]);
/// ```
pub fn pack_row(pixels: &[bool]) -> Vec<u8> {
    let mut bytes = vec![0u8; pixels.len().div_ceil(8)];
    for (i, _) in pixels.iter().enumerate().filter(|(_, p)| **p) {
        bytes[i / 8] |= 0x80 >> (i % 8);
    }
    bytes
}

/// Pack a row-major luma buffer with a hard threshold.
pub fn threshold_luma(width: usize, height: usize, luma: &[u8]) -> Vec<u8> {
    pack_with(width, height, |x, y| luma[y * width + x] < TEXT_THRESHOLD)
}

/// Pack a row-major luma buffer with Bayer ordered dithering.
pub fn dither_luma(width: usize, height: usize, luma: &[u8]) -> Vec<u8> {
    pack_with(width, height, |x, y| {
        should_print(x, y, luma_intensity(luma[y * width + x]))
    })
}

fn pack_with<F>(width: usize, height: usize, is_black: F) -> Vec<u8>
where
    F: Fn(usize, usize) -> bool,
{
    let mut data = Vec::with_capacity(width.div_ceil(8) * height);
    let mut row = Vec::with_capacity(width);
    for y in 0..height {
        row.clear();
        row.extend((0..width).map(|x| is_black(x, y)));
        data.extend(pack_row(&row));
    }
    data
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bayer_matrix_is_permutation() {
        let mut seen = [false; 64];
        for &val in BAYER8.iter().flatten() {
            assert!(!seen[val as usize], "duplicate {}", val);
            seen[val as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_threshold_repeats_every_eight() {
        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(threshold(x, y), threshold(x + 8, y + 16));
            }
        }
    }

    #[test]
    fn test_mid_gray_prints_half() {
        let count = (0..8)
            .flat_map(|y| (0..8).map(move |x| (x, y)))
            .filter(|&(x, y)| should_print(x, y, 0.5))
            .count();
        assert_eq!(count, 32);
    }

    #[test]
    fn test_pack_row_padding() {
        assert_eq!(pack_row(&[true; 9]), vec![0xFF, 0x80]);
        assert_eq!(pack_row(&[]), Vec::<u8>::new());
    }

    #[test]
    fn test_threshold_luma_cutoff() {
        let luma = [0, 127, 128, 255, 0, 0, 0, 0];
        assert_eq!(threshold_luma(8, 1, &luma), vec![0b1100_1111]);
    }

    #[test]
    fn test_dither_extremes() {
        let black = vec![0u8; 16 * 16];
        let white = vec![255u8; 16 * 16];
        assert!(dither_luma(16, 16, &black).iter().all(|&b| b == 0xFF));
        assert!(dither_luma(16, 16, &white).iter().all(|&b| b == 0x00));
    }
}
