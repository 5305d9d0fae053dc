//! # 1-Bit Dithering
//!
//! Thermal printers burn a dot or leave the paper blank; there is no gray.
//! This module converts an 8-bit luminance sample into that binary world
//! while keeping the *impression* of gray through dot patterns.
//!
//! ## The Four Algorithms
//!
//! | Algorithm | Character | Scan dependence |
//! |-----------|-----------|-----------------|
//! | Threshold | Hard cutoff, banding on gradients | none, per pixel |
//! | Bayer | Regular 8x8 halftone screen | none, per pixel |
//! | Floyd-Steinberg | Diffused noise, best tonal range | strict raster order |
//! | Atkinson | Lighter, cleaner than Floyd-Steinberg | strict raster order |
//!
//! Threshold and Bayer decide every pixel independently. The two diffusion
//! algorithms push each pixel's quantization error onto not-yet-visited
//! neighbors, so they must run left-to-right, top-to-bottom and are exactly
//! reproducible for a given input.
//!
//! ## Luminance Convention
//!
//! Input samples are luminance bytes where 0 = black and 255 = white (the
//! usual image convention). Output bits are printer convention: 1 = burn a
//! dot (dark), 0 = leave blank. A pixel prints dark when its (possibly
//! error-adjusted) luminance falls *below* the cutoff.
//!
//! ## Usage Example
//!
//! ```
//! use boleta::render::dither::{dither, DitheringAlgorithm, DEFAULT_THRESHOLD};
//!
//! // A 2x2 sample: dark, light / light, dark
//! let luma = [96u8, 160, 160, 96];
//! let bitmap = dither(&luma, 2, 2, DitheringAlgorithm::Threshold, DEFAULT_THRESHOLD);
//!
//! // Each row pads to one byte; the MSB is the leftmost pixel.
//! assert_eq!(bitmap.data, vec![0b1000_0000, 0b0100_0000]);
//! ```

// ============================================================================
// ALGORITHM SELECTION
// ============================================================================

/// Binarization cutoff used when the caller does not override it.
pub const DEFAULT_THRESHOLD: u8 = 128;

/// How a luminance sample is reduced to one bit per pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DitheringAlgorithm {
    /// Dark wherever luminance is below the cutoff. No patterning.
    #[default]
    Threshold,
    /// Ordered dithering against the 8x8 Bayer matrix.
    Bayer,
    /// Error diffusion, 7/16 right, 3/16 below-left, 5/16 below,
    /// 1/16 below-right.
    FloydSteinberg,
    /// Error diffusion over six neighbors at 1/8 each; the remaining
    /// quarter of the error is dropped.
    Atkinson,
}

/// Bayer 8x8 ordered-dither matrix, values 0-63 each appearing once.
///
/// Scaled to the 0-255 luminance range as `value * 4 + 2`, the matrix
/// becomes a per-position cutoff: low cells fire on faint grays, high cells
/// only on near-black, and the arrangement interleaves them into a halftone
/// screen with no visible seam across the 8-pixel tile.
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

// ============================================================================
// PACKED BITMAP
// ============================================================================

/// A packed monochrome bitmap, one bit per pixel, 1 = dark.
///
/// Rows are padded to a byte boundary on the right with 0 (blank), matching
/// what raster graphics commands expect on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    /// Width in pixels (not bytes).
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major packed rows, `row_bytes()` bytes per row.
    pub data: Vec<u8>,
}

impl Bitmap {
    /// Bytes per packed row: width rounded up to the next multiple of 8.
    pub fn row_bytes(&self) -> usize {
        (self.width as usize).div_ceil(8)
    }
}

/// Pack one row of pixel decisions into bytes, MSB first.
///
/// Bit 7 of the first byte is the leftmost pixel; a row whose length is not
/// a multiple of 8 pads the final byte with 0 on the right.
///
/// ```
/// use boleta::render::dither::pack_row;
///
/// let row = [true, true, false, false, true, false, true, false];
/// assert_eq!(pack_row(&row), vec![0b1100_1010]);
///
/// // 4 pixels still occupy a whole byte
/// assert_eq!(pack_row(&[true; 4]), vec![0xF0]);
/// ```
pub fn pack_row(pixels: &[bool]) -> Vec<u8> {
    let mut bytes = vec![0u8; pixels.len().div_ceil(8)];
    for (i, &dark) in pixels.iter().enumerate() {
        if dark {
            bytes[i / 8] |= 0x80 >> (i & 7);
        }
    }
    bytes
}

// ============================================================================
// DISPATCH
// ============================================================================

/// Dither a luminance sample down to a packed 1-bit bitmap.
///
/// `luma` is row-major, `width * height` bytes, 0 = black through
/// 255 = white. `threshold` is the binarization cutoff: the direct cutoff
/// for [`DitheringAlgorithm::Threshold`], the base level shifting the whole
/// matrix for [`DitheringAlgorithm::Bayer`], and the post-diffusion cutoff
/// for the two error-diffusion algorithms. [`DEFAULT_THRESHOLD`] keeps every
/// algorithm at its midpoint behavior.
///
/// The output bitmap has identical pixel dimensions; only the packing pads
/// row tails.
pub fn dither(
    luma: &[u8],
    width: u32,
    height: u32,
    algorithm: DitheringAlgorithm,
    threshold: u8,
) -> Bitmap {
    debug_assert_eq!(
        luma.len(),
        width as usize * height as usize,
        "luminance sample does not match dimensions"
    );
    let data = match algorithm {
        DitheringAlgorithm::Threshold => fixed_threshold(luma, width, height, threshold),
        DitheringAlgorithm::Bayer => ordered_bayer(luma, width, height, threshold),
        DitheringAlgorithm::FloydSteinberg => floyd_steinberg(luma, width, height, threshold),
        DitheringAlgorithm::Atkinson => atkinson(luma, width, height, threshold),
    };
    Bitmap {
        width,
        height,
        data,
    }
}

// ============================================================================
// PER-PIXEL ALGORITHMS
// ============================================================================

fn fixed_threshold(luma: &[u8], width: u32, height: u32, threshold: u8) -> Vec<u8> {
    let w = width as usize;
    let mut data = Vec::with_capacity(w.div_ceil(8) * height as usize);
    let mut row_pixels = Vec::with_capacity(w);
    for y in 0..height as usize {
        row_pixels.clear();
        row_pixels.extend(luma[y * w..(y + 1) * w].iter().map(|&l| l < threshold));
        data.extend(pack_row(&row_pixels));
    }
    data
}

fn ordered_bayer(luma: &[u8], width: u32, height: u32, threshold: u8) -> Vec<u8> {
    let w = width as usize;
    let shift = i16::from(threshold) - i16::from(DEFAULT_THRESHOLD);
    let mut data = Vec::with_capacity(w.div_ceil(8) * height as usize);
    let mut row_pixels = Vec::with_capacity(w);
    for y in 0..height as usize {
        row_pixels.clear();
        for x in 0..w {
            // Matrix cell scaled to 0-255, then shifted by the caller's
            // threshold relative to the midpoint.
            let level = i16::from(BAYER8[y & 7][x & 7]) * 4 + 2;
            let cutoff = (level + shift).clamp(0, 255);
            row_pixels.push(i16::from(luma[y * w + x]) < cutoff);
        }
        data.extend(pack_row(&row_pixels));
    }
    data
}

// ============================================================================
// ERROR-DIFFUSION ALGORITHMS
// ============================================================================

fn floyd_steinberg(luma: &[u8], width: u32, height: u32, threshold: u8) -> Vec<u8> {
    let w = width as usize;
    let h = height as usize;
    let cutoff = i16::from(threshold);

    // Error carried into the current and the following row.
    let mut cur = vec![0i16; w];
    let mut next = vec![0i16; w];

    let mut data = Vec::with_capacity(w.div_ceil(8) * h);
    let mut row_pixels = Vec::with_capacity(w);
    for y in 0..h {
        row_pixels.clear();
        for x in 0..w {
            let value = (i16::from(luma[y * w + x]) + cur[x]).clamp(0, 255);
            let dark = value < cutoff;
            let err = value - if dark { 0 } else { 255 };

            if x + 1 < w {
                cur[x + 1] += err * 7 / 16;
            }
            if y + 1 < h {
                if x > 0 {
                    next[x - 1] += err * 3 / 16;
                }
                next[x] += err * 5 / 16;
                if x + 1 < w {
                    next[x + 1] += err / 16;
                }
            }
            row_pixels.push(dark);
        }
        data.extend(pack_row(&row_pixels));
        std::mem::swap(&mut cur, &mut next);
        next.fill(0);
    }
    data
}

fn atkinson(luma: &[u8], width: u32, height: u32, threshold: u8) -> Vec<u8> {
    let w = width as usize;
    let h = height as usize;
    let cutoff = i16::from(threshold);

    // The below+2 neighbor needs error buffers two rows deep.
    let mut cur = vec![0i16; w];
    let mut next = vec![0i16; w];
    let mut after = vec![0i16; w];

    let mut data = Vec::with_capacity(w.div_ceil(8) * h);
    let mut row_pixels = Vec::with_capacity(w);
    for y in 0..h {
        row_pixels.clear();
        for x in 0..w {
            let value = (i16::from(luma[y * w + x]) + cur[x]).clamp(0, 255);
            let dark = value < cutoff;
            // One eighth to each of six neighbors; the final 2/8 is dropped.
            let err = (value - if dark { 0 } else { 255 }) / 8;

            if x + 1 < w {
                cur[x + 1] += err;
            }
            if x + 2 < w {
                cur[x + 2] += err;
            }
            if y + 1 < h {
                if x > 0 {
                    next[x - 1] += err;
                }
                next[x] += err;
                if x + 1 < w {
                    next[x + 1] += err;
                }
            }
            if y + 2 < h {
                after[x] += err;
            }
            row_pixels.push(dark);
        }
        data.extend(pack_row(&row_pixels));
        std::mem::swap(&mut cur, &mut next);
        std::mem::swap(&mut next, &mut after);
        after.fill(0);
    }
    data
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ALL_ALGORITHMS: [DitheringAlgorithm; 4] = [
        DitheringAlgorithm::Threshold,
        DitheringAlgorithm::Bayer,
        DitheringAlgorithm::FloydSteinberg,
        DitheringAlgorithm::Atkinson,
    ];

    /// Deterministic non-uniform test image.
    fn gradient(width: u32, height: u32) -> Vec<u8> {
        (0..width as usize * height as usize)
            .map(|i| (i * 257 % 256) as u8)
            .collect()
    }

    #[test]
    fn test_bayer_matrix_is_a_permutation() {
        let mut seen = [false; 64];
        for row in &BAYER8 {
            for &val in row {
                assert!(val < 64, "matrix value {} out of range", val);
                assert!(!seen[val as usize], "duplicate value {}", val);
                seen[val as usize] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_all_white_yields_blank_bitmap() {
        let luma = vec![255u8; 24 * 10];
        for algorithm in ALL_ALGORITHMS {
            let bitmap = dither(&luma, 24, 10, algorithm, DEFAULT_THRESHOLD);
            assert_eq!(bitmap.data.len(), 3 * 10);
            assert!(
                bitmap.data.iter().all(|&b| b == 0x00),
                "{:?} printed dots on white",
                algorithm
            );
        }
    }

    #[test]
    fn test_all_black_yields_solid_bitmap() {
        let luma = vec![0u8; 24 * 10];
        for algorithm in ALL_ALGORITHMS {
            let bitmap = dither(&luma, 24, 10, algorithm, DEFAULT_THRESHOLD);
            assert!(
                bitmap.data.iter().all(|&b| b == 0xFF),
                "{:?} left blanks on black",
                algorithm
            );
        }
    }

    #[test]
    fn test_all_black_padded_width() {
        // 4-pixel rows: the high nibble carries pixels, the low nibble pads.
        let luma = vec![0u8; 4 * 3];
        for algorithm in ALL_ALGORITHMS {
            let bitmap = dither(&luma, 4, 3, algorithm, DEFAULT_THRESHOLD);
            assert_eq!(bitmap.data, vec![0xF0, 0xF0, 0xF0], "{:?}", algorithm);
        }
    }

    #[test]
    fn test_threshold_cutoff_is_strict() {
        // Dark strictly below the cutoff; the cutoff itself stays blank.
        let luma = [127u8, 128, 129];
        let bitmap = dither(&luma, 3, 1, DitheringAlgorithm::Threshold, 128);
        assert_eq!(bitmap.data, vec![0b1000_0000]);
    }

    #[test]
    fn test_threshold_override_moves_the_cutoff() {
        let luma = [100u8, 150, 200];
        let low = dither(&luma, 3, 1, DitheringAlgorithm::Threshold, 101);
        assert_eq!(low.data, vec![0b1000_0000]);
        let high = dither(&luma, 3, 1, DitheringAlgorithm::Threshold, 201);
        assert_eq!(high.data, vec![0b1110_0000]);
    }

    #[test]
    fn test_bayer_mid_gray_is_half_dark() {
        // Mid gray against the full 8x8 tile lands exactly half the dots.
        let luma = vec![128u8; 8 * 8];
        let bitmap = dither(&luma, 8, 8, DitheringAlgorithm::Bayer, DEFAULT_THRESHOLD);
        let dots: u32 = bitmap.data.iter().map(|b| b.count_ones()).sum();
        assert_eq!(dots, 32);
    }

    #[test]
    fn test_bayer_tiles_every_8_pixels() {
        let luma = vec![128u8; 16 * 16];
        let bitmap = dither(&luma, 16, 16, DitheringAlgorithm::Bayer, DEFAULT_THRESHOLD);
        // Each row is two identical bytes; rows repeat after 8.
        for y in 0..16 {
            assert_eq!(bitmap.data[y * 2], bitmap.data[y * 2 + 1]);
        }
        assert_eq!(&bitmap.data[..16], &bitmap.data[16..]);
    }

    #[test]
    fn test_floyd_steinberg_mid_gray_row() {
        // Hand-computed: 128 quantizes white (err -127), pushing the next
        // pixel to 73 (dark), then 159 (white), then 86 (dark).
        let luma = [128u8; 4];
        let bitmap = dither(
            &luma,
            4,
            1,
            DitheringAlgorithm::FloydSteinberg,
            DEFAULT_THRESHOLD,
        );
        assert_eq!(bitmap.data, vec![0b0101_0000]);
    }

    #[test]
    fn test_atkinson_mid_gray_row() {
        // Hand-computed: white (err -15 to x+1 and x+2), dark at 113,
        // dark at 127, white at 157.
        let luma = [128u8; 4];
        let bitmap = dither(&luma, 4, 1, DitheringAlgorithm::Atkinson, DEFAULT_THRESHOLD);
        assert_eq!(bitmap.data, vec![0b0110_0000]);
    }

    #[test]
    fn test_diffusion_is_deterministic() {
        let luma = gradient(37, 23);
        for algorithm in [
            DitheringAlgorithm::FloydSteinberg,
            DitheringAlgorithm::Atkinson,
        ] {
            let first = dither(&luma, 37, 23, algorithm, DEFAULT_THRESHOLD);
            let second = dither(&luma, 37, 23, algorithm, DEFAULT_THRESHOLD);
            assert_eq!(first, second, "{:?}", algorithm);
        }
    }

    #[test]
    fn test_diffusion_preserves_average_tone() {
        // A large 25%-gray field should print roughly a quarter of its dots
        // once diffusion spreads the error around.
        let luma = vec![191u8; 64 * 64];
        let bitmap = dither(
            &luma,
            64,
            64,
            DitheringAlgorithm::FloydSteinberg,
            DEFAULT_THRESHOLD,
        );
        let dots: u32 = bitmap.data.iter().map(|b| b.count_ones()).sum();
        let total = 64 * 64;
        assert!(
            dots > total / 5 && dots < total / 3,
            "expected about 25% dots, got {}/{}",
            dots,
            total
        );
    }

    #[test]
    fn test_bitmap_row_bytes() {
        let bitmap = dither(&[0u8; 9], 9, 1, DitheringAlgorithm::Threshold, 128);
        assert_eq!(bitmap.row_bytes(), 2);
        assert_eq!(bitmap.data, vec![0xFF, 0x80]);
    }

    #[test]
    fn test_pack_row_empty() {
        assert_eq!(pack_row(&[]), Vec::<u8>::new());
    }

    #[test]
    fn test_pack_row_msb_first() {
        assert_eq!(pack_row(&[true; 8]), vec![0xFF]);
        assert_eq!(pack_row(&[false; 8]), vec![0x00]);
        assert_eq!(
            pack_row(&[true, false, true, false, true, false, true, false]),
            vec![0xAA]
        );
        let nine = pack_row(&[true; 9]);
        assert_eq!(nine, vec![0xFF, 0x80]);
    }

    #[test]
    fn test_default_algorithm() {
        assert_eq!(
            DitheringAlgorithm::default(),
            DitheringAlgorithm::Threshold
        );
    }
}
