//! # Image Sampling
//!
//! Front half of the image pipeline: bring a caller-supplied image to the
//! exact size it will occupy on the paper and reduce it to the luminance
//! bytes the dither engine consumes.
//!
//! Decoding image files is the caller's problem; anything that already is an
//! [`image::DynamicImage`] works here. Resampling uses nearest-neighbor,
//! chosen over smoothing filters so that already-binary art (logos, line
//! drawings) keeps hard edges instead of growing gray fringes that dither
//! into speckle.
//!
//! Luminance is the perceptual mix 0.299 R + 0.587 G + 0.114 B. Pixels more
//! transparent than half (alpha < 128) sample as white, since blank paper is
//! the printer's transparent.

use image::DynamicImage;
use image::imageops::FilterType;

use crate::error::EncodeError;

/// Largest supported target dimension on either axis. The raster command
/// carries dimensions in two-byte fields.
pub const MAX_DIMENSION: u32 = 65535;

/// Resample `source` to exactly `width` x `height` device pixels and return
/// the row-major luminance bytes (0 = black, 255 = white).
///
/// Fails with [`EncodeError::Validation`] when either dimension is zero or
/// exceeds [`MAX_DIMENSION`].
pub fn luminance_map(
    source: &DynamicImage,
    width: u32,
    height: u32,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::Validation(format!(
            "image target dimensions must be positive, got {}x{}",
            width, height
        )));
    }
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(EncodeError::Validation(format!(
            "image target dimensions must fit in {} dots, got {}x{}",
            MAX_DIMENSION, width, height
        )));
    }

    let resized = source.resize_exact(width, height, FilterType::Nearest);
    let rgba = resized.to_rgba8();

    let mut luma = Vec::with_capacity(width as usize * height as usize);
    for pixel in rgba.pixels() {
        let [r, g, b, a] = pixel.0;
        if a < 128 {
            luma.push(255);
            continue;
        }
        let value = 0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b);
        luma.push(value.round() as u8);
    }
    Ok(luma)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use pretty_assertions::assert_eq;

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba(rgba)))
    }

    #[test]
    fn test_white_samples_to_255() {
        let luma = luminance_map(&solid(4, 2, [255, 255, 255, 255]), 4, 2).unwrap();
        assert_eq!(luma, vec![255u8; 8]);
    }

    #[test]
    fn test_black_samples_to_0() {
        let luma = luminance_map(&solid(4, 2, [0, 0, 0, 255]), 4, 2).unwrap();
        assert_eq!(luma, vec![0u8; 8]);
    }

    #[test]
    fn test_perceptual_channel_weights() {
        let red = luminance_map(&solid(1, 1, [255, 0, 0, 255]), 1, 1).unwrap();
        assert_eq!(red, vec![76]);
        let green = luminance_map(&solid(1, 1, [0, 255, 0, 255]), 1, 1).unwrap();
        assert_eq!(green, vec![150]);
        let blue = luminance_map(&solid(1, 1, [0, 0, 255, 255]), 1, 1).unwrap();
        assert_eq!(blue, vec![29]);
    }

    #[test]
    fn test_transparent_pixels_sample_white() {
        let luma = luminance_map(&solid(2, 2, [0, 0, 0, 0]), 2, 2).unwrap();
        assert_eq!(luma, vec![255u8; 4]);
        // Half alpha is the boundary: 127 is blank paper, 128 is ink.
        let nearly = luminance_map(&solid(1, 1, [0, 0, 0, 127]), 1, 1).unwrap();
        assert_eq!(nearly, vec![255]);
        let opaque_enough = luminance_map(&solid(1, 1, [0, 0, 0, 128]), 1, 1).unwrap();
        assert_eq!(opaque_enough, vec![0]);
    }

    #[test]
    fn test_resamples_to_target_dimensions() {
        let luma = luminance_map(&solid(10, 10, [0, 0, 0, 255]), 3, 7).unwrap();
        assert_eq!(luma.len(), 21);
        assert!(luma.iter().all(|&l| l == 0));
    }

    #[test]
    fn test_upscale_keeps_uniform_value() {
        let luma = luminance_map(&solid(1, 1, [100, 100, 100, 255]), 4, 4).unwrap();
        assert_eq!(luma, vec![100u8; 16]);
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let img = solid(2, 2, [0, 0, 0, 255]);
        let err = luminance_map(&img, 0, 5).unwrap_err();
        assert!(matches!(err, EncodeError::Validation(_)));
        let err = luminance_map(&img, 5, 0).unwrap_err();
        assert!(matches!(err, EncodeError::Validation(_)));
    }

    #[test]
    fn test_oversized_dimension_rejected() {
        let img = solid(2, 2, [0, 0, 0, 255]);
        let err = luminance_map(&img, 65536, 8).unwrap_err();
        assert!(matches!(err, EncodeError::Validation(_)));
    }
}
