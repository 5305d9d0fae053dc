//! # ESC/POS Raster Graphics
//!
//! The raster bit-image command (`GS v 0`) prints a packed monochrome
//! bitmap of arbitrary height in one shot.
//!
//! ## Bit Packing
//!
//! Each data byte covers 8 horizontal dots:
//! - Bit 7 (MSB) = leftmost dot
//! - Bit 0 (LSB) = rightmost dot
//! - 1 = black (print), 0 = white (no print)
//!
//! ```text
//! Byte value 0xF0 = 11110000 = ████░░░░
//! Byte value 0xAA = 10101010 = █░█░█░█░
//! ```
//!
//! Rows whose pixel width is not a multiple of 8 pad the last byte with
//! white on the right; the width field counts whole bytes.

use super::commands::{GS, u16_le};

/// # Print Raster Bit Image (GS v 0 m xL xH yL yH d1..dk)
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | Hex     | 1D 76 30 00 xL xH yL yH d1..dk |
/// | Decimal | 29 118 48 0 xL xH yL yH d1..dk |
///
/// ## Parameters
///
/// - `m = 0`: normal density
/// - `xL, xH`: width in *bytes*, little-endian
/// - `yL, yH`: height in dots, little-endian
/// - `d1..dk`: row-major packed rows, k = width_bytes x height
///
/// `width_dots` is rounded up to whole bytes; `data` must already be padded
/// to that byte width per row.
///
/// ## Example
///
/// ```
/// use boleta::protocol::graphics;
///
/// // A 16-dot wide (2 bytes), 3-row checker pattern
/// let data = vec![0xAA, 0xAA, 0x55, 0x55, 0xAA, 0xAA];
/// let cmd = graphics::raster(16, 3, &data);
///
/// assert_eq!(&cmd[..8], &[0x1D, 0x76, 0x30, 0x00, 2, 0, 3, 0]);
/// assert_eq!(cmd.len(), 8 + 6);
/// ```
pub fn raster(width_dots: u16, height: u16, data: &[u8]) -> Vec<u8> {
    let width_bytes = width_dots.div_ceil(8);
    let expected_len = width_bytes as usize * height as usize;
    debug_assert!(
        data.len() == expected_len,
        "raster data length mismatch: expected {} ({} bytes x {} rows), got {}",
        expected_len,
        width_bytes,
        height,
        data.len()
    );

    let [xl, xh] = u16_le(width_bytes);
    let [yl, yh] = u16_le(height);

    let mut cmd = Vec::with_capacity(8 + data.len());
    cmd.push(GS);
    cmd.push(b'v');
    cmd.push(b'0');
    cmd.push(0x00); // m = normal density
    cmd.push(xl);
    cmd.push(xh);
    cmd.push(yl);
    cmd.push(yh);
    cmd.extend_from_slice(data);
    cmd
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_header() {
        let data = vec![0xFF; 48 * 100];
        let cmd = raster(384, 100, &data);

        assert_eq!(cmd[0], 0x1D); // GS
        assert_eq!(cmd[1], 0x76); // 'v'
        assert_eq!(cmd[2], 0x30); // '0'
        assert_eq!(cmd[3], 0x00); // m = normal density
        assert_eq!(cmd[4], 48); // xL (384/8)
        assert_eq!(cmd[5], 0); // xH
        assert_eq!(cmd[6], 100); // yL
        assert_eq!(cmd[7], 0); // yH
    }

    #[test]
    fn test_raster_large_height_little_endian() {
        let height: u16 = 500;
        let data = vec![0xFF; 48 * height as usize];
        let cmd = raster(384, height, &data);

        // 500 = 0x01F4
        assert_eq!(cmd[6], 0xF4);
        assert_eq!(cmd[7], 0x01);
    }

    #[test]
    fn test_raster_width_rounds_up_to_bytes() {
        // 12 dots round up to 2 bytes per row.
        let data = vec![0xFF; 2 * 10];
        let cmd = raster(12, 10, &data);

        assert_eq!(cmd[4], 2);
        assert_eq!(cmd[5], 0);
    }

    #[test]
    fn test_raster_preserves_data() {
        let data: Vec<u8> = (0..48 * 50).map(|i| (i % 256) as u8).collect();
        let cmd = raster(384, 50, &data);

        assert_eq!(cmd.len(), 8 + data.len());
        assert_eq!(&cmd[8..], &data[..]);
    }
}
