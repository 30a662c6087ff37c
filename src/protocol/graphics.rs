//! # ESC/POS Raster Graphics
//!
//! This module implements the raster bit-image command used to print
//! rendered label bitmaps.
//!
//! ## Bit Packing
//!
//! Graphics data is packed as bytes where each bit represents one dot:
//! - Bit 7 (MSB) = leftmost dot
//! - Bit 0 (LSB) = rightmost dot
//! - 1 = black (print), 0 = white (no print)
//!
//! ```text
//! Byte value 0xF0 = 11110000 = ████░░░░
//! Byte value 0x0F = 00001111 = ░░░░████
//! ```
//!
//! ## Chunking
//!
//! Printer receive buffers are small. Tall bitmaps are split into bands of
//! at most [`MAX_CHUNK_ROWS`] rows, each sent as its own `GS v 0` command;
//! the bands print flush against each other.

use super::commands::{GS, u16_le};

/// Maximum rows per `GS v 0` command.
pub const MAX_CHUNK_ROWS: usize = 256;

/// # Print Raster Bit Image (GS v 0 m xL xH yL yH d1...dk)
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | GS v 0 m xL xH yL yH d1...dk |
/// | Hex     | 1D 76 30 m xL xH yL yH d1...dk |
/// | Decimal | 29 118 48 m xL xH yL yH d1...dk |
///
/// ## Parameters
///
/// - `m`: Scale mode (0 = normal density)
/// - `xL, xH`: Width in **bytes**, little-endian
/// - `yL, yH`: Height in dots, little-endian
/// - `d1...dk`: Image data, k = width_bytes × height
///
/// ## Example
///
/// ```
/// use labelpress::protocol::graphics;
///
/// let data = vec![0xAA; 72 * 100];
/// let cmd = graphics::raster(576, 100, &data);
///
/// assert_eq!(&cmd[0..4], &[0x1D, 0x76, 0x30, 0x00]);
/// assert_eq!(cmd[4], 72);  // xL
/// assert_eq!(cmd[6], 100); // yL
/// assert_eq!(cmd.len(), 8 + 72 * 100);
/// ```
pub fn raster(width_dots: u16, height: u16, data: &[u8]) -> Vec<u8> {
    let width_bytes = width_dots.div_ceil(8);
    let expected_len = width_bytes as usize * height as usize;

    debug_assert!(
        data.len() == expected_len,
        "Raster data length mismatch. Expected {} ({} bytes × {} rows), got {}",
        expected_len,
        width_bytes,
        height,
        data.len()
    );

    let [xl, xh] = u16_le(width_bytes);
    let [yl, yh] = u16_le(height);

    let mut cmd = Vec::with_capacity(8 + data.len());
    cmd.extend_from_slice(&[GS, b'v', b'0', 0, xl, xh, yl, yh]);
    cmd.extend_from_slice(data);
    cmd
}

/// Split a packed image into `GS v 0` commands of at most `MAX_CHUNK_ROWS`.
///
/// ```
/// use labelpress::protocol::graphics;
///
/// let data = vec![0u8; 72 * 600];
/// let chunks = graphics::raster_chunks(576, 600, &data);
/// assert_eq!(chunks.len(), 3); // 256 + 256 + 88
/// ```
pub fn raster_chunks(width_dots: u16, height: usize, data: &[u8]) -> Vec<Vec<u8>> {
    let width_bytes = width_dots.div_ceil(8) as usize;
    let mut chunks = Vec::with_capacity(height.div_ceil(MAX_CHUNK_ROWS));

    for chunk_start in (0..height).step_by(MAX_CHUNK_ROWS) {
        let chunk_end = (chunk_start + MAX_CHUNK_ROWS).min(height);
        let rows = &data[chunk_start * width_bytes..chunk_end * width_bytes];
        chunks.push(raster(width_dots, (chunk_end - chunk_start) as u16, rows));
    }

    chunks
}

// ============================================================================
// TESTS
// ============================================================================
