//! # ESC/POS Control Commands
//!
//! This module implements the printer-level commands (initialize, feed, cut)
//! of the ESC/POS protocol spoken by Epson TM-series and compatible thermal
//! receipt printers (TM-T20, TM-T88, TM-L90, ...).
//!
//! ## Escape Sequence Structure
//!
//! Commands follow these patterns:
//! - Single byte: `LF`
//! - Two bytes: `ESC @`
//! - Multi-byte with parameters: `ESC d n`, `GS V m`, `GS v 0 m xL xH yL yH d...`
//!
//! ## Byte Order
//!
//! Multi-byte integers use **little-endian** encoding:
//! - `u16` value 0x1234 is sent as bytes `[0x34, 0x12]`
//!
//! ## State
//!
//! Print-mode state (size, bold, inverse, underline) lives in the printer and
//! survives between jobs until `ESC @` or an explicit reset. The session layer
//! relies on this module to clear it at both ends of every job.

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// ESC (Escape) - Command prefix byte
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix
///
/// Used for graphics, cutter and inverse printing.
/// - Hex: 0x1D, Decimal: 29
pub const GS: u8 = 0x1D;

/// LF (Line Feed) - Print buffer and advance one line
pub const LF: u8 = 0x0A;

// ============================================================================
// INITIALIZATION COMMANDS
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// Clears the print buffer and resets print modes to power-on defaults.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ |
/// | Hex     | 1B 40 |
/// | Decimal | 27 64 |
///
/// ## Note
///
/// Some models (TM-L90 among them) need a pause after this command before
/// they accept further mode changes reliably.
///
/// ## Example
///
/// ```
/// use labelpress::protocol::commands;
///
/// assert_eq!(commands::init(), vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn init() -> Vec<u8> {
    vec![ESC, b'@']
}

// ============================================================================
// PAPER FEED COMMANDS
// ============================================================================

/// # Print and Feed n Lines (ESC d n)
///
/// Prints the line buffer and feeds `n` lines at the current line spacing.
///
/// ## Protocol Details
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | ESC d n  |
/// | Hex     | 1B 64 n  |
/// | Decimal | 27 100 n |
///
/// ## Example
///
/// ```
/// use labelpress::protocol::commands;
///
/// assert_eq!(commands::feed_lines(6), vec![0x1B, 0x64, 6]);
/// ```
#[inline]
pub fn feed_lines(n: u8) -> Vec<u8> {
    vec![ESC, b'd', n]
}

// ============================================================================
// CUTTER CONTROL COMMANDS
// ============================================================================

/// Lines fed before cutting so the last printed line clears the blade.
pub const CUT_FEED_LINES: u8 = 6;

/// # Full Cut (GS V 0)
///
/// Cuts the paper completely at the current position.
///
/// ## Protocol Details
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | GS V 0   |
/// | Hex     | 1D 56 00 |
/// | Decimal | 29 86 0  |
#[inline]
pub fn cut_full() -> Vec<u8> {
    vec![GS, b'V', 0]
}

/// # Feed to Cut Position, Then Full Cut
///
/// Feeds [`CUT_FEED_LINES`] lines and issues a full cut. This is the
/// sequence every finished job ends with.
///
/// ```
/// use labelpress::protocol::commands;
///
/// assert_eq!(
///     commands::cut_full_feed(),
///     vec![0x1B, 0x64, 6, 0x1D, 0x56, 0x00]
/// );
/// ```
pub fn cut_full_feed() -> Vec<u8> {
    let mut cmd = feed_lines(CUT_FEED_LINES);
    cmd.extend(cut_full());
    cmd
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Encode a u16 value as little-endian bytes [low, high]
///
/// ```
/// use labelpress::protocol::commands::u16_le;
///
/// assert_eq!(u16_le(0x1234), [0x34, 0x12]);
/// assert_eq!(u16_le(576), [0x40, 0x02]);
/// ```
#[inline]
pub const fn u16_le(value: u16) -> [u8; 2] {
    [value as u8, (value >> 8) as u8]
}

// ============================================================================
// TESTS
// ============================================================================
