//! # ESC/POS Text Styling Commands
//!
//! This module implements the text formatting commands used by the
//! direct-text rendering path.
//!
//! ## Text Styling Overview
//!
//! | Style | Command | Effect |
//! |-------|---------|--------|
//! | Alignment | ESC a n | Left / center / right |
//! | Print mode | ESC ! n | Character size (width/height doubling) |
//! | Bold | ESC E n | **Emphasized** text |
//! | Underline | ESC - n | Underlined text |
//! | Inverse | GS B n | White on black |
//!
//! ## Character Budget
//!
//! Double-width characters occupy two columns, so a line that holds
//! `columns` normal characters holds only `columns / 2` doubled ones.
//! [`TextSize::budget`] is the single place that arithmetic lives.
//!
//! ```text
//! Normal (32 cols)   |Large Coffee with oat milk      |
//! Double width (16)  |L a r g e   C o f f e e         |
//! ```

use super::commands::{ESC, GS};

// ============================================================================
// TEXT ALIGNMENT
// ============================================================================

/// Text alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left = 0,
    Center = 1,
    Right = 2,
}

/// # Set Justification (ESC a n)
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC a n |
/// | Hex     | 1B 61 n |
/// | Decimal | 27 97 n |
///
/// Takes effect at the start of the next line; also positions raster images.
///
/// ## Example
///
/// ```
/// use labelpress::protocol::text::{align, Alignment};
///
/// assert_eq!(align(Alignment::Center), vec![0x1B, 0x61, 0x01]);
/// ```
pub fn align(alignment: Alignment) -> Vec<u8> {
    vec![ESC, b'a', alignment as u8]
}

// ============================================================================
// CHARACTER SIZE
// ============================================================================

/// Character sizes reachable through `ESC !`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextSize {
    #[default]
    Normal,
    DoubleWidth,
    DoubleHeightWidth,
}

impl TextSize {
    /// `ESC !` mode bits for this size.
    ///
    /// | Bit | Meaning |
    /// |-----|---------|
    /// | 4 (0x10) | double height |
    /// | 5 (0x20) | double width |
    pub fn mode_bits(self) -> u8 {
        match self {
            TextSize::Normal => 0x00,
            TextSize::DoubleWidth => 0x20,
            TextSize::DoubleHeightWidth => 0x30,
        }
    }

    /// Horizontal multiplier applied to every glyph.
    pub fn width_multiplier(self) -> usize {
        match self {
            TextSize::Normal => 1,
            TextSize::DoubleWidth | TextSize::DoubleHeightWidth => 2,
        }
    }

    /// Characters per line at this size, given the normal-width column count.
    ///
    /// ```
    /// use labelpress::protocol::text::TextSize;
    ///
    /// assert_eq!(TextSize::Normal.budget(32), 32);
    /// assert_eq!(TextSize::DoubleWidth.budget(32), 16);
    /// ```
    pub fn budget(self, columns: usize) -> usize {
        columns / self.width_multiplier()
    }
}

/// # Select Print Mode (ESC ! n)
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC ! n |
/// | Hex     | 1B 21 n |
/// | Decimal | 27 33 n |
///
/// `n = 0` also selects font A and clears bold/underline set through this
/// command, which is why it doubles as the "font/size reset".
///
/// ## Example
///
/// ```
/// use labelpress::protocol::text::{print_mode, TextSize};
///
/// assert_eq!(print_mode(TextSize::DoubleHeightWidth), vec![0x1B, 0x21, 0x30]);
/// ```
pub fn print_mode(size: TextSize) -> Vec<u8> {
    vec![ESC, b'!', size.mode_bits()]
}

/// Reset font and size (ESC ! 0)
#[inline]
pub fn size_normal() -> Vec<u8> {
    print_mode(TextSize::Normal)
}

// ============================================================================
// EMPHASIS
// ============================================================================

/// # Turn Emphasized Mode On/Off (ESC E n)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC E n |
/// | Hex     | 1B 45 n |
pub fn bold(enabled: bool) -> Vec<u8> {
    vec![ESC, b'E', enabled as u8]
}

/// # Turn Underline Mode On/Off (ESC - n)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC - n |
/// | Hex     | 1B 2D n |
///
/// `n = 1` is a 1-dot underline, `n = 2` a 2-dot underline.
pub fn underline(enabled: bool) -> Vec<u8> {
    vec![ESC, b'-', enabled as u8]
}

/// # Turn White/Black Reverse Printing On/Off (GS B n)
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | GS B n |
/// | Hex     | 1D 42 n |
///
/// ## Effect
///
/// ```text
/// Normal:   TEXT
/// Inverted: ████████
///           ░TEXT░░░
///           ████████
/// ```
pub fn inverse(enabled: bool) -> Vec<u8> {
    vec![GS, b'B', enabled as u8]
}

// ============================================================================
// RESET SEQUENCES
// ============================================================================

/// Clear every text mode a previous job may have left behind.
///
/// Order: font/size, inverse, bold, underline.
pub fn reset_modes() -> Vec<u8> {
    let mut cmds = Vec::with_capacity(12);
    cmds.extend(size_normal());
    cmds.extend(inverse(false));
    cmds.extend(bold(false));
    cmds.extend(underline(false));
    cmds
}

// ============================================================================
// TESTS
// ============================================================================
