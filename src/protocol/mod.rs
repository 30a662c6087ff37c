//! # ESC/POS Protocol Implementation
//!
//! Low-level command builders for ESC/POS thermal printers. Every builder is
//! a pure function returning the bytes to send; sequencing and pacing belong
//! to [`crate::session`].
//!
//! ## Module Structure
//!
//! - [`commands`]: Initialize, feed, cut
//! - [`text`]: Alignment, print mode (size), bold, underline, inverse
//! - [`graphics`]: Raster bit images (`GS v 0`)
//! - [`cp437`]: Text encoding
//!
//! ## Usage Example
//!
//! ```
//! use labelpress::protocol::{commands, text, cp437};
//! use labelpress::protocol::text::{Alignment, TextSize};
//!
//! let mut data = Vec::new();
//! data.extend(commands::init());
//! data.extend(text::align(Alignment::Center));
//! data.extend(text::print_mode(TextSize::DoubleWidth));
//! data.extend(cp437::encode("PANTRY\n"));
//! data.extend(text::size_normal());
//! data.extend(commands::cut_full_feed());
//! ```

pub mod commands;
pub mod cp437;
pub mod graphics;
pub mod text;
