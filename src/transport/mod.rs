//! # Printer Transport Layer
//!
//! A [`Transport`] moves bytes to one open printer. The session layer owns
//! exactly one and is its only writer.
//!
//! ## Available Transports
//!
//! - [`usb`]: Bulk OUT transfers through `nusb` (feature `usb`)
//! - [`capture`]: In-memory recorder for tests and `--dry-run`
//!
//! Settle delays go through [`Transport::pause`] rather than a bare sleep so
//! the capture backend can record them instead of waiting.

pub mod capture;
#[cfg(feature = "usb")]
pub mod usb;

pub use capture::{CaptureSource, CaptureTransport, Event};
#[cfg(feature = "usb")]
pub use usb::{UsbSource, UsbTransport};

use std::thread;
use std::time::Duration;

use crate::error::LabelResult;

pub trait Transport {
    /// Send `data` in order. Blocks until the device accepted it.
    fn write_all(&mut self, data: &[u8]) -> LabelResult<()>;

    /// Wait for the printer to settle.
    fn pause(&mut self, duration: Duration) {
        if !duration.is_zero() {
            thread::sleep(duration);
        }
    }

    /// Release the device. Further writes fail.
    fn close(&mut self) -> LabelResult<()>;
}
