//! # Printer Session
//!
//! [`PrinterSession`] owns one open transport for the length of one job and
//! sequences everything written to it.
//!
//! ## Job Shape
//!
//! ```text
//! reset()   ESC @ · settle×2 · ESC ! 0, GS B 0, ESC E 0, ESC - 0 · settle×2
//! content   mode changes separated by settle delays, text, images
//! finish()  ESC ! 0, GS B 0 · settle×3 · LF LF · ESC d 6, GS V 0 · settle×3 · close
//! ```
//!
//! Print modes persist in the printer across jobs, so both ends of a job
//! reset them. `finish` consumes the session: the only way to end a job is
//! reset, cut, settle, close, in that order.
//!
//! ## Settle Delay
//!
//! Some models (TM-L90) drop mode changes that arrive back to back or right
//! before text. Every mode change is preceded by a settle delay, and the
//! first text after a mode change waits one more. The delay comes from
//! configuration; tests use zero or a capture transport that records it.

use std::time::Duration;

use tracing::{debug, warn};

use crate::error::LabelResult;
use crate::protocol::commands;
use crate::protocol::cp437;
use crate::protocol::text::{self, Alignment, TextSize};
use crate::raster::Bitmap;
use crate::transport::Transport;

pub struct PrinterSession<T: Transport> {
    transport: T,
    settle: Duration,
    unsettled: bool,
    bytes_written: usize,
}

impl<T: Transport> PrinterSession<T> {
    /// Wrap an open transport. Nothing is written until [`Self::reset`].
    pub fn new(transport: T, settle: Duration) -> Self {
        Self {
            transport,
            settle,
            unsettled: false,
            bytes_written: 0,
        }
    }

    /// Initialize the printer and clear every text mode.
    pub fn reset(&mut self) -> LabelResult<()> {
        self.write_raw(&commands::init())?;
        self.transport.pause(self.settle * 2);
        self.write_raw(&text::reset_modes())?;
        self.transport.pause(self.settle * 2);
        Ok(())
    }

    pub fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    /// Bytes straight to the device, no pacing.
    pub fn write_raw(&mut self, data: &[u8]) -> LabelResult<()> {
        self.transport.write_all(data)?;
        self.bytes_written += data.len();
        Ok(())
    }

    fn settle(&mut self) {
        self.transport.pause(self.settle);
        self.unsettled = false;
    }

    fn mode(&mut self, command: Vec<u8>) -> LabelResult<()> {
        self.settle();
        self.write_raw(&command)?;
        self.unsettled = true;
        Ok(())
    }

    pub fn set_alignment(&mut self, alignment: Alignment) -> LabelResult<()> {
        self.mode(text::align(alignment))
    }

    pub fn set_text_size(&mut self, size: TextSize) -> LabelResult<()> {
        self.mode(text::print_mode(size))
    }

    pub fn set_inverse(&mut self, enabled: bool) -> LabelResult<()> {
        self.mode(text::inverse(enabled))
    }

    pub fn set_bold(&mut self, enabled: bool) -> LabelResult<()> {
        self.mode(text::bold(enabled))
    }

    /// Text in code page 437.
    pub fn write_text(&mut self, s: &str) -> LabelResult<()> {
        if self.unsettled {
            self.settle();
        }
        self.write_raw(&cp437::encode(s))
    }

    pub fn write_line(&mut self, s: &str) -> LabelResult<()> {
        self.write_text(s)?;
        self.write_text("\n")
    }

    /// Print a bitmap centered, then return to left alignment. Never cuts.
    pub fn print_image(&mut self, bitmap: &Bitmap) -> LabelResult<()> {
        let raster = bitmap.to_raster()?;
        self.set_alignment(Alignment::Center)?;
        self.settle();
        for band in raster.commands() {
            self.write_raw(&band)?;
        }
        debug!(
            width = raster.width_dots,
            height = raster.height,
            halftone = bitmap.is_halftone(),
            "image sent"
        );
        self.set_alignment(Alignment::Left)
    }

    /// Clear size, inverse and bold before plain text.
    pub fn reset_text_mode(&mut self) -> LabelResult<()> {
        self.set_text_size(TextSize::Normal)?;
        self.set_inverse(false)?;
        self.set_bold(false)
    }

    fn cut(&mut self) -> LabelResult<()> {
        self.write_raw(&commands::cut_full_feed())
    }

    /// End the job: reset, cut, settle, close.
    ///
    /// Each step runs even if an earlier write failed; the first error is
    /// returned after the transport is closed.
    pub fn finish(mut self) -> LabelResult<()> {
        let settle = self.settle;
        let mut first_error = None;
        let mut step = |result: LabelResult<()>| {
            if let Err(e) = result {
                warn!(error = %e, "finish step failed");
                first_error.get_or_insert(e);
            }
        };

        step(self.write_raw(&text::size_normal()));
        step(self.write_raw(&text::inverse(false)));
        self.transport.pause(settle * 3);
        step(self.write_raw(b"\n\n"));
        step(self.cut());
        self.transport.pause(settle * 3);
        step(self.transport.close());

        debug!(bytes = self.bytes_written, "session closed");
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
