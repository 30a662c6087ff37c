//! In-memory transport.
//!
//! [`CaptureTransport`] records every write, pause and close as an
//! [`Event`]. Clones share one log, so a test can keep a handle while the
//! session owns another. [`CaptureSource`] puts synthetic devices on a
//! pretend bus for the locator.
//!
//! ```
//! use labelpress::transport::{CaptureTransport, Event, Transport};
//!
//! let mut t = CaptureTransport::new();
//! let probe = t.clone();
//! t.write_all(b"hi").unwrap();
//! t.close().unwrap();
//! assert_eq!(probe.events(), vec![Event::Bytes(b"hi".to_vec()), Event::Close]);
//! ```

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::device::{DeviceDescriptor, DeviceSource, OpenFailure};
use crate::error::{LabelError, LabelResult};
use crate::protocol::commands;

use super::Transport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Bytes(Vec<u8>),
    Pause(Duration),
    Close,
}

#[derive(Debug, Default)]
struct CaptureLog {
    events: Vec<Event>,
    fail_on: Option<Vec<u8>>,
    panic_on: Option<Vec<u8>>,
    closed: bool,
}

#[derive(Debug, Clone, Default)]
pub struct CaptureTransport {
    log: Arc<Mutex<CaptureLog>>,
}

impl CaptureTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn log(&self) -> MutexGuard<'_, CaptureLog> {
        self.log.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Fail the next write whose data contains `needle`. One shot.
    pub fn fail_write_containing(&self, needle: &[u8]) {
        self.log().fail_on = Some(needle.to_vec());
    }

    /// Panic inside the next write whose data contains `needle`. One shot.
    pub fn panic_write_containing(&self, needle: &[u8]) {
        self.log().panic_on = Some(needle.to_vec());
    }

    pub fn events(&self) -> Vec<Event> {
        self.log().events.clone()
    }

    /// Every byte written, in order.
    pub fn bytes(&self) -> Vec<u8> {
        self.log()
            .events
            .iter()
            .filter_map(|e| match e {
                Event::Bytes(b) => Some(b.as_slice()),
                _ => None,
            })
            .flatten()
            .copied()
            .collect()
    }

    /// Number of full-cut commands written.
    pub fn cut_count(&self) -> usize {
        let cut = commands::cut_full();
        self.log()
            .events
            .iter()
            .filter(|e| matches!(e, Event::Bytes(b) if b.windows(cut.len()).any(|w| w == cut)))
            .count()
    }

    pub fn is_closed(&self) -> bool {
        self.log().closed
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|w| w == needle)
}

impl Transport for CaptureTransport {
    fn write_all(&mut self, data: &[u8]) -> LabelResult<()> {
        let mut log = self.log();
        if log.closed {
            return Err(LabelError::Transport("write after close".into()));
        }
        if log.panic_on.as_deref().is_some_and(|n| contains(data, n)) {
            log.panic_on = None;
            drop(log);
            panic!("injected panic during write");
        }
        if log.fail_on.as_deref().is_some_and(|n| contains(data, n)) {
            log.fail_on = None;
            return Err(LabelError::Transport("injected write failure".into()));
        }
        log.events.push(Event::Bytes(data.to_vec()));
        Ok(())
    }

    fn pause(&mut self, duration: Duration) {
        if !duration.is_zero() {
            self.log().events.push(Event::Pause(duration));
        }
    }

    fn close(&mut self) -> LabelResult<()> {
        let mut log = self.log();
        log.closed = true;
        log.events.push(Event::Close);
        Ok(())
    }
}

/// Synthetic bus for the locator.
#[derive(Debug, Default)]
pub struct CaptureSource {
    devices: Vec<DeviceDescriptor>,
    busy: BTreeSet<String>,
    enumerate_error: Option<String>,
    transport: CaptureTransport,
    pub enumerations: usize,
}

impl CaptureSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_device(mut self, device: DeviceDescriptor) -> Self {
        self.devices.push(device);
        self
    }

    /// Opening the device with this id reports busy.
    pub fn with_busy(mut self, id: &str) -> Self {
        self.busy.insert(id.to_string());
        self
    }

    pub fn with_enumerate_error(mut self, message: &str) -> Self {
        self.enumerate_error = Some(message.to_string());
        self
    }

    /// Handle on the transport every successful open returns.
    pub fn transport(&self) -> CaptureTransport {
        self.transport.clone()
    }
}

impl DeviceSource for CaptureSource {
    type Transport = CaptureTransport;

    fn enumerate(&mut self) -> Result<Vec<DeviceDescriptor>, String> {
        self.enumerations += 1;
        match &self.enumerate_error {
            Some(message) => Err(message.clone()),
            None => Ok(self.devices.clone()),
        }
    }

    fn open(&mut self, device: &DeviceDescriptor) -> Result<CaptureTransport, OpenFailure> {
        let serial = device.serial_string().unwrap_or_default();
        if self.busy.contains(&device.id) {
            return Err(OpenFailure::Busy { serial });
        }
        if !self.devices.iter().any(|d| d.id == device.id) {
            return Err(OpenFailure::NotFound { serial });
        }
        Ok(self.transport.clone())
    }
}
