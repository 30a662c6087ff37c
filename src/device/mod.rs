//! # Device Locator
//!
//! Finds the one attached printer a job should talk to.
//!
//! ## Matching
//!
//! A device matches a serial number when:
//!
//! 1. its device class is 0 ("defined per interface", i.e. composite), **or**
//!    any of its configurations has an interface of class 0, **and**
//! 2. its iSerialNumber string equals the target exactly.
//!
//! Descriptor read errors count as "no match". They are never raised.
//!
//! ```
//! use labelpress::device::{DeviceDescriptor, matches_serial};
//!
//! let dev = DeviceDescriptor::new("1-4", 0x04b8, 0x0202, 0, Some("X5E1234"));
//! assert!(matches_serial("X5E1234")(&dev));
//! assert!(!matches_serial("X5E9999")(&dev));
//! ```
//!
//! ## Discovery
//!
//! [`locate`] polls a [`DeviceSource`] every [`POLL_INTERVAL`] until a match
//! appears or the timeout runs out. At least one enumeration always happens.

use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use crate::error::LabelError;
use crate::printer::PrinterProfile;
use crate::transport::Transport;

/// `bDeviceClass` / `bInterfaceClass` meaning "see the interfaces".
pub const COMPOSITE_CLASS: u8 = 0;

/// Delay between enumerations while waiting for a device.
pub const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// What the locator knows about one attached device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescriptor {
    /// Backend-specific identity (bus/address for USB)
    pub id: String,
    pub vendor_id: u16,
    pub product_id: u16,
    pub device_class: u8,
    /// Interface classes, one list per configuration
    pub configurations: Vec<Vec<u8>>,
    /// iSerialNumber; `Err` when the string descriptor could not be read
    pub serial: Result<Option<String>, String>,
}

impl DeviceDescriptor {
    pub fn new(id: &str, vendor_id: u16, product_id: u16, device_class: u8, serial: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            vendor_id,
            product_id,
            device_class,
            configurations: Vec::new(),
            serial: Ok(serial.map(str::to_string)),
        }
    }

    pub fn with_configuration(mut self, interface_classes: &[u8]) -> Self {
        self.configurations.push(interface_classes.to_vec());
        self
    }

    pub fn with_serial_error(mut self, message: &str) -> Self {
        self.serial = Err(message.to_string());
        self
    }

    pub fn serial_string(&self) -> Option<String> {
        self.serial.as_ref().ok().cloned().flatten()
    }

    fn has_composite_class(&self) -> bool {
        self.device_class == COMPOSITE_CLASS
            || self
                .configurations
                .iter()
                .any(|cfg| cfg.contains(&COMPOSITE_CLASS))
    }
}

/// Build the match predicate for a serial number.
pub fn matches_serial(serial: &str) -> impl Fn(&DeviceDescriptor) -> bool + '_ {
    move |device: &DeviceDescriptor| {
        if !device.has_composite_class() {
            return false;
        }
        match &device.serial {
            Ok(Some(found)) => found == serial,
            Ok(None) => false,
            Err(e) => {
                debug!(device = %device.id, error = %e, "serial read failed, skipping");
                false
            }
        }
    }
}

/// Why a printer could not be opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenFailure {
    NotFound { serial: String },
    Busy { serial: String },
    Io(String),
}

impl From<OpenFailure> for LabelError {
    fn from(failure: OpenFailure) -> Self {
        match failure {
            OpenFailure::NotFound { serial } => LabelError::DeviceNotFound { serial },
            OpenFailure::Busy { serial } => LabelError::DeviceBusy { serial },
            OpenFailure::Io(message) => LabelError::Transport(message),
        }
    }
}

/// A bus that can list and open devices.
pub trait DeviceSource {
    type Transport: Transport;

    fn enumerate(&mut self) -> Result<Vec<DeviceDescriptor>, String>;

    fn open(&mut self, device: &DeviceDescriptor) -> Result<Self::Transport, OpenFailure>;
}

/// Poll `source` for a device with the profile's ids and serial.
pub fn locate<S: DeviceSource>(
    source: &mut S,
    profile: &PrinterProfile,
    timeout: Duration,
) -> Option<DeviceDescriptor> {
    let started = Instant::now();
    let is_target = matches_serial(&profile.serial_number);

    loop {
        match source.enumerate() {
            Ok(devices) => {
                let found = devices.into_iter().find(|d| {
                    d.vendor_id == profile.vendor_id && d.product_id == profile.product_id && is_target(d)
                });
                if found.is_some() {
                    return found;
                }
            }
            Err(e) => warn!(error = %e, "device enumeration failed"),
        }

        let elapsed = started.elapsed();
        if elapsed >= timeout {
            return None;
        }
        thread::sleep(POLL_INTERVAL.min(timeout - elapsed));
    }
}

/// Locate and open the profile's printer. Failures are logged and returned.
pub fn open_device<S: DeviceSource>(
    source: &mut S,
    profile: &PrinterProfile,
    timeout: Duration,
) -> Result<S::Transport, OpenFailure> {
    let Some(device) = locate(source, profile, timeout) else {
        error!(
            serial = %profile.serial_number,
            vendor_id = %format!("{:04x}", profile.vendor_id),
            product_id = %format!("{:04x}", profile.product_id),
            "printer not found"
        );
        return Err(OpenFailure::NotFound {
            serial: profile.serial_number.clone(),
        });
    };

    match source.open(&device) {
        Ok(transport) => {
            info!(serial = %profile.serial_number, device = %device.id, name = %profile.display_name, role = %profile.role, "printer opened");
            Ok(transport)
        }
        Err(failure) => {
            error!(serial = %profile.serial_number, ?failure, "failed to open printer");
            Err(failure)
        }
    }
}
