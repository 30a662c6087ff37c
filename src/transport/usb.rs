//! # USB Transport
//!
//! Bulk OUT transfers to ESC/POS printers through `nusb`.
//!
//! Receipt printers usually expose a USB Printer class interface
//! (bInterfaceClass = 7). When none is listed, interface 0 is claimed. On
//! Linux the `usblp` kernel driver may hold the interface; it is detached
//! before claiming.
//!
//! ```text
//! nusb::list_devices() ──► DeviceDescriptor ──► locator
//!                                                   │
//!          UsbTransport ◄── claim + bulk OUT ◄──────┘
//! ```

use std::io;

use futures_lite::future::block_on;
use nusb::transfer::{Direction, EndpointType};
use tracing::debug;

use crate::device::{DeviceDescriptor, DeviceSource, OpenFailure};
use crate::error::{LabelError, LabelResult};

use super::Transport;

/// USB Printer class code (bInterfaceClass).
const USB_CLASS_PRINTER: u8 = 7;

fn device_key(info: &nusb::DeviceInfo) -> String {
    format!("{}-{}", info.bus_number(), info.device_address())
}

fn describe(info: &nusb::DeviceInfo) -> DeviceDescriptor {
    DeviceDescriptor {
        id: device_key(info),
        vendor_id: info.vendor_id(),
        product_id: info.product_id(),
        device_class: info.class(),
        configurations: vec![info.interfaces().map(|iface| iface.class()).collect()],
        serial: Ok(info.serial_number().map(str::to_string)),
    }
}

/// The host's USB bus.
#[derive(Default)]
pub struct UsbSource {
    seen: Vec<nusb::DeviceInfo>,
}

impl UsbSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DeviceSource for UsbSource {
    type Transport = UsbTransport;

    fn enumerate(&mut self) -> Result<Vec<DeviceDescriptor>, String> {
        self.seen = nusb::list_devices().map_err(|e| e.to_string())?.collect();
        Ok(self.seen.iter().map(describe).collect())
    }

    fn open(&mut self, device: &DeviceDescriptor) -> Result<UsbTransport, OpenFailure> {
        let serial = device.serial_string().unwrap_or_default();
        let info = self
            .seen
            .iter()
            .find(|info| device_key(info) == device.id)
            .ok_or_else(|| OpenFailure::NotFound {
                serial: serial.clone(),
            })?;
        UsbTransport::open(info, &serial)
    }
}

fn classify(e: io::Error, serial: &str, action: &str) -> OpenFailure {
    match e.kind() {
        io::ErrorKind::ResourceBusy => OpenFailure::Busy {
            serial: serial.to_string(),
        },
        io::ErrorKind::NotFound => OpenFailure::NotFound {
            serial: serial.to_string(),
        },
        _ => OpenFailure::Io(format!("{}: {}", action, e)),
    }
}

/// A claimed printer interface.
pub struct UsbTransport {
    interface: Option<nusb::Interface>,
    ep_out: u8,
}

impl UsbTransport {
    fn open(info: &nusb::DeviceInfo, serial: &str) -> Result<Self, OpenFailure> {
        let interface_number = info
            .interfaces()
            .find(|iface| iface.class() == USB_CLASS_PRINTER)
            .map(|iface| iface.interface_number())
            .unwrap_or(0);

        let device = info
            .open()
            .map_err(|e| classify(e, serial, "failed to open device"))?;

        let ep_out = bulk_out_endpoint(&device, interface_number)?;

        let interface = device
            .detach_and_claim_interface(interface_number)
            .map_err(|e| classify(e, serial, "failed to claim interface"))?;

        debug!(interface_number, ep_out, "usb interface claimed");
        Ok(Self {
            interface: Some(interface),
            ep_out,
        })
    }
}

fn bulk_out_endpoint(device: &nusb::Device, interface_number: u8) -> Result<u8, OpenFailure> {
    let config = device
        .active_configuration()
        .map_err(|e| OpenFailure::Io(format!("failed to read active configuration: {}", e)))?;

    for alt_setting in config.interface_alt_settings() {
        if alt_setting.interface_number() != interface_number || alt_setting.alternate_setting() != 0 {
            continue;
        }
        let endpoints = alt_setting
            .endpoints()
            .map(|ep| (ep.transfer_type(), ep.direction(), ep.address()));
        if let Some(address) = first_bulk_out(endpoints) {
            return Ok(address);
        }
    }
    Err(OpenFailure::Io("no bulk OUT endpoint on printer interface".into()))
}

/// First bulk OUT address among `(type, direction, address)` triples.
fn first_bulk_out(endpoints: impl Iterator<Item = (EndpointType, Direction, u8)>) -> Option<u8> {
    for (transfer_type, direction, address) in endpoints {
        if transfer_type == EndpointType::Bulk && direction == Direction::Out {
            return Some(address);
        }
    }
    None
}

impl Transport for UsbTransport {
    fn write_all(&mut self, data: &[u8]) -> LabelResult<()> {
        let interface = self
            .interface
            .as_ref()
            .ok_or_else(|| LabelError::Transport("write after close".into()))?;

        let completion = block_on(interface.bulk_out(self.ep_out, data.to_vec()));
        completion
            .status
            .map_err(|e| LabelError::Transport(format!("USB bulk OUT: {}", e)))
    }

    fn close(&mut self) -> LabelResult<()> {
        // Dropping the interface releases the claim.
        self.interface = None;
        Ok(())
    }
}
