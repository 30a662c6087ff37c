//! # Printer Module
//!
//! Per-device facts resolved from configuration.
//!
//! ## Modules
//!
//! - [`profile`]: Identity and print width of a configured printer

pub mod profile;

pub use profile::PrinterProfile;
