//! # Printer Profiles
//!
//! A [`PrinterProfile`] is everything the engine needs to know about one
//! physical printer: how to find it on the bus and how wide it prints.
//!
//! | Model | Paper | Width (dots) |
//! |-------|-------|--------------|
//! | TM-T20II | 80mm | 576 |
//! | TM-L90 | 80mm | 576 |
//! | TM-T88V | 58mm | 420 |

/// One configured printer, resolved for a role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrinterProfile {
    /// USB vendor id, shared by all roles
    pub vendor_id: u16,

    /// USB product id, shared by all roles
    pub product_id: u16,

    /// iSerialNumber string the device must report
    pub serial_number: String,

    /// Capability profile name (e.g. `TM-L90`)
    pub profile_name: String,

    /// Script the profile was resolved for (`drinks`, `pantry`, `shopping`)
    pub role: String,

    /// Human readable name for logs
    pub display_name: String,

    /// Maximum printable width in dots
    pub max_width_dots: u32,
}
