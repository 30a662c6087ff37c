//! # Labelpress - Label Printing for ESC/POS Thermal Printers
//!
//! Labelpress turns small JSON requests (a drink order, a pantry jar, a
//! shopping list) into cut labels on USB ESC/POS receipt printers. It
//! provides:
//!
//! - **Device location**: find one printer among many by serial number
//! - **Printer sessions**: paced ESC/POS with reset and cut at both ends
//! - **Layout**: word wrapping, truncation, date formatting
//! - **Rasterization**: vector page → 300 DPI bitmap → printer width
//! - **Recovery**: a minimal fallback label whenever styled output fails
//!
//! ## Quick Start
//!
//! ```
//! use labelpress::{
//!     config::Settings,
//!     device::DeviceDescriptor,
//!     engine::{JobOutcome, run_job},
//!     label::{LabelKind, LabelRequest},
//!     transport::CaptureSource,
//! };
//!
//! let settings = Settings::from_yaml(r#"
//! printers:
//!   shared: { vendor_id: "0x04b8", product_id: "0x0202" }
//!   bar: { serial_number: "BAR001", profile: "TM-L90", name: "Bar", scripts: [drinks] }
//! printer: { max_width: 576, settle_delay_ms: 0, discovery_timeout_ms: 0 }
//! fonts: { path: /nonexistent.ttf, size: 14 }
//! pdf_style: { margins: 10, line_height_ratio: 1.3, paragraph_spacing: 6, indent: 12, padding: 4 }
//! safety_margins: { percentage: 0.1, minimum: 20 }
//! page_dimensions: { width: 288 }
//! "#)?;
//!
//! let request = LabelRequest::parse(
//!     LabelKind::Drink,
//!     r#"{"customer_name": "Chessie", "date_time": "July 06 2025 12:40 PM",
//!         "drink_name": "Large Coffee", "modifiers": ["Oat Milk"]}"#,
//! )?;
//!
//! let mut bus = CaptureSource::new()
//!     .with_device(DeviceDescriptor::new("1-1", 0x04b8, 0x0202, 0, Some("BAR001")));
//! let printed = bus.transport();
//!
//! assert_eq!(run_job(&request, &settings, &mut bus)?, JobOutcome::Styled);
//! assert_eq!(printed.cut_count(), 1);
//! # Ok::<(), labelpress::LabelError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`protocol`] | ESC/POS command builders |
//! | [`transport`] | USB and in-memory backends |
//! | [`device`] | Device matching and discovery |
//! | [`session`] | Paced, reset-bracketed printer sessions |
//! | [`layout`] | Wrapping, truncation, dates, strategies |
//! | [`raster`] | Documents, fonts, bitmaps, dithering |
//! | [`label`] | Drink, pantry and shopping-list labels |
//! | [`engine`] | One job from request to cut |
//! | [`config`] | YAML settings |
//! | [`error`] | Error types |

pub mod config;
pub mod device;
pub mod engine;
pub mod error;
pub mod label;
pub mod layout;
pub mod logging;
pub mod printer;
pub mod protocol;
pub mod raster;
pub mod session;
pub mod transport;

// Re-exports for convenience
pub use config::Settings;
pub use engine::{JobOutcome, run_job};
pub use error::{LabelError, LabelResult};
pub use label::{LabelKind, LabelRequest};
pub use printer::PrinterProfile;
pub use session::PrinterSession;
