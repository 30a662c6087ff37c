//! # Error Types
//!
//! This module defines error types used throughout the labelpress library.
//!
//! | Variant | Raised by | Job effect |
//! |---------|-----------|------------|
//! | `Config` | settings loader, role lookup | fatal before any device access |
//! | `Payload` | request parsing | job aborted, no device access |
//! | `DeviceNotFound` / `DeviceBusy` | device locator | job aborted, no paper used |
//! | `Transport` | session writes | fallback label + forced cut |
//! | `Render` / `Image` | layout and raster pipeline | fallback label + forced cut |

use thiserror::Error;

/// Main error type for labelpress operations
#[derive(Debug, Error)]
pub enum LabelError {
    /// Missing file, section or required option in the settings
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed JSON or missing required request fields
    #[error("Invalid payload: {0}")]
    Payload(String),

    /// No attached device matched vendor/product/serial
    #[error("Printer not found (serial {serial})")]
    DeviceNotFound { serial: String },

    /// A matching device exists but another process holds it
    #[error("Printer busy (serial {serial})")]
    DeviceBusy { serial: String },

    /// Transport-level errors (claim, write, close)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Layout or rasterization failure
    #[error("Render error: {0}")]
    Render(String),

    /// Image loading or encoding failure
    #[error("Image error: {0}")]
    Image(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LabelError {
    /// Whether this error aborts a job before any paper moves.
    pub fn is_pre_session(&self) -> bool {
        matches!(
            self,
            LabelError::Config(_)
                | LabelError::Payload(_)
                | LabelError::DeviceNotFound { .. }
                | LabelError::DeviceBusy { .. }
        )
    }
}

impl From<serde_json::Error> for LabelError {
    fn from(e: serde_json::Error) -> Self {
        LabelError::Payload(e.to_string())
    }
}

impl From<image::ImageError> for LabelError {
    fn from(e: image::ImageError) -> Self {
        LabelError::Image(e.to_string())
    }
}

/// Result alias used across the crate
pub type LabelResult<T> = Result<T, LabelError>;
