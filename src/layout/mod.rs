//! # Layout Engine
//!
//! Text shaping that does not depend on a device: word wrapping under a
//! budget, hard truncation, fixed-pad centering for the direct-text path,
//! date formatting, and the per-label choice between direct text and
//! rasterization.
//!
//! ## Strategies
//!
//! | Label | Options | Default |
//! |-------|---------|---------|
//! | Drink | `stylized` (direct text, left-aligned), `centered` (raster + photo) | `stylized` |
//! | Pantry | `direct`, `raster` | `direct` |
//! | Shopping list | raster only | |

pub mod date;
pub mod wrap;

pub use date::{OrderTime, format_iso_date, generated_stamp, parse_order_time};
pub use wrap::{center_pad, truncate, wrap, wrap_with};

use serde::Deserialize;

/// Drink label rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrinkStrategy {
    /// ASCII-art header, inline size/inverse toggles, left-aligned
    #[default]
    Stylized,
    /// Side-channel photo, then a true-centered rasterized label
    Centered,
}

/// Pantry label rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PantryStrategy {
    #[default]
    Direct,
    Raster,
}

/// Which path a job takes through the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPath {
    DirectText,
    Raster,
}

impl DrinkStrategy {
    pub fn path(self) -> RenderPath {
        match self {
            DrinkStrategy::Stylized => RenderPath::DirectText,
            DrinkStrategy::Centered => RenderPath::Raster,
        }
    }
}

impl PantryStrategy {
    pub fn path(self) -> RenderPath {
        match self {
            PantryStrategy::Direct => RenderPath::DirectText,
            PantryStrategy::Raster => RenderPath::Raster,
        }
    }
}
