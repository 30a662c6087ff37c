//! # Rasterization Pipeline
//!
//! ```text
//! DocumentBuilder ──► VectorDocument ──► rasterize (300 DPI) ──► Bitmap
//!                                                                  │
//!                                        scale_to_width(576) ◄─────┘
//!                                                │
//!                                     to_raster ─┴─► GS v 0 bands
//! ```
//!
//! ## Modules
//!
//! - [`document`]: Primitives and cursor layout
//! - [`font`]: TTF faces with a built-in bitmap fallback
//! - [`render`]: Document to bitmap
//! - [`bitmap`]: Grayscale bitmaps, scaling, packing
//! - [`dither`]: Thresholding and Bayer ordered dithering

pub mod bitmap;
pub mod dither;
pub mod document;
pub mod font;
pub mod render;

pub use bitmap::{Bitmap, Raster};
pub use document::{DocumentBuilder, Primitive, TextRun, VectorDocument};
pub use font::FontFace;
pub use render::{RENDER_DPI, rasterize, render_for_printer};
