//! Label typefaces.
//!
//! A configured TTF/OTF face is rendered anti-aliased through `ab_glyph`.
//! When the file is missing or unreadable the built-in Spleen 12×24 bitmap
//! font stands in, scaled nearest-neighbour, and a warning is logged. A job
//! never fails because of a font.
//!
//! All sizes are the em height in whatever unit the caller works in: layout
//! measures in points, the renderer draws in pixels.

use std::path::Path;

use ab_glyph::{Font, FontVec, ScaleFont, point};
use spleen_font::{FONT_12X24, PSF2Font};
use tracing::{debug, warn};

use crate::config::FontSettings;

use super::Bitmap;

/// Spleen cell aspect: 12 wide for 24 tall.
const BITMAP_ADVANCE_RATIO: f32 = 0.5;

pub enum FontFace {
    Outline {
        regular: FontVec,
        bold: Option<FontVec>,
    },
    Bitmap,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FontFace::Outline { bold, .. } => f
                .debug_struct("Outline")
                .field("bold", &bold.is_some())
                .finish(),
            FontFace::Bitmap => f.write_str("Bitmap"),
        }
    }
}

fn read_face(path: &Path) -> Result<FontVec, String> {
    let bytes = std::fs::read(path).map_err(|e| e.to_string())?;
    FontVec::try_from_vec(bytes).map_err(|e| e.to_string())
}

impl FontFace {
    /// Load the configured faces, degrading to the bitmap font.
    pub fn load(settings: &FontSettings) -> Self {
        let regular = match read_face(&settings.path) {
            Ok(face) => face,
            Err(e) => {
                warn!(path = %settings.path.display(), error = %e, "font load failed, using built-in bitmap font");
                return FontFace::Bitmap;
            }
        };

        let bold = settings.bold_path.as_deref().and_then(|p| match read_face(p) {
            Ok(face) => Some(face),
            Err(e) => {
                warn!(path = %p.display(), error = %e, "bold font load failed, using double strike");
                None
            }
        });

        debug!(path = %settings.path.display(), bold = bold.is_some(), "fonts loaded");
        FontFace::Outline { regular, bold }
    }

    fn outline(&self, bold: bool) -> Option<(&FontVec, bool)> {
        match self {
            FontFace::Outline { regular, bold: b } => Some(match (bold, b) {
                (true, Some(face)) => (face, false),
                (true, None) => (regular, true),
                (false, _) => (regular, false),
            }),
            FontFace::Bitmap => None,
        }
    }

    /// Advance width of `text` at em size `size`.
    pub fn measure(&self, text: &str, size: f32, bold: bool) -> f32 {
        match self.outline(bold) {
            Some((face, _)) => {
                let scaled = face.as_scaled(size);
                text.chars().map(|c| scaled.h_advance(face.glyph_id(c))).sum()
            }
            None => text.chars().count() as f32 * size * BITMAP_ADVANCE_RATIO,
        }
    }

    /// Draw one line with its top edge at `top`, in pixels.
    pub fn draw(&self, canvas: &mut Bitmap, x: f32, top: f32, text: &str, size: f32, bold: bool) {
        match self.outline(bold) {
            Some((face, double_strike)) => {
                draw_outline(face, canvas, x, top, text, size);
                if double_strike {
                    draw_outline(face, canvas, x + 1.0, top, text, size);
                }
            }
            None => {
                draw_bitmap(canvas, x, top, text, size);
                if bold {
                    draw_bitmap(canvas, x + 1.0, top, text, size);
                }
            }
        }
    }
}

fn draw_outline(face: &FontVec, canvas: &mut Bitmap, x: f32, top: f32, text: &str, size: f32) {
    let scaled = face.as_scaled(size);
    let baseline = top + scaled.ascent();
    let mut caret = x;

    for ch in text.chars() {
        let id = face.glyph_id(ch);
        let glyph = id.with_scale_and_position(size, point(caret, baseline));
        caret += scaled.h_advance(id);

        if let Some(outlined) = face.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                canvas.darken(
                    bounds.min.x as i64 + gx as i64,
                    bounds.min.y as i64 + gy as i64,
                    coverage,
                );
            });
        }
    }
}

fn draw_bitmap(canvas: &mut Bitmap, x: f32, top: f32, text: &str, size: f32) {
    let Ok(mut spleen) = PSF2Font::new(FONT_12X24) else {
        return;
    };
    let cell_w = (size * BITMAP_ADVANCE_RATIO).round().max(1.0) as usize;
    let cell_h = size.round().max(1.0) as usize;
    let mut cell = vec![false; 12 * 24];

    for (i, ch) in text.chars().enumerate() {
        cell.iter_mut().for_each(|p| *p = false);
        let utf8 = ch.to_string();
        let Some(glyph) = spleen.glyph_for_utf8(utf8.as_bytes()) else {
            continue;
        };
        for (row_y, row) in glyph.enumerate().take(24) {
            for (col_x, on) in row.enumerate().take(12) {
                cell[row_y * 12 + col_x] = on;
            }
        }

        let origin_x = x as i64 + (i * cell_w) as i64;
        for dy in 0..cell_h {
            let sy = dy * 24 / cell_h;
            for dx in 0..cell_w {
                let sx = dx * 12 / cell_w;
                if cell[sy * 12 + sx] {
                    canvas.darken(origin_x + dx as i64, top as i64 + dy as i64, 1.0);
                }
            }
        }
    }
}
