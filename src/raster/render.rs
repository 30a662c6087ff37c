//! Vector document → bitmap.
//!
//! Geometry is in points; the page is drawn at [`RENDER_DPI`] so a 288pt
//! (4in) page becomes 1200 pixels wide, then scaled down to the head.

use tracing::debug;

use super::{Bitmap, FontFace, Primitive, VectorDocument};

/// Fixed rasterization resolution.
pub const RENDER_DPI: f32 = 300.0;

const POINTS_PER_INCH: f32 = 72.0;

/// Draw the first page of `doc` at [`RENDER_DPI`].
pub fn rasterize(doc: &VectorDocument, font: &FontFace) -> Bitmap {
    rasterize_at(doc, font, RENDER_DPI)
}

pub fn rasterize_at(doc: &VectorDocument, font: &FontFace, dpi: f32) -> Bitmap {
    let scale = dpi / POINTS_PER_INCH;
    let width = (doc.page_width * scale).round() as u32;
    let height = (doc.page_height * scale).round() as u32;
    let mut canvas = Bitmap::blank(width, height);

    let mut dropped = 0usize;
    for primitive in &doc.primitives {
        // Anything starting past the page bottom would land on page two.
        if primitive.top() >= doc.page_height {
            dropped += 1;
            continue;
        }
        match primitive {
            Primitive::Text(run) => font.draw(
                &mut canvas,
                run.x * scale,
                run.y * scale,
                &run.text,
                run.size * scale,
                run.bold,
            ),
            Primitive::Rule {
                x,
                y,
                width,
                thickness,
            } => canvas.fill_rect(
                (x * scale).round() as i64,
                (y * scale).round() as i64,
                (width * scale).round().max(1.0) as u32,
                (thickness * scale).round().max(1.0) as u32,
            ),
        }
    }

    if dropped > 0 {
        debug!(dropped, "primitives below first page dropped");
    }
    debug!(width, height, dpi, "document rasterized");
    canvas
}

/// Rasterize and fit to a printer's dot width.
pub fn render_for_printer(doc: &VectorDocument, font: &FontFace, max_width_dots: u32) -> Bitmap {
    rasterize(doc, font).scale_to_width(max_width_dots)
}
