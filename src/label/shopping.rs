//! Shopping lists. Always rasterized: the list is unbounded, so the page is
//! sized to whatever the categories need.
//!
//! ```text
//!          SHOPPING LIST
//!  Generated: Jul 06, 2025 at 02:05 PM
//! ──────────────────────────────────
//! PRODUCE
//! ───────
//!   [ ] Apples
//!   [ ] Organic free range brown
//!       eggs
//!
//! ──────────────────────────────────
//!         Happy Shopping!
//! ```

use crate::error::LabelResult;
use crate::layout::generated_stamp;
use crate::raster::{DocumentBuilder, VectorDocument, render_for_printer};
use crate::session::PrinterSession;
use crate::transport::Transport;

use super::RenderContext;
use super::request::ShoppingList;

const CHECKBOX: &str = "[ ] ";
const CONTINUATION: &str = "    ";

pub fn document(list: &ShoppingList, ctx: &RenderContext<'_>) -> VectorDocument {
    let settings = ctx.settings;
    let base = settings.fonts.size;
    let heading = base * 1.25;
    let mut doc = DocumentBuilder::new(ctx.font, settings.pdf_style, settings.page_dimensions.width);

    doc.centered("SHOPPING LIST", base * 2.0, true);
    doc.centered(&format!("Generated: {}", generated_stamp(list.generated_at)), base, false);
    doc.rule(1.5);
    doc.paragraph_break();

    for category in &list.categories {
        let name = category.name.to_uppercase();
        doc.line(&name, heading, true, 0.0);
        let underline = doc.measure(&name, heading, true);
        doc.short_rule(underline, 1.0);
        for item in &category.items {
            doc.hanging(CHECKBOX, CONTINUATION, item, base);
        }
        doc.paragraph_break();
    }

    doc.rule(1.5);
    doc.centered("Happy Shopping!", base, false);
    doc.finish(&settings.safety_margins)
}

pub fn print<T: Transport>(
    list: &ShoppingList,
    ctx: &RenderContext<'_>,
    session: &mut PrinterSession<T>,
) -> LabelResult<()> {
    let doc = document(list, ctx);
    session.print_image(&render_for_printer(&doc, ctx.font, ctx.max_width_dots))
}
