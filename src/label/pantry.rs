//! Pantry jar labels.
//!
//! The direct-text label prints the description large and bold, wrapped
//! under the double-width budget, then the date:
//!
//! ```text
//!     Organic Whole          (double height+width, bold)
//!     Wheat Flour
//!
//! ▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄
//!
//!       Jul 6, 2025          (double width)
//!
//! ▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄
//! ```

use crate::error::LabelResult;
use crate::layout::{center_pad, format_iso_date, wrap};
use crate::protocol::text::{Alignment, TextSize};
use crate::raster::{DocumentBuilder, VectorDocument, render_for_printer};
use crate::session::PrinterSession;
use crate::transport::Transport;

use super::RenderContext;
use super::request::PantryItem;

const DESCRIPTION_PAD: usize = 4;
const DATE_PAD: usize = 6;
const RULE_CHARS: usize = 40;

/// Characters per description line: half the columns, less one for the pad.
pub fn description_budget(columns: usize) -> usize {
    TextSize::DoubleHeightWidth.budget(columns).saturating_sub(1).max(1)
}

pub fn description_lines(description: &str, columns: usize) -> Vec<String> {
    wrap(description, description_budget(columns))
}

pub fn print_direct<T: Transport>(
    item: &PantryItem,
    columns: usize,
    session: &mut PrinterSession<T>,
) -> LabelResult<()> {
    let rule = "▄".repeat(RULE_CHARS);

    session.set_alignment(Alignment::Left)?;
    for line in description_lines(&item.description, columns) {
        session.write_text(&center_pad(DESCRIPTION_PAD, ""))?;
        session.set_text_size(TextSize::DoubleHeightWidth)?;
        session.set_bold(true)?;
        session.write_text(&line)?;
        session.set_bold(false)?;
        session.set_text_size(TextSize::Normal)?;
        session.write_text("\n")?;
    }
    session.write_text("\n")?;

    session.write_line(&rule)?;
    session.write_text("\n")?;

    session.write_text(&center_pad(DATE_PAD, ""))?;
    session.set_text_size(TextSize::DoubleWidth)?;
    session.write_text(&format_iso_date(&item.date))?;
    session.set_text_size(TextSize::Normal)?;
    session.write_text("\n\n")?;

    session.write_line(&rule)
}

pub fn raster_document(item: &PantryItem, ctx: &RenderContext<'_>) -> VectorDocument {
    let settings = ctx.settings;
    let base = settings.fonts.size;
    let mut doc = DocumentBuilder::new(ctx.font, settings.pdf_style, settings.page_dimensions.width);

    doc.centered(&item.description, base * 2.0, true);
    doc.rule(1.5);
    let date = format_iso_date(&item.date);
    if !date.is_empty() {
        doc.centered(&date, base * 1.5, false);
    }
    doc.finish(&settings.safety_margins)
}

pub fn print_raster<T: Transport>(
    item: &PantryItem,
    ctx: &RenderContext<'_>,
    session: &mut PrinterSession<T>,
) -> LabelResult<()> {
    let doc = raster_document(item, ctx);
    session.print_image(&render_for_printer(&doc, ctx.font, ctx.max_width_dots))
}
