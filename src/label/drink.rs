//! Drink order labels.
//!
//! ## Stylized (direct text)
//!
//! ```text
//!     * * *  DRINK ORDER  * * *
//! ▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄
//!
//!     ██CHESSIE██            (inverse, double height+width)
//!
//! . . . . . . . . . . . . . . . .
//!
//! Jul 06, 2025            12:40 PM
//!
//! ════════════════════════════════
//! ════════════════════════════════
//!
//!     L a r g e  C o f f e e  (double width)
//!
//!     + Extra Shot
//!     + Oat Milk
//!
//! ▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄
//! ```
//!
//! ## Centered (rasterized)
//!
//! The customer's photo (if one exists under `drink_images/`) prints first,
//! uncut, followed by a bitmap with every line truly centered.

use tracing::{debug, warn};

use crate::layout::{center_pad, parse_order_time, truncate};
use crate::protocol::text::{Alignment, TextSize};
use crate::raster::{Bitmap, DocumentBuilder, VectorDocument, render_for_printer};
use crate::session::PrinterSession;
use crate::transport::Transport;

use super::request::{DrinkOrder, drink_image_path};
use super::RenderContext;

/// Modifier lines are cut, not wrapped, at this many characters.
pub const MODIFIER_CAP: usize = 28;

const NAME_PAD: usize = 4;
const HEADER: &str = "    * * *  DRINK ORDER  * * *";

/// `{date:<16} {time:>15}`, or the error marker.
pub fn date_time_line(raw: &str) -> String {
    match parse_order_time(raw) {
        Some(t) => format!("{:<16} {:>15}", t.date, t.time),
        None => "Date/Time error".to_string(),
    }
}

pub fn modifier_line(modifier: &str) -> String {
    format!("    + {}", truncate(modifier, MODIFIER_CAP))
}

fn dotted(columns: usize) -> String {
    vec!["."; columns / 2].join(" ")
}

pub fn print_stylized<T: Transport>(
    order: &DrinkOrder,
    columns: usize,
    session: &mut PrinterSession<T>,
) -> crate::error::LabelResult<()> {
    let block = "▄".repeat(columns);
    let double = "═".repeat(columns);

    session.set_alignment(Alignment::Left)?;
    session.write_line(HEADER)?;
    session.write_line(&block)?;
    session.write_text("\n")?;

    session.write_text(&center_pad(NAME_PAD, ""))?;
    session.set_inverse(true)?;
    session.set_text_size(TextSize::DoubleHeightWidth)?;
    session.write_text(&order.customer_name)?;
    session.set_text_size(TextSize::Normal)?;
    session.set_inverse(false)?;
    session.write_text("\n\n")?;

    session.write_line(&dotted(columns))?;
    session.write_text("\n")?;
    session.write_line(&date_time_line(&order.date_time))?;

    session.write_text("\n")?;
    session.write_line(&double)?;
    session.write_line(&double)?;
    session.write_text("\n")?;

    session.write_text(&center_pad(NAME_PAD, ""))?;
    session.set_text_size(TextSize::DoubleWidth)?;
    session.write_text(&order.drink_name)?;
    session.set_text_size(TextSize::Normal)?;
    session.write_text("\n\n")?;

    for modifier in &order.modifiers {
        session.write_line(&modifier_line(modifier))?;
    }

    session.write_text("\n")?;
    session.write_line(&block)
}

/// The centered label as a vector document.
pub fn centered_document(order: &DrinkOrder, ctx: &RenderContext<'_>) -> VectorDocument {
    let settings = ctx.settings;
    let base = settings.fonts.size;
    let mut doc = DocumentBuilder::new(ctx.font, settings.pdf_style, settings.page_dimensions.width);

    doc.centered(&order.customer_name, base * 2.0, true);
    doc.paragraph_break();

    let when = match parse_order_time(&order.date_time) {
        Some(t) => format!("{} · {}", t.date, t.time),
        None => "Date/Time error".to_string(),
    };
    doc.centered(&when, base, false);
    doc.rule(1.0);

    doc.centered(&order.drink_name, base * 1.5, true);
    if !order.modifiers.is_empty() {
        doc.paragraph_break();
    }
    for modifier in &order.modifiers {
        doc.centered(&format!("+ {}", truncate(modifier, MODIFIER_CAP)), base, false);
    }

    doc.finish(&settings.safety_margins)
}

/// Side-channel photo, scaled to the head, if the customer has one.
pub fn side_channel_image(order: &DrinkOrder, ctx: &RenderContext<'_>) -> Option<Bitmap> {
    let path = drink_image_path(&ctx.settings.paths.assets_dir, &order.customer_name);
    if !path.is_file() {
        debug!(path = %path.display(), "no drink image");
        return None;
    }
    match Bitmap::load(&path) {
        Ok(bmp) => Some(bmp.scale_to_width(ctx.max_width_dots)),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "drink image unreadable, skipping");
            None
        }
    }
}

pub fn print_centered<T: Transport>(
    order: &DrinkOrder,
    ctx: &RenderContext<'_>,
    session: &mut PrinterSession<T>,
) -> crate::error::LabelResult<()> {
    if let Some(photo) = side_channel_image(order, ctx) {
        session.print_image(&photo)?;
        session.write_text("\n")?;
    }
    let doc = centered_document(order, ctx);
    let bitmap = render_for_printer(&doc, ctx.font, ctx.max_width_dots);
    session.print_image(&bitmap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_time_line_layout() {
        let line = date_time_line("July 06 2025 12:40 PM");
        assert_eq!(line, "Jul 06, 2025            12:40 PM");
        assert_eq!(line.chars().count(), 32);
    }

    #[test]
    fn test_date_time_line_error_marker() {
        assert_eq!(date_time_line("tomorrow-ish"), "Date/Time error");
    }

    #[test]
    fn test_modifier_truncated() {
        let line = modifier_line("Extra caramel drizzle with whipped cream");
        assert_eq!(line, "    + Extra caramel drizzle with w");
        assert_eq!(modifier_line("Oat Milk"), "    + Oat Milk");
    }

    #[test]
    fn test_dotted_separator() {
        assert_eq!(dotted(32), ". . . . . . . . . . . . . . . .");
    }
}
