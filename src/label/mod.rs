//! # Labels
//!
//! One engine, three label kinds. Each kind differs only in its formatting
//! rules; parsing, pacing, rasterization and recovery are shared.
//!
//! | Kind | Direct text | Rasterized |
//! |------|-------------|------------|
//! | Drink | [`drink::print_stylized`] | [`drink::print_centered`] |
//! | Pantry | [`pantry::print_direct`] | [`pantry::print_raster`] |
//! | Shopping list | | [`shopping::print`] |
//!
//! Nothing here cuts paper. The session's `finish` does that once per job.

pub mod drink;
pub mod fallback;
pub mod pantry;
pub mod request;
pub mod shopping;

pub use request::{
    Category, DrinkOrder, LabelKind, LabelRequest, PantryItem, ShoppingList, drink_image_name,
    drink_image_path,
};

use crate::config::Settings;
use crate::error::LabelResult;
use crate::layout::RenderPath;
use crate::raster::{Bitmap, FontFace, VectorDocument, render_for_printer};
use crate::session::PrinterSession;
use crate::transport::Transport;

/// What styled rendering needs besides the request.
pub struct RenderContext<'a> {
    pub settings: &'a Settings,
    pub font: &'a FontFace,
    /// Target printer's dot width
    pub max_width_dots: u32,
}

impl<'a> RenderContext<'a> {
    pub fn new(settings: &'a Settings, font: &'a FontFace) -> Self {
        Self {
            settings,
            font,
            max_width_dots: settings.printer.max_width,
        }
    }
}

/// Which path a request takes under the configured strategies.
pub fn render_path(request: &LabelRequest, settings: &Settings) -> RenderPath {
    match request {
        LabelRequest::Drink(_) => settings.rendering.drink.path(),
        LabelRequest::Pantry(_) => settings.rendering.pantry.path(),
        LabelRequest::Shopping(_) => RenderPath::Raster,
    }
}

/// Styled rendering for a request. Errors propagate to the caller, which
/// decides about the fallback.
pub fn print_styled<T: Transport>(
    request: &LabelRequest,
    ctx: &RenderContext<'_>,
    session: &mut PrinterSession<T>,
) -> LabelResult<()> {
    let columns = ctx.settings.printer.columns;
    match (request, render_path(request, ctx.settings)) {
        (LabelRequest::Drink(order), RenderPath::DirectText) => drink::print_stylized(order, columns, session),
        (LabelRequest::Drink(order), RenderPath::Raster) => drink::print_centered(order, ctx, session),
        (LabelRequest::Pantry(item), RenderPath::DirectText) => pantry::print_direct(item, columns, session),
        (LabelRequest::Pantry(item), RenderPath::Raster) => pantry::print_raster(item, ctx, session),
        (LabelRequest::Shopping(list), _) => shopping::print(list, ctx, session),
    }
}

/// The rasterized form of a request, whatever strategy is configured.
pub fn document(request: &LabelRequest, ctx: &RenderContext<'_>) -> VectorDocument {
    match request {
        LabelRequest::Drink(order) => drink::centered_document(order, ctx),
        LabelRequest::Pantry(item) => pantry::raster_document(item, ctx),
        LabelRequest::Shopping(list) => shopping::document(list, ctx),
    }
}

/// Final printer-width bitmap of the rasterized form.
pub fn preview(request: &LabelRequest, ctx: &RenderContext<'_>) -> Bitmap {
    render_for_printer(&document(request, ctx), ctx.font, ctx.max_width_dots)
}
