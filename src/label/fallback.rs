//! Minimal labels printed when styled rendering fails.
//!
//! Plain text in the printer's default font, no pacing tricks beyond the
//! mode reset, so it has the best chance of coming out of a printer in a
//! bad state.

use crate::error::LabelResult;
use crate::session::PrinterSession;
use crate::transport::Transport;

use super::request::LabelRequest;

pub fn lines(request: &LabelRequest) -> Vec<String> {
    match request {
        LabelRequest::Drink(order) => vec![
            "DRINK LABEL".into(),
            "=".repeat(20),
            order.customer_name.clone(),
            order.drink_name.clone(),
            "=".repeat(20),
        ],
        LabelRequest::Pantry(item) => vec![
            "PANTRY LABEL".into(),
            "=".repeat(20),
            item.description.clone(),
            if item.date.is_empty() {
                "Date".into()
            } else {
                item.date.clone()
            },
            "=".repeat(20),
        ],
        LabelRequest::Shopping(list) => vec![
            "SHOPPING LIST".into(),
            "=".repeat(30),
            "Error occurred during formatting".into(),
            format!("{} items", list.item_count()),
            "=".repeat(30),
        ],
    }
}

/// Reset text modes and print the minimal label. Does not cut.
pub fn print<T: Transport>(request: &LabelRequest, session: &mut PrinterSession<T>) -> LabelResult<()> {
    session.reset_text_mode()?;
    session.write_text("\n")?;
    for line in lines(request) {
        session.write_line(&line)?;
    }
    Ok(())
}
