//! # Job Engine
//!
//! One invocation, one label:
//!
//! ```text
//! profile_for(role) ─► open_device ─► PrinterSession::new
//!                                            │
//!                 reset + styled render ─────┤ error or panic
//!                                            ▼
//!                                     fallback label
//!                                            │
//!                                     session.finish()  (reset, cut, close)
//! ```
//!
//! Failures before the session opens (configuration, device) return an
//! error and nothing is printed. Once the session is open the job always
//! ends in a cut.

use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, error, info, instrument, warn};

use crate::config::Settings;
use crate::device::{DeviceSource, open_device};
use crate::error::{LabelError, LabelResult};
use crate::label::{self, LabelRequest, RenderContext, fallback};
use crate::raster::FontFace;
use crate::session::PrinterSession;

/// How a job that reached the printer ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    Styled,
    Fallback,
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Print one label on the printer configured for its role.
#[instrument(skip_all, fields(role = request.role()))]
pub fn run_job<S: DeviceSource>(
    request: &LabelRequest,
    settings: &Settings,
    source: &mut S,
) -> LabelResult<JobOutcome> {
    let profile = settings.profile_for(request.role())?;
    info!(
        printer = %profile.display_name,
        serial = %profile.serial_number,
        profile = %profile.profile_name,
        "printing label"
    );

    let font = FontFace::load(&settings.fonts);
    let transport = open_device(source, &profile, settings.discovery_timeout())?;
    let mut session = PrinterSession::new(transport, settings.settle_delay());

    debug!(path = ?label::render_path(request, settings), "render path selected");
    let ctx = RenderContext {
        max_width_dots: profile.max_width_dots,
        ..RenderContext::new(settings, &font)
    };

    // From here on the job ends in a cut, even if the reset never got through.
    let styled = panic::catch_unwind(AssertUnwindSafe(|| {
        session.reset()?;
        label::print_styled(request, &ctx, &mut session)
    }));

    let outcome = match styled {
        Ok(Ok(())) => JobOutcome::Styled,
        Ok(Err(e)) => {
            error!(error = %e, "styled rendering failed, printing fallback label");
            JobOutcome::Fallback
        }
        Err(payload) => {
            error!(panic = %panic_message(payload.as_ref()), "styled rendering panicked, printing fallback label");
            JobOutcome::Fallback
        }
    };

    if outcome == JobOutcome::Fallback {
        if let Err(e) = fallback::print(request, &mut session) {
            warn!(error = %e, "fallback label incomplete");
        }
    }

    let written = session.bytes_written();
    match session.finish() {
        Ok(()) => info!(?outcome, bytes = written, "print job completed"),
        Err(e) => error!(error = %e, ?outcome, "print job finished with errors"),
    }
    Ok(outcome)
}

/// Exit status for a finished or aborted command.
///
/// | Code | Meaning |
/// |------|---------|
/// | 0 | reached the printer (styled or fallback) |
/// | 1 | configuration error |
/// | 2 | bad payload |
/// | 3 | printer not found, busy, or unusable |
pub fn exit_code<T>(result: &LabelResult<T>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(LabelError::Config(_)) => 1,
        Err(LabelError::Payload(_)) => 2,
        Err(_) => 3,
    }
}
