//! Log output for the binary.
//!
//! Library code only emits `tracing` events; whoever runs it picks the
//! subscriber. The CLI installs a compact stderr formatter filtered by
//! `RUST_LOG`, defaulting to `info` (or `debug` with `--verbose`).

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_cli_logger(verbose: bool) {
    let default = if verbose { "labelpress=debug,info" } else { "labelpress=info,warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
