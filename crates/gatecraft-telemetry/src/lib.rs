//! Logging initialization for the gatecraft binary
//!
//! Structured logging only, no OTLP export, since this workspace has
//! no metrics or trace backend to ship to.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialize the global `tracing` subscriber
///
/// `log_filter` is used when `RUST_LOG` is unset; an invalid filter
/// falls back to `"info"` rather than failing startup.
pub fn init(log_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_filter));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}
