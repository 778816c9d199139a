//! Tracing subscriber setup for the `headsup` binary.
//!
//! Filtering follows `RUST_LOG`; without it only warnings are shown. Output
//! goes to stderr so reports on stdout stay machine-readable.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "warn";

pub fn init_logging() {
    use tracing_subscriber::fmt;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    // A subscriber may already be installed when embedded; keep that one
    let _ = tracing::subscriber::set_global_default(subscriber);
}
