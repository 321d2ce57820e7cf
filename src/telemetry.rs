//! Logging setup.
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Filtering follows `RUST_LOG` and defaults to `warn`.
///
/// Logs go to stderr so menu and report output on stdout stay clean.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
