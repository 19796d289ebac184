//! Tracing initialization.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Log output goes to stderr so that it
/// never mixes with reports on stdout.
///
/// The filter comes from `RUST_LOG` and defaults to `warn`. Safe to call
/// more than once.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
