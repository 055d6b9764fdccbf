//! Diagnostic tracing for pkgscaffold.
//!
//! Tracing goes to stderr and is controlled by `RUST_LOG`. Command output
//! (`wrote ...` lines, JSON reports, tool stdout) goes to stdout and is not
//! affected by it.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG` env var. Defaults to `warn` if unset.
///
/// # Example
/// ```bash
/// RUST_LOG=pkgscaffold=debug pkgscaffold new
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
