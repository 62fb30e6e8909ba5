//! Diagnostic tracing for the gradebook.
//!
//! Tracing goes to stderr and is controlled by `RUST_LOG`. It is separate from
//! command output on stdout and from persistence warnings, which are always
//! printed.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG`. Defaults to `warn` if unset.
///
/// # Example
/// ```bash
/// RUST_LOG=gradebook=debug gradebook add "CS F111 - Computer Programming"
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
