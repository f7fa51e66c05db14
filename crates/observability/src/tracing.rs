//! Tracing/logging initialization.
//!
//! JSON lines on stderr, filtered through `RUST_LOG` (default `info`). Stdout
//! stays free for command output.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber; later calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
