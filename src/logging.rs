//! Logging setup
//!
//! The provider runs as a process spawned by the host runtime and owns its
//! own subscriber. Output goes to stderr (the host captures it), without
//! ANSI codes. Filtering comes from `GITHUB_PROVIDER_LOG`, falling back to
//! `RUST_LOG`, defaulting to `warn`.

use tracing_subscriber::EnvFilter;

/// Environment variable controlling the log filter.
pub const LOG_ENV: &str = "GITHUB_PROVIDER_LOG";

/// Default filter when neither environment variable is set.
const DEFAULT_FILTER: &str = "warn";

/// Initialize logging, ignoring a subscriber that is already installed.
pub fn init_logging() {
    let _ = try_init_logging();
}

/// Initialize logging, surfacing the error if a global subscriber is
/// already installed.
pub fn try_init_logging() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true)
        .try_init()
}
