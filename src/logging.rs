//! Diagnostic logging.
//!
//! Logs go to stderr; stdout carries only the hook response document.

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the log filter (e.g. `debug`, `rampart=trace`)
pub const LOG_ENV: &str = "RAMPART_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Filter from [`LOG_ENV`], falling back to warnings only when unset or invalid.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

pub fn init_logging() {
    let _ = fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
