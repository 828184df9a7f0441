//! Logging initialization.
//!
//! Failures are exposed as structured [`crate::Error`] values; this module
//! only wires up the diagnostic log stream so any front-end can render them
//! independently.

use tracing_subscriber::EnvFilter;

/// Environment variable controlling the log filter.
pub const LOG_ENV_VAR: &str = "REWIND_LOG";

/// Initializes the global tracing subscriber.
///
/// The filter comes from `REWIND_LOG` when set, otherwise `debug` with
/// `--verbose` and `warn` without. Logs go to stderr so answer output on
/// stdout stays clean. Repeated initialization (e.g. from tests) is a no-op.
pub fn init(verbose: bool) {
    let default_directive = if verbose { "rewind=debug" } else { "rewind=warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
