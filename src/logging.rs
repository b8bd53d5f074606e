//! Diagnostic logging via `tracing`.
//!
//! Logs go to stderr so they never mix with the report on stdout. `RUST_LOG`
//! takes precedence over the level chosen from the command line.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `verbose` lowers the default level to `debug`.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
