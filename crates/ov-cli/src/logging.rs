//! Logging init: stderr, filtered by `RUST_LOG`.
//!
//! The library crates log through the `log` facade; the subscriber's `tracing-log`
//! bridge picks those records up.

use tracing_subscriber::EnvFilter;

pub fn init(verbose: bool) {
    let default_filter = if verbose { "info,ov_core=debug,ov_compiler=debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
