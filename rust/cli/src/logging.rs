//! Tracing subscriber setup for the `pokergym` binary.

use tracing_subscriber::{EnvFilter, fmt};

/// Installs a `fmt` subscriber writing to stderr. The filter comes from
/// `RUST_LOG`, defaulting to info everywhere and debug for our crates.
/// Calling it twice leaves the first subscriber in place.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info,pokergym_engine=info,pokergym_ai=info,pokergym_cli=debug")
    });

    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}
