//! `tracing` subscriber setup.
//!
//! Installs a global `fmt` subscriber filtered by `RUST_LOG`, falling back to
//! the given directive.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs the global subscriber. Returns false if one was already set.
pub fn init(default_filter: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()
        .is_ok()
}
