//! Tracing subscriber setup for hosts that don't install their own.
//!
//! Each initializer returns `false` when a global subscriber is already set.

use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "node_picker=info,warn";
const DEV_FILTER: &str = "node_picker=trace,info";

/// Initialize a subscriber honoring `RUST_LOG`, falling back to `node_picker=info,warn`.
pub fn init_tracing() -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init()
        .is_ok()
}

/// Initialize a subscriber with an explicit filter directive.
pub fn init_tracing_with_filter(filter: &str) -> bool {
    fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init()
        .is_ok()
}

/// Verbose subscriber for development: picker internals at trace level, with source locations.
pub fn init_tracing_dev() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEV_FILTER));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .try_init()
        .is_ok()
}
