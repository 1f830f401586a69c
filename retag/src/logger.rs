// retag/src/logger.rs
//! Logger initialization for the retag binary.
//!
//! The library crates only call `log` macros; rendering is decided here.

use log::LevelFilter;

/// Initializes `env_logger`, honoring `RUST_LOG` unless an explicit level
/// override is given. Safe to call more than once (later calls no-op).
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(level) = level {
        builder.filter_level(level);
    }
    let _ = builder.format_timestamp_secs().try_init();
}
