//! Diagnostic logging for the `logmask` binary.
//!
//! Diagnostics go to stderr through `env_logger`. `RUST_LOG` is honoured
//! unless an explicit level is passed in; the default is `warn`.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes `env_logger`. Safe to call more than once; later calls are no-ops.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.format_timestamp(None).target(env_logger::Target::Stderr);
    let _ = builder.try_init();
}

/// Maps the global CLI flags onto a level override.
pub fn level_from_flags(quiet: bool, debug: bool) -> Option<LevelFilter> {
    if quiet {
        Some(LevelFilter::Off)
    } else if debug {
        Some(LevelFilter::Debug)
    } else {
        None
    }
}
