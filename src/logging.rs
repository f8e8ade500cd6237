//! Logging setup on top of the `log` facade and `env_logger`.
//!
//! Level selection, highest priority first:
//!
//! 1. `RUST_LOG`, parsed with env_logger's own filter syntax
//! 2. `--quiet`: errors only
//! 3. `-v` debug, `-vv` and beyond trace
//! 4. info
//!
//! Log lines go to stderr so that reports written to stdout stay clean.

use std::env;
use std::io::Write;

use env_logger::{Builder, Target};
use log::LevelFilter;

/// Install the global logger.
///
/// Returns `false` if a logger was already installed (for example when
/// several integration tests drive [`crate::run_app`] in one process); the
/// existing logger is kept in that case.
///
/// # Example
///
/// ```rust,no_run
/// profiledupe::logging::init_logging(1, false);
/// log::debug!("visible with -v");
/// ```
pub fn init_logging(verbose: u8, quiet: bool) -> bool {
    let rust_log = env::var("RUST_LOG").ok();

    let mut builder = Builder::new();
    builder.target(Target::Stderr);
    match &rust_log {
        Some(filters) => {
            builder.parse_filters(filters);
        }
        None => {
            builder.filter_level(level_for(verbose, quiet));
        }
    }

    let detailed = verbose > 0 || rust_log.is_some();
    builder.format(move |buf, record| {
        let style = buf.default_level_style(record.level());
        if detailed {
            writeln!(
                buf,
                "{} {style}{:<5}{style:#} [{}] {}",
                buf.timestamp_seconds(),
                record.level(),
                record.module_path().unwrap_or("unknown"),
                record.args()
            )
        } else {
            writeln!(
                buf,
                "{style}{:<5}{style:#} {}",
                record.level(),
                record.args()
            )
        }
    });

    let installed = builder.try_init().is_ok();
    if installed {
        log::debug!(
            "Logging initialized ({})",
            rust_log.as_deref().map_or_else(
                || format!("level {:?}", level_for(verbose, quiet)),
                |f| format!("RUST_LOG={f}")
            )
        );
    }
    installed
}

/// Map CLI verbosity flags to a level filter.
fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    match (quiet, verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Info,
        (false, 1) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    }
}
