#![cfg(feature = "std")]

use log::{LevelFilter, Metadata, Record};
use std::env;

const CRATE_PREFIX: &str = "broadside::";

/// Writes `LEVEL module: message` lines to stderr so stdout stays free for
/// layouts and JSON.
struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!(
                "{:<5} {}: {}",
                record.level(),
                short_target(record.target()),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

/// Module path relative to the crate root, e.g. `targeting::hunt`.
fn short_target(target: &str) -> &str {
    target.strip_prefix(CRATE_PREFIX).unwrap_or(target)
}

/// Level named by `value`, `info` when absent or unparsable.
fn level_from(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|lvl| lvl.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Install the stderr logger at the level named by `BROADSIDE_LOG`
/// (`off`, `error`, `warn`, `info`, `debug`, `trace`). Calling it twice is
/// harmless.
pub fn init_logging() {
    let level = level_from(env::var("BROADSIDE_LOG").ok().as_deref());
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
