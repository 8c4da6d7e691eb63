//! Logging for batch evaluation runs.
//!
//! A run over a few hundred sequences wants a compact progress prefix, not
//! wall-clock timestamps, so every line carries the time elapsed since the
//! logger was installed:
//!
//! ```text
//! [  12.304s  WARN] seq_017: 3 of 120 frames without detection
//! ```
//!
//! Call `init_with_level` once at startup; later calls are no-ops.

use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

static START: OnceLock<Instant> = OnceLock::new();
static LOGGER: OnceLock<EvalLogger> = OnceLock::new();

struct EvalLogger {
    level: LevelFilter,
}

impl Log for EvalLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let elapsed = START
            .get()
            .map(|start| start.elapsed().as_secs_f64())
            .unwrap_or_default();
        eprintln!("[{elapsed:8.3}s {:>5}] {}", record.level(), record.args());
    }

    fn flush(&self) {}
}

/// Install the elapsed-time logger with the provided level filter.
///
/// The first call installs the logger and starts the elapsed clock; any
/// later call returns `Ok` without changing the level.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    START.get_or_init(Instant::now);

    if LOGGER.get().is_some() {
        return Ok(());
    }
    let logger = LOGGER.get_or_init(|| EvalLogger { level });
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}
