//! Serial-backed implementation of the `log` facade.
//!
//! Records go to COM1 only; the VGA console stays the user's channel.
//! Installed once during boot, before any subsystem logs.

use log::{LevelFilter, Metadata, Record};

struct SerialLogger;

static LOGGER: SerialLogger = SerialLogger;

/// Everything up to debug; trace stays off to keep the polling loop free
/// of per-keystroke output.
const MAX_LEVEL: LevelFilter = LevelFilter::Debug;

impl log::Log for SerialLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= MAX_LEVEL
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            crate::serial_println!(
                "[{:5}] {}: {}",
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

/// Install the serial logger. Safe to call once; a second call is a
/// no-op because the facade rejects double registration.
pub fn init() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(MAX_LEVEL);
    }
}
