//! Centralized logging for FakeMuter.
//!
//! Records from the `log` facade are forwarded to the host's own log so
//! they show up next to the client's messages. The `debug` feature raises
//! the level to `Trace`.

use log::{Level, LevelFilter, Log, Metadata, Record};
use once_cell::sync::OnceCell;

/// Receives each formatted record.
pub type LogSink = fn(&str, Level);

static SINK: OnceCell<LogSink> = OnceCell::new();
static LOGGER: HostLogger = HostLogger;

struct HostLogger;

impl Log for HostLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Some(sink) = SINK.get() {
            let message = format!("{}", record.args());
            sink(&message, record.level());
        }
    }

    fn flush(&self) {}
}

#[cfg(feature = "debug")]
fn max_level() -> LevelFilter {
    LevelFilter::Trace
}

#[cfg(not(feature = "debug"))]
fn max_level() -> LevelFilter {
    LevelFilter::Info
}

/// Installs the host logger. Later calls keep the first sink.
pub fn init_logger(sink: LogSink) {
    let _ = SINK.set(sink);
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(max_level());
    }
}
