use std::{
    io,
    sync::atomic::{AtomicU8, Ordering},
};

use tracing::{Level, Metadata};
use tracing_subscriber::{filter::filter_fn, fmt::MakeWriter, layer::SubscriberExt, Layer};

use crate::{
    bindings::{jsLog, LogLevel},
    wasm_bindgen,
};

static MAX_LOG_LEVEL: AtomicU8 = AtomicU8::new(LoggerLevel::Debug as u8);

/// Maximum level of the logs forwarded to the JavaScript-side.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd)]
pub enum LoggerLevel {
    None = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
}

impl From<&Level> for LoggerLevel {
    fn from(level: &Level) -> Self {
        if *level == Level::ERROR {
            LoggerLevel::Error
        } else if *level == Level::WARN {
            LoggerLevel::Warn
        } else if *level == Level::INFO {
            LoggerLevel::Info
        } else {
            LoggerLevel::Debug
        }
    }
}

impl From<&Level> for LogLevel {
    fn from(level: &Level) -> Self {
        match LoggerLevel::from(level) {
            LoggerLevel::Error | LoggerLevel::None => LogLevel::Error,
            LoggerLevel::Warn => LogLevel::Warn,
            LoggerLevel::Info => LogLevel::Info,
            LoggerLevel::Debug => LogLevel::Debug,
        }
    }
}

/// Glue between the `tracing` macros used through the crate and the JavaScript console.
pub struct Logger {}

impl Logger {
    /// Install the global `tracing` subscriber forwarding every enabled event to `jsLog`.
    ///
    /// Calling it more than once has no effect.
    pub fn init() {
        let layer = tracing_subscriber::fmt::layer()
            .without_time()
            .with_target(false)
            .with_level(false)
            .with_writer(JsLogMakeWriter)
            .with_filter(filter_fn(|meta| Logger::is_enabled(meta.level())));
        let subscriber = tracing_subscriber::registry().with(layer);
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    pub fn set_logger_level(new_level: LoggerLevel) {
        MAX_LOG_LEVEL.store(new_level as u8, Ordering::Relaxed);
    }

    pub(crate) fn is_enabled(level: &Level) -> bool {
        MAX_LOG_LEVEL.load(Ordering::Relaxed) >= LoggerLevel::from(level) as u8
    }
}

struct JsLogMakeWriter;

impl<'a> MakeWriter<'a> for JsLogMakeWriter {
    type Writer = JsLogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        JsLogWriter::new(LogLevel::Info)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        JsLogWriter::new(LogLevel::from(meta.level()))
    }
}

/// Accumulates one formatted event and hands it to `jsLog` once dropped.
///
/// The fmt layer creates one writer per event, so each drop corresponds to exactly one log
/// line on the JavaScript-side.
struct JsLogWriter {
    level: LogLevel,
    buffer: Vec<u8>,
}

impl JsLogWriter {
    fn new(level: LogLevel) -> Self {
        Self {
            level,
            buffer: Vec::with_capacity(128),
        }
    }
}

impl io::Write for JsLogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for JsLogWriter {
    fn drop(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let text = String::from_utf8_lossy(&self.buffer);
        jsLog(self.level, text.trim_end());
    }
}
