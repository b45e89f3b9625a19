//! logger.rs - A `log::Log` implementation that masks every event.
//!
//! `MaskingLogger` renders each record's message, passes it through a started
//! `MaskingMessageProvider`, and writes one JSON object per event:
//!
//! ```text
//! {"@timestamp":"2025-01-01T00:00:00+00:00","level":"INFO","logger_name":"app","thread_name":"main","message":"..."}
//! ```
//!
//! A `MaskingLogger` can only be built from a started provider, so there is
//! no window in which it could write an unmasked message.
//!
//! License: MIT OR Apache-2.0

use std::io::Write;
use std::sync::Mutex;

use chrono::Utc;
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use serde_json::{Map, Value};

use crate::errors::LogmaskError;
use crate::provider::MaskingMessageProvider;

pub struct MaskingLogger {
    provider: MaskingMessageProvider,
    level: LevelFilter,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl MaskingLogger {
    /// Wraps `writer` with a masking JSON encoder.
    ///
    /// Fails with `LogmaskError::NotStarted` if `provider` has not been started.
    pub fn new<W>(provider: MaskingMessageProvider, writer: W) -> Result<Self, LogmaskError>
    where
        W: Write + Send + 'static,
    {
        if !provider.is_started() {
            return Err(LogmaskError::NotStarted);
        }
        Ok(Self {
            provider,
            level: LevelFilter::Info,
            writer: Mutex::new(Box::new(writer)),
        })
    }

    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    pub fn provider(&self) -> &MaskingMessageProvider {
        &self.provider
    }

    /// Installs this logger as the global `log` logger.
    pub fn init(self) -> Result<(), SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }

    /// Encodes one record as a JSON line (without the trailing newline).
    ///
    /// Returns `None` when the message could not be masked; the event is then
    /// dropped rather than written raw.
    pub fn encode(&self, record: &Record) -> Option<String> {
        let rendered = record.args().to_string();
        let mut fields = Map::new();
        fields.insert(
            "@timestamp".to_string(),
            Value::String(Utc::now().to_rfc3339()),
        );
        fields.insert(
            "level".to_string(),
            Value::String(record.level().to_string()),
        );
        fields.insert(
            "logger_name".to_string(),
            Value::String(record.target().to_string()),
        );
        if let Some(thread_name) = std::thread::current().name() {
            fields.insert(
                "thread_name".to_string(),
                Value::String(thread_name.to_string()),
            );
        }

        if !self.provider.write_to(&mut fields, &rendered) {
            return None;
        }
        serde_json::to_string(&Value::Object(fields)).ok()
    }
}

impl Log for MaskingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let Some(line) = self.encode(record) else {
            return;
        };
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
        }
    }

    fn flush(&self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
