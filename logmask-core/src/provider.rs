//! provider.rs - The bridge between a log encoder and the masking engine.
//!
//! A `MaskingMessageProvider` is configured the way a log appender is: with a
//! flat rules string and a delimiter. `start()` compiles those rules once; from
//! then on the provider writes the masked, rendered message of each event into
//! a JSON field.
//!
//! Before `start()` succeeds the provider fails closed: `mask_message` returns
//! `LogmaskError::NotStarted` and `write_to` writes nothing. A raw message is
//! never emitted in place of a masked one.
//!
//! License: MIT OR Apache-2.0

use log::{debug, info};
use serde_json::{Map, Value};

use crate::config::{MaskingConfig, DEFAULT_RULES_DELIMITER};
use crate::errors::LogmaskError;
use crate::masker::Masker;

/// Name of the JSON field the masked message is written to by default.
pub const DEFAULT_MESSAGE_FIELD: &str = "message";

#[derive(Debug, Clone)]
pub struct MaskingMessageProvider {
    field_name: String,
    rules: Option<String>,
    delimiter: String,
    masker: Option<Masker>,
}

impl Default for MaskingMessageProvider {
    fn default() -> Self {
        Self {
            field_name: DEFAULT_MESSAGE_FIELD.to_string(),
            rules: None,
            delimiter: DEFAULT_RULES_DELIMITER.to_string(),
            masker: None,
        }
    }
}

impl MaskingMessageProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a provider that is already started with `masker`.
    pub fn with_masker(masker: Masker) -> Self {
        Self {
            masker: Some(masker),
            ..Self::default()
        }
    }

    pub fn set_rules(&mut self, rules: impl Into<String>) {
        self.rules = Some(rules.into());
    }

    pub fn set_delimiter(&mut self, delimiter: impl Into<String>) {
        self.delimiter = delimiter.into();
    }

    pub fn set_field_name(&mut self, field_name: impl Into<String>) {
        self.field_name = field_name.into();
    }

    pub fn rules(&self) -> Option<&str> {
        self.rules.as_deref()
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    /// Compiles the configured rules. On failure the provider stays stopped
    /// and the error is handed back so the host can refuse to start.
    pub fn start(&mut self) -> Result<(), LogmaskError> {
        // A failed restart must not keep masking with the previous rules.
        self.masker = None;
        let config = MaskingConfig::from_delimited(self.rules.as_deref(), &self.delimiter);
        let masker = config.build_masker()?;
        info!(
            "Masking provider started with {} rule(s); writing to field '{}'.",
            masker.len(),
            self.field_name
        );
        self.masker = Some(masker);
        Ok(())
    }

    pub fn stop(&mut self) {
        debug!("Masking provider stopped.");
        self.masker = None;
    }

    pub fn is_started(&self) -> bool {
        self.masker.is_some()
    }

    pub fn masker(&self) -> Option<&Masker> {
        self.masker.as_ref()
    }

    /// Masks one rendered log message.
    pub fn mask_message(&self, raw: &str) -> Result<String, LogmaskError> {
        self.masker
            .as_ref()
            .map(|masker| masker.mask(raw))
            .ok_or(LogmaskError::NotStarted)
    }

    /// Writes the masked message into `fields` under the configured field name.
    ///
    /// Returns whether a value was written; a stopped provider writes nothing.
    pub fn write_to(&self, fields: &mut Map<String, Value>, raw: &str) -> bool {
        match self.mask_message(raw) {
            Ok(masked) => {
                fields.insert(self.field_name.clone(), Value::String(masked));
                true
            }
            Err(_) => false,
        }
    }
}
