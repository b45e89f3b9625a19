//! Configuration management for `logmask-core`.
//!
//! Rules reach the engine in one of two shapes: a single delimiter-separated
//! string of patterns (the form a logging appender is usually configured
//! with), or a YAML file of typed rule definitions. Both are parsed into a
//! `MaskingConfig`, validated eagerly, and turned into an immutable `Masker`.
//!
//! License: MIT OR Apache-2.0

use std::collections::HashSet;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::errors::LogmaskError;
use crate::masker::Masker;
use crate::rule::{GroupSelection, MaskRule, DEFAULT_MASK_CHAR};

/// Delimiter between patterns in a flat rules string.
pub const DEFAULT_RULES_DELIMITER: &str = ",";

/// Explicit capture group selection as written in a rule file:
/// `group: 2` or `group: "secret"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum GroupSelector {
    Index(usize),
    Name(String),
}

impl From<GroupSelector> for GroupSelection {
    fn from(selector: GroupSelector) -> Self {
        match selector {
            GroupSelector::Index(i) => GroupSelection::Index(i),
            GroupSelector::Name(name) => GroupSelection::Named(name),
        }
    }
}

/// A single, not yet compiled, mask rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuleDefinition {
    /// Identifier used in diagnostics. Defaults to `rule_<position>`.
    pub name: String,
    /// The regex pattern string.
    pub pattern: String,
    /// Which group holds the sensitive value. `None` keeps the positional policy.
    pub group: Option<GroupSelector>,
    /// Human-readable description of what the rule targets.
    pub description: Option<String>,
    /// Explicit override for enabling/disabling the rule.
    pub enabled: Option<bool>,
}

impl RuleDefinition {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            ..Self::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    pub fn selection(&self) -> GroupSelection {
        self.group.clone().map(GroupSelection::from).unwrap_or_default()
    }

    fn display_name(&self, position: usize) -> String {
        let name = self.name.trim();
        if name.is_empty() {
            format!("rule_{}", position)
        } else {
            name.to_string()
        }
    }

    fn compile(&self, position: usize, mask_char: char) -> Result<MaskRule, LogmaskError> {
        MaskRule::compile_with(
            &self.display_name(position),
            &self.pattern,
            self.selection(),
            mask_char,
        )
    }
}

/// Top-level masking configuration: ordered rules plus the mask character.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct MaskingConfig {
    /// Single character used to build masks.
    pub mask_char: String,
    /// Rules in the order they are applied.
    pub rules: Vec<RuleDefinition>,
}

impl Default for MaskingConfig {
    fn default() -> Self {
        Self {
            mask_char: DEFAULT_MASK_CHAR.to_string(),
            rules: Vec::new(),
        }
    }
}

/// Splits a flat rules string into patterns.
///
/// Tokens are trimmed and empty tokens are dropped, so `"a, ,b,"` yields
/// `["a", "b"]`. A missing string yields no rules. An empty delimiter treats
/// the whole string as one pattern.
pub fn tokenize_rules(rules: Option<&str>, delimiter: &str) -> Vec<String> {
    let Some(rules) = rules else {
        return Vec::new();
    };

    let tokens: Vec<String> = if delimiter.is_empty() {
        vec![rules.trim().to_string()]
    } else {
        rules.split(delimiter).map(|t| t.trim().to_string()).collect()
    };

    tokens.into_iter().filter(|t| !t.is_empty()).collect()
}

impl MaskingConfig {
    /// Builds a config from a flat, delimiter-separated rules string.
    pub fn from_delimited(rules: Option<&str>, delimiter: &str) -> Self {
        let patterns = tokenize_rules(rules, delimiter);
        debug!(
            "Tokenized rules string into {} pattern(s) using delimiter '{}'.",
            patterns.len(),
            delimiter
        );
        Self::from_patterns(patterns)
    }

    /// Builds a config with one positional rule per pattern.
    pub fn from_patterns<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rules: patterns.into_iter().map(RuleDefinition::new).collect(),
            ..Self::default()
        }
    }

    /// Parses a YAML rule document without validating it.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, LogmaskError> {
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Loads and validates mask rules from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading mask rules from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_yaml_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid mask rules in {}", path.display()))?;
        info!("Loaded {} rules from file {}.", config.rules.len(), path.display());

        Ok(config)
    }

    /// Rules that take part in masking, in configured order.
    pub fn active_rules(&self) -> impl Iterator<Item = &RuleDefinition> {
        self.rules.iter().filter(|rule| rule.is_enabled())
    }

    /// The configured mask character.
    pub fn mask_char(&self) -> Result<char, LogmaskError> {
        let mut chars = self.mask_char.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(LogmaskError::InvalidMaskChar(self.mask_char.clone())),
        }
    }

    /// Checks rule integrity: names, patterns, group selections and the mask
    /// character. Every problem found is reported in one error.
    pub fn validate(&self) -> Result<()> {
        let mut rule_names = HashSet::new();
        let mut errors = Vec::new();

        let mask_char = match self.mask_char() {
            Ok(c) => c,
            Err(e) => {
                errors.push(e.to_string());
                DEFAULT_MASK_CHAR
            }
        };

        for (index, rule) in self.rules.iter().enumerate() {
            let position = index + 1;
            let name = rule.display_name(position);

            let trimmed = rule.name.trim();
            if !trimmed.is_empty() && !rule_names.insert(trimmed) {
                errors.push(format!("Duplicate rule name found: '{}'.", trimmed));
            }

            if rule.pattern.trim().is_empty() {
                errors.push(format!("Rule '{}' has an empty `pattern` field.", name));
                continue;
            }

            if let Err(e) = rule.compile(position, mask_char) {
                errors.push(format!("Rule '{}': {}", name, e));
            }
        }

        if !errors.is_empty() {
            Err(anyhow!("Rule validation failed:\n{}", errors.join("\n")))
        } else {
            Ok(())
        }
    }

    /// Compiles the enabled rules, in order, into a `Masker`.
    ///
    /// All rules are attempted so that every broken pattern is reported. A
    /// single failure is returned as-is; several are folded into `Fatal`.
    /// Nothing is returned unless every rule compiled.
    pub fn build_masker(&self) -> Result<Masker, LogmaskError> {
        let mask_char = self.mask_char()?;
        let mut compiled = Vec::new();
        let mut compilation_errors = Vec::new();

        for (index, rule) in self.rules.iter().enumerate() {
            if !rule.is_enabled() {
                debug!("Skipping disabled rule '{}'.", rule.display_name(index + 1));
                continue;
            }
            match rule.compile(index + 1, mask_char) {
                Ok(mask_rule) => compiled.push(mask_rule),
                Err(e) => compilation_errors.push(e),
            }
        }

        match compilation_errors.len() {
            0 => {
                debug!("Finished compiling rules. Total compiled: {}.", compiled.len());
                if compiled.is_empty() {
                    warn!("No mask rules configured; messages will pass through unchanged.");
                }
                Ok(Masker::from(compiled))
            }
            1 => Err(compilation_errors.remove(0)),
            n => {
                let error_message = compilation_errors
                    .iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<String>>()
                    .join("\n");
                Err(LogmaskError::Fatal(format!(
                    "Failed to compile {} rule(s):\n{}",
                    n, error_message
                )))
            }
        }
    }
}
