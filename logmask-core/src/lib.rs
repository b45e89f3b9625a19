// logmask-core/src/lib.rs
//! # logmask Core Library
//!
//! `logmask-core` masks sensitive values (passwords, phone numbers, tokens)
//! in rendered log messages before they are written. It compiles an ordered
//! list of regular-expression rules and applies them, one after the other,
//! to each message. The selected part of every match is overwritten with a
//! run of mask characters of the same length; surrounding text is kept.
//!
//! The engine is pure: no I/O, no global state, no interior mutability. A
//! built `Masker` can be shared freely between threads.
//!
//! ## Modules
//!
//! * `rule`: `MaskRule`, a compiled pattern plus its group-selection policy.
//! * `masker`: `Masker`, the ordered rule set.
//! * `config`: flat rule strings, YAML rule files, validation.
//! * `provider`: `MaskingMessageProvider`, the adapter a log encoder calls.
//! * `logger`: `MaskingLogger`, a `log::Log` that writes masked JSON lines.
//! * `errors`: `LogmaskError`.
//!
//! ## Group selection
//!
//! By default a rule masks capture group 2 if the pattern has more than one
//! group, group 1 if it has exactly one, and, if it has none, replaces the
//! whole match with nothing. Rules loaded from YAML may instead name the
//! group explicitly (`group: 1`, `group: secret`, or `group: 0` for the
//! whole match).
//!
//! ## Usage Example
//!
//! ```rust
//! use logmask_core::{MaskingConfig, DEFAULT_RULES_DELIMITER};
//!
//! let config = MaskingConfig::from_delimited(
//!     Some(r#""password":"(.*?)",("phoneNumber":")(\d+)(")"#),
//!     DEFAULT_RULES_DELIMITER,
//! );
//! let masker = config.build_masker()?;
//!
//! let masked = masker.mask(r#"{"phoneNumber":"9898981212","password":"Masking@123"}"#);
//! assert_eq!(masked, r#"{"phoneNumber":"**********","password":"***********"}"#);
//! # Ok::<(), logmask_core::LogmaskError>(())
//! ```
//!
//! ## Pattern cost
//!
//! Patterns are compiled with the `regex` crate, which matches in time linear
//! in the input. Look-around and back-references are therefore unavailable
//! and are reported as invalid patterns.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod config;
pub mod errors;
pub mod logger;
pub mod masker;
pub mod provider;
pub mod rule;

/// Re-exports the configuration types used to describe rule sets.
pub use config::{
    tokenize_rules,
    GroupSelector,
    MaskingConfig,
    RuleDefinition,
    DEFAULT_RULES_DELIMITER,
};

/// Re-exports the custom error type for clear error reporting.
pub use errors::LogmaskError;

pub use logger::MaskingLogger;
pub use masker::Masker;
pub use provider::{MaskingMessageProvider, DEFAULT_MESSAGE_FIELD};
pub use rule::{GroupSelection, MaskRule, DEFAULT_MASK_CHAR, MAX_PATTERN_LENGTH};
