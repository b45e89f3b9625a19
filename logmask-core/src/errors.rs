//! errors.rs - Custom error types for the logmask-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `logmask-core` library.
///
/// Every variant except `NotStarted` is a construction-time failure: once a
/// `Masker` exists, masking itself cannot fail.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LogmaskError {
    #[error("Invalid mask pattern '{0}': {1}")]
    InvalidPattern(String, regex::Error),

    #[error("Mask pattern '{0}': length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(String, usize, usize),

    #[error("Mask pattern '{pattern}' selects capture group {group}, but it only defines {available}")]
    GroupOutOfRange {
        pattern: String,
        group: usize,
        available: usize,
    },

    #[error("Mask pattern '{pattern}' has no capture group named '{name}'")]
    UnknownGroupName { pattern: String, name: String },

    #[error("Mask character must be exactly one character, got '{0}'")]
    InvalidMaskChar(String),

    #[error("Masking provider has not been started; refusing to emit the message")]
    NotStarted,

    #[error("Failed to parse masking configuration: {0}")]
    YamlError(#[from] serde_yml::Error),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),

    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}
