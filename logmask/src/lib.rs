// logmask/src/lib.rs
//! # logmask CLI Application
//!
//! Command-line front end for `logmask-core`: masks log files or piped log
//! streams, checks rule sets, and demonstrates the masking JSON logger.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
