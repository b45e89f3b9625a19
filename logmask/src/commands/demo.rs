//! `logmask demo`: logs a sample login event through `MaskingLogger`.
//!
//! The masking logger is installed as the process-wide `log` logger, so this
//! command must run without the diagnostic `env_logger` being initialized.
//! The global `--quiet`/`--debug` flags set the masking logger's level instead:
//! `--quiet` suppresses the sample event entirely.

use std::io;

use anyhow::{Context, Result};
use log::{info, LevelFilter};

use logmask_core::{Masker, MaskingLogger, MaskingMessageProvider};

/// The event the demo logs.
pub const SAMPLE_LOGIN_EVENT: &str =
    r#"{"loginName":"maskingtest","phoneNumber":"9898981212","password":"Masking@123"}"#;

pub fn run_demo(masker: Masker, field_name: &str, level: LevelFilter) -> Result<()> {
    let mut provider = MaskingMessageProvider::with_masker(masker);
    provider.set_field_name(field_name);

    MaskingLogger::new(provider, io::stdout())?
        .with_level(level)
        .init()
        .context("Failed to install the masking logger")?;

    info!(target: "logmask::demo", "{}", SAMPLE_LOGIN_EVENT);
    log::logger().flush();
    Ok(())
}
