//! Command implementations and the rule-source resolution they share.

pub mod check;
pub mod demo;
pub mod mask;

use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use is_terminal::IsTerminal;
use log::debug;

use logmask_core::{Masker, MaskingConfig};

use crate::cli::RuleSourceArgs;
use crate::ui::output_format;

/// File name looked up in the default rule locations.
pub const DEFAULT_RULES_FILE: &str = "rules.yaml";

/// Locations searched for a rule file when neither `--config` nor `--rules`
/// is given, in order.
pub fn rules_candidate_paths() -> Vec<PathBuf> {
    let base_dirs = vec![
        dirs::home_dir().map(|p| p.join(".logmask")),
        dirs::config_dir().map(|p| p.join("logmask")),
        Some(PathBuf::from("./config")),
    ];

    base_dirs
        .into_iter()
        .flatten()
        .map(|dir| dir.join(DEFAULT_RULES_FILE))
        .collect()
}

/// Resolves the rule configuration: `--config` first, then `--rules` (or
/// `LOGMASK_RULES`), then the first rule file found in the default locations.
pub fn resolve_config(source: &RuleSourceArgs) -> Result<MaskingConfig> {
    let mut config = if let Some(path) = &source.config {
        MaskingConfig::load_from_file(path)?
    } else if let Some(rules) = &source.rules {
        debug!("Using rules string with delimiter '{}'.", source.delimiter);
        MaskingConfig::from_delimited(Some(rules), &source.delimiter)
    } else if let Some(path) = rules_candidate_paths().into_iter().find(|p| p.is_file()) {
        debug!("Found rule file at: {}", path.display());
        MaskingConfig::load_from_file(&path)?
    } else {
        bail!("No mask rules configured. Pass --config FILE or --rules PATTERNS, or set LOGMASK_RULES.");
    };

    if let Some(mask_char) = source.mask_char {
        config.mask_char = mask_char.to_string();
    }
    Ok(config)
}

/// Resolves and compiles the rules. Any invalid rule fails the whole build.
pub fn build_masker(source: &RuleSourceArgs) -> Result<Masker> {
    let config = resolve_config(source)?;
    config.build_masker().context("Failed to compile mask rules")
}

/// Helper for printing info messages to stderr.
pub fn info_msg(msg: impl AsRef<str>) {
    let supports_color = io::stderr().is_terminal();
    let _ = output_format::print_info_message(&mut io::stderr(), msg.as_ref(), supports_color);
}

/// Helper for printing success messages to stderr.
pub fn success_msg(msg: impl AsRef<str>) {
    let supports_color = io::stderr().is_terminal();
    let _ = output_format::print_success_message(&mut io::stderr(), msg.as_ref(), supports_color);
}

/// Helper for printing error messages to stderr.
pub fn error_msg(msg: impl AsRef<str>) {
    let supports_color = io::stderr().is_terminal();
    let _ = output_format::print_error_message(&mut io::stderr(), msg.as_ref(), supports_color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn rules_string_is_tokenized_with_delimiter() {
        let source = RuleSourceArgs {
            rules: Some(r"pin=(\d{4,6});user=(\w+)".to_string()),
            delimiter: ";".to_string(),
            ..RuleSourceArgs::default()
        };
        let masker = build_masker(&source).unwrap();
        assert_eq!(masker.len(), 2);
        assert_eq!(masker.mask("pin=12345 user=bob"), "pin=***** user=***");
    }

    #[test]
    fn config_file_wins_over_rules_string() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"rules:\n  - pattern: 'pin=(\\d+)'\n").unwrap();
        let source = RuleSourceArgs {
            config: Some(file.path().to_path_buf()),
            rules: Some("user=(\\w+)".to_string()),
            delimiter: ",".to_string(),
            mask_char: Some('#'),
        };
        let masker = build_masker(&source).unwrap();
        assert_eq!(masker.mask("pin=12 user=bob"), "pin=## user=bob");
    }

    #[test]
    fn invalid_rule_fails_the_build() {
        let source = RuleSourceArgs {
            rules: Some("ok,(broken".to_string()),
            delimiter: ",".to_string(),
            ..RuleSourceArgs::default()
        };
        let err = build_masker(&source).unwrap_err();
        assert!(format!("{:#}", err).contains("(broken"));
    }
}
