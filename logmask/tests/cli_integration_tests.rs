//! Command-line integration tests for the `logmask` binary.
//!
//! Every test clears `LOGMASK_RULES` and points `HOME`/`XDG_CONFIG_HOME` at a
//! temporary directory so that a developer's own rule files can never leak
//! into the run.

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

const LOGIN_EVENT: &str =
    r#"{"loginName":"maskingtest","phoneNumber":"9898981212","password":"Masking@123"}"#;
const MASKED_LOGIN_EVENT: &str =
    r#"{"loginName":"maskingtest","phoneNumber":"**********","password":"***********"}"#;
const LOGIN_RULES: &str = r#""password":"(.*?)",("phoneNumber":")(\d+)(")"#;

/// Builds an isolated `logmask` command running inside `home`.
fn logmask_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo_bin!("logmask"));
    cmd.env_remove("LOGMASK_RULES")
        .env_remove("LOGMASK_RULES_DELIMITER")
        .env_remove("RUST_LOG")
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .current_dir(home.path());
    cmd
}

#[test]
fn test_mask_stdin_with_rules_string() -> Result<()> {
    let home = TempDir::new()?;
    logmask_cmd(&home)
        .args(["mask", "--rules", LOGIN_RULES])
        .write_stdin(format!("{}\n", LOGIN_EVENT))
        .assert()
        .success()
        .stdout(format!("{}\n", MASKED_LOGIN_EVENT));
    Ok(())
}

#[test]
fn test_mask_line_buffered() -> Result<()> {
    let home = TempDir::new()?;
    logmask_cmd(&home)
        .args(["mask", "--line-buffered", "--rules", r"pin=(\d+)"])
        .write_stdin("first pin=1234\nsecond line\nthird pin=99\n")
        .assert()
        .success()
        .stdout("first pin=****\nsecond line\nthird pin=**\n");
    Ok(())
}

#[test]
fn test_zero_group_rule_deletes_match() -> Result<()> {
    let home = TempDir::new()?;
    logmask_cmd(&home)
        .args(["mask", "--rules", "9898981212"])
        .write_stdin("call 9898981212 now")
        .assert()
        .success()
        .stdout("call  now");
    Ok(())
}

#[test]
fn test_custom_delimiter_and_mask_char() -> Result<()> {
    let home = TempDir::new()?;
    logmask_cmd(&home)
        .args([
            "mask",
            "--rules",
            r"pin=(\d{2,6});user=(\w+)",
            "--delimiter",
            ";",
            "--mask-char",
            "#",
        ])
        .write_stdin("user=bob pin=4321")
        .assert()
        .success()
        .stdout("user=### pin=####");
    Ok(())
}

#[test]
fn test_rules_from_environment() -> Result<()> {
    let home = TempDir::new()?;
    logmask_cmd(&home)
        .env("LOGMASK_RULES", r"token=(\w+)")
        .arg("mask")
        .write_stdin("token=abc123")
        .assert()
        .success()
        .stdout("token=******");
    Ok(())
}

#[test]
fn test_invalid_pattern_fails_loudly() -> Result<()> {
    let home = TempDir::new()?;
    logmask_cmd(&home)
        .args(["mask", "--rules", r"pin=(\d+),(unbalanced"])
        .write_stdin(LOGIN_EVENT)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Invalid mask pattern '(unbalanced'"));
    Ok(())
}

#[test]
fn test_missing_rules_fails() -> Result<()> {
    let home = TempDir::new()?;
    logmask_cmd(&home)
        .arg("mask")
        .write_stdin(LOGIN_EVENT)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No mask rules configured"));
    Ok(())
}

#[test]
fn test_config_file_with_input_and_output_files() -> Result<()> {
    let home = TempDir::new()?;
    let config_path = home.path().join("rules.yaml");
    fs::write(
        &config_path,
        r#"
rules:
  - name: password
    pattern: '"password":"(.*?)"'
  - name: phone
    pattern: '("phoneNumber":")(\d+)(")'
"#,
    )?;
    let input_path = home.path().join("app.log");
    let output_path = home.path().join("app.masked.log");
    fs::write(&input_path, format!("{}\n", LOGIN_EVENT))?;

    logmask_cmd(&home)
        .arg("mask")
        .arg("--config")
        .arg(&config_path)
        .arg("--input-file")
        .arg(&input_path)
        .arg("--output")
        .arg(&output_path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Writing masked content to file:"));

    assert_eq!(fs::read_to_string(&output_path)?, format!("{}\n", MASKED_LOGIN_EVENT));
    Ok(())
}

#[test]
fn test_quiet_suppresses_output_file_notice() -> Result<()> {
    let home = TempDir::new()?;
    let output_path = home.path().join("out.log");

    logmask_cmd(&home)
        .args(["--quiet", "mask", "--rules", r"pin=(\d+)", "--output"])
        .arg(&output_path)
        .write_stdin("pin=42")
        .assert()
        .success()
        .stderr(predicate::str::is_empty());

    assert_eq!(fs::read_to_string(&output_path)?, "pin=**");
    Ok(())
}

#[test]
fn test_default_rule_file_is_discovered() -> Result<()> {
    let home = TempDir::new()?;
    let rules_dir = home.path().join(".logmask");
    fs::create_dir_all(&rules_dir)?;
    fs::write(rules_dir.join("rules.yaml"), "rules:\n  - pattern: 'pin=(\\d+)'\n")?;

    logmask_cmd(&home)
        .arg("mask")
        .write_stdin("pin=777")
        .assert()
        .success()
        .stdout("pin=***");
    Ok(())
}

#[test]
fn test_check_lists_rules() -> Result<()> {
    let home = TempDir::new()?;
    logmask_cmd(&home)
        .args(["check", "--rules", LOGIN_RULES])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"1. rule_1 [positional, mask '*'] "password":"(.*?)""#))
        .stdout(predicate::str::contains("2. rule_2 [positional, mask '*']"))
        .stderr(predicate::str::contains("2 rule(s) compiled successfully."));
    Ok(())
}

#[test]
fn test_check_rejects_bad_group_reference() -> Result<()> {
    let home = TempDir::new()?;
    let config_path = home.path().join("bad.yaml");
    fs::write(&config_path, "rules:\n  - name: pin\n    pattern: 'pin=(\\d+)'\n    group: 4\n")?;

    logmask_cmd(&home)
        .arg("check")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Rule 'pin'"));
    Ok(())
}

#[test]
fn test_demo_emits_masked_json_event() -> Result<()> {
    let home = TempDir::new()?;
    let output = logmask_cmd(&home)
        .args(["demo", "--rules", LOGIN_RULES])
        .output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let event: Value = serde_json::from_str(stdout.trim())?;
    assert_eq!(event["message"], MASKED_LOGIN_EVENT);
    assert_eq!(event["level"], "INFO");
    assert_eq!(event["logger_name"], "logmask::demo");
    Ok(())
}

#[test]
fn test_demo_custom_field_name() -> Result<()> {
    let home = TempDir::new()?;
    let output = logmask_cmd(&home)
        .args(["demo", "--rules", LOGIN_RULES, "--field-name", "msg"])
        .output()?;
    assert!(output.status.success());

    let event: Value = serde_json::from_str(String::from_utf8(output.stdout)?.trim())?;
    assert_eq!(event["msg"], MASKED_LOGIN_EVENT);
    assert!(event.get("message").is_none());
    Ok(())
}

#[test]
fn test_demo_quiet_emits_nothing() -> Result<()> {
    let home = TempDir::new()?;
    logmask_cmd(&home)
        .args(["demo", "--quiet", "--rules", LOGIN_RULES])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    Ok(())
}

#[test]
fn test_demo_debug_still_emits_event() -> Result<()> {
    let home = TempDir::new()?;
    let output = logmask_cmd(&home)
        .args(["demo", "--debug", "--rules", LOGIN_RULES])
        .output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let event = stdout
        .lines()
        .map(serde_json::from_str::<Value>)
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .find(|event| event["logger_name"] == "logmask::demo")
        .ok_or_else(|| anyhow::anyhow!("demo event missing from output"))?;
    assert_eq!(event["message"], MASKED_LOGIN_EVENT);
    Ok(())
}
