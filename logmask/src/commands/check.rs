//! `logmask check`: compiles the configured rules and lists them.

use std::io::{self, Write};

use anyhow::Result;

use logmask_core::Masker;

use super::success_msg;

/// Writes one line per rule: position, name, group selection and pattern.
pub fn write_rule_listing<W: Write>(masker: &Masker, writer: &mut W) -> io::Result<()> {
    for (index, rule) in masker.rules().iter().enumerate() {
        writeln!(
            writer,
            "{:>3}. {} [{}, mask '{}'] {}",
            index + 1,
            rule.name(),
            rule.selection(),
            rule.mask_char(),
            rule.pattern()
        )?;
    }
    Ok(())
}

pub fn run_check(masker: &Masker, quiet: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut writer = stdout.lock();
    write_rule_listing(masker, &mut writer)?;
    writer.flush()?;

    if !quiet {
        success_msg(format!("{} rule(s) compiled successfully.", masker.len()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use logmask_core::MaskingConfig;

    #[test]
    fn lists_rules_in_order() {
        let yaml = r#"
rules:
  - name: password
    pattern: '"password":"(.*?)"'
  - pattern: 'card=(?P<rest>\d+)'
    group: rest
"#;
        let masker = MaskingConfig::from_yaml_str(yaml).unwrap().build_masker().unwrap();
        let mut out = Vec::new();
        write_rule_listing(&masker, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], r#"  1. password [positional, mask '*'] "password":"(.*?)""#);
        assert_eq!(lines[1], r"  2. rule_2 [group 'rest', mask '*'] card=(?P<rest>\d+)");
    }
}
