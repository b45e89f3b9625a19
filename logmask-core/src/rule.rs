//! rule.rs - A single compiled mask rule.
//!
//! A `MaskRule` pairs a compiled regular expression with a policy that picks
//! which part of each match holds the sensitive value. The selected text is
//! overwritten with a run of mask characters of the same length; everything
//! outside the selected span is copied through untouched.
//!
//! License: MIT OR APACHE 2.0

use std::borrow::Cow;
use std::fmt;

use log::debug;
use regex::{Captures, Match, Regex, RegexBuilder};

use crate::errors::LogmaskError;

/// Maximum allowed length for a mask pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// The character used to build masks when none is configured.
pub const DEFAULT_MASK_CHAR: char = '*';

/// Group masked under `GroupSelection::Positional` when a pattern defines
/// more than one capture group.
pub const POSITIONAL_GROUP: usize = 2;

const REGEX_SIZE_LIMIT: usize = 10 * (1 << 20);

/// Decides which part of a match is replaced by mask characters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GroupSelection {
    /// Compatibility mode: group 2 if the pattern has more than one group,
    /// group 1 if it has exactly one, and nothing if it has none. With no
    /// groups the whole match is deleted rather than masked.
    #[default]
    Positional,
    /// Mask the capture group with this index. Index 0 masks the whole match.
    Index(usize),
    /// Mask the named capture group.
    Named(String),
}

impl fmt::Display for GroupSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupSelection::Positional => write!(f, "positional"),
            GroupSelection::Index(i) => write!(f, "group {}", i),
            GroupSelection::Named(name) => write!(f, "group '{}'", name),
        }
    }
}

/// A compiled, immutable mask rule.
///
/// Cloning is cheap: the compiled program inside `Regex` is reference counted.
#[derive(Debug, Clone)]
pub struct MaskRule {
    name: String,
    regex: Regex,
    selection: GroupSelection,
    mask_char: char,
}

impl MaskRule {
    /// Compiles `pattern` with the positional group policy and the default
    /// mask character. The pattern doubles as the rule name.
    pub fn compile(pattern: &str) -> Result<Self, LogmaskError> {
        Self::compile_with(pattern, pattern, GroupSelection::Positional, DEFAULT_MASK_CHAR)
    }

    /// Compiles a rule with an explicit name, group selection and mask character.
    ///
    /// Fails if the pattern is too long, does not compile, or if `selection`
    /// refers to a group the pattern does not define.
    pub fn compile_with(
        name: &str,
        pattern: &str,
        selection: GroupSelection,
        mask_char: char,
    ) -> Result<Self, LogmaskError> {
        if pattern.len() > MAX_PATTERN_LENGTH {
            return Err(LogmaskError::PatternLengthExceeded(
                pattern.to_string(),
                pattern.len(),
                MAX_PATTERN_LENGTH,
            ));
        }

        let regex = RegexBuilder::new(pattern)
            .size_limit(REGEX_SIZE_LIMIT)
            .build()
            .map_err(|e| LogmaskError::InvalidPattern(pattern.to_string(), e))?;

        let available = regex.captures_len() - 1;
        match &selection {
            GroupSelection::Positional => {}
            GroupSelection::Index(group) if *group > available => {
                return Err(LogmaskError::GroupOutOfRange {
                    pattern: pattern.to_string(),
                    group: *group,
                    available,
                });
            }
            GroupSelection::Index(_) => {}
            GroupSelection::Named(group_name) => {
                if !regex.capture_names().flatten().any(|n| n == group_name) {
                    return Err(LogmaskError::UnknownGroupName {
                        pattern: pattern.to_string(),
                        name: group_name.clone(),
                    });
                }
            }
        }

        debug!(
            target: "logmask_core::rule",
            "Rule '{}' compiled successfully ({} capture group(s), {}).",
            name, available, selection
        );

        Ok(Self {
            name: name.to_string(),
            regex,
            selection,
            mask_char,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    pub fn selection(&self) -> &GroupSelection {
        &self.selection
    }

    pub fn mask_char(&self) -> char {
        self.mask_char
    }

    /// Number of capture groups the pattern defines, not counting the implicit
    /// whole-match group.
    pub fn group_count(&self) -> usize {
        self.regex.captures_len() - 1
    }

    /// Masks every non-overlapping match in `text`.
    ///
    /// For each match the selected group is replaced by `mask_char` repeated
    /// once per character of the group. When no group is selected (a pattern
    /// without groups, or a group that did not participate in the match) the
    /// whole match is replaced by an empty mask, i.e. removed.
    ///
    /// Returns the input unchanged, without allocating, when nothing matches.
    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        let mut matches = self.regex.captures_iter(text).peekable();
        if matches.peek().is_none() {
            return Cow::Borrowed(text);
        }

        let mut masked = String::with_capacity(text.len());
        let mut last_end = 0usize;

        for caps in matches {
            let Some(whole) = caps.get(0) else { continue };
            let (span, data) = match self.selected_group(&caps) {
                Some(group) => (group.range(), group.as_str()),
                None => (whole.range(), ""),
            };
            masked.push_str(&text[last_end..span.start]);
            masked.extend(std::iter::repeat(self.mask_char).take(data.chars().count()));
            last_end = span.end;
        }

        masked.push_str(&text[last_end..]);
        Cow::Owned(masked)
    }

    fn selected_group<'h>(&self, caps: &Captures<'h>) -> Option<Match<'h>> {
        match &self.selection {
            GroupSelection::Positional => match self.group_count() {
                0 => None,
                1 => caps.get(1),
                _ => caps.get(POSITIONAL_GROUP),
            },
            GroupSelection::Index(group) => caps.get(*group),
            GroupSelection::Named(group_name) => caps.name(group_name),
        }
    }
}
