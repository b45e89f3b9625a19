//! masker.rs - Ordered application of mask rules.
//!
//! A `Masker` owns an immutable, ordered list of `MaskRule`s. Each rule sees
//! the output of the rule before it, so rule order is part of the
//! configuration. Masking is a single pass over the rules; the result is not
//! re-fed until it stops changing.
//!
//! License: MIT OR APACHE 2.0

use std::borrow::Cow;
use std::sync::Arc;

use log::debug;

use crate::errors::LogmaskError;
use crate::rule::MaskRule;

/// An immutable, ordered set of compiled mask rules.
///
/// `Masker` is `Send + Sync` and cheap to clone; share one instance between
/// threads instead of rebuilding it.
#[derive(Debug, Clone)]
pub struct Masker {
    rules: Arc<[MaskRule]>,
}

impl Masker {
    /// Builds a masker from already compiled rules.
    ///
    /// The slice is copied, so later changes to the caller's collection do not
    /// affect this masker.
    pub fn new(rules: &[MaskRule]) -> Self {
        Self {
            rules: Arc::from(rules.to_vec()),
        }
    }

    /// Compiles every pattern, in order, with the positional group policy.
    ///
    /// Compilation stops at the first invalid pattern and its error is
    /// returned; no partially built masker is ever produced.
    pub fn create<I, S>(patterns: I) -> Result<Self, LogmaskError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rules = patterns
            .into_iter()
            .map(|pattern| MaskRule::compile(pattern.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        debug!("Created masker with {} rule(s).", rules.len());
        Ok(Self {
            rules: Arc::from(rules),
        })
    }

    /// Applies every rule in configured order, threading the output of each
    /// rule into the next.
    pub fn mask(&self, text: &str) -> String {
        let mut transformed = Cow::Borrowed(text);
        for rule in self.rules.iter() {
            let next = match rule.apply(&transformed) {
                Cow::Borrowed(_) => continue,
                Cow::Owned(next) => next,
            };
            transformed = Cow::Owned(next);
        }
        transformed.into_owned()
    }

    pub fn rules(&self) -> &[MaskRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for Masker {
    fn default() -> Self {
        Self::from(Vec::new())
    }
}

impl From<Vec<MaskRule>> for Masker {
    fn from(rules: Vec<MaskRule>) -> Self {
        Self {
            rules: Arc::from(rules),
        }
    }
}
