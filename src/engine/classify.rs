// src/engine/classify.rs
// Field-name gating: decides whether a string reached through `key` may be a
// participant name. Keeps e.g. a coach who shares a competitor's name out of
// the matched set.

use crate::config::consts::{DEFAULT_NEGATIVE_TOKENS, DEFAULT_POSITIVE_TOKENS};

pub trait FieldClassifier: Send + Sync {
    fn is_name_field(&self, key: &str) -> bool;
}

/// Every field is eligible. Plain text matching.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnyField;

impl FieldClassifier for AnyField {
    fn is_name_field(&self, _key: &str) -> bool {
        true
    }
}

/// Substring keyword lists over the lowercased key.
/// Eligible iff some positive token occurs and no negative token does.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeywordClassifier {
    positive: Vec<String>,
    negative: Vec<String>,
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new(
            DEFAULT_POSITIVE_TOKENS.iter().copied(),
            DEFAULT_NEGATIVE_TOKENS.iter().copied(),
        )
    }
}

impl KeywordClassifier {
    pub fn new<P, N>(positive: P, negative: N) -> Self
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        N: IntoIterator,
        N::Item: AsRef<str>,
    {
        Self {
            positive: lower_tokens(positive),
            negative: lower_tokens(negative),
        }
    }

    pub fn positive(&self) -> &[String] { &self.positive }
    pub fn negative(&self) -> &[String] { &self.negative }
}

fn lower_tokens<I>(tokens: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|t| t.as_ref().trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

impl FieldClassifier for KeywordClassifier {
    fn is_name_field(&self, key: &str) -> bool {
        let key = key.to_lowercase();
        self.positive.iter().any(|t| key.contains(t.as_str()))
            && !self.negative.iter().any(|t| key.contains(t.as_str()))
    }
}
