// src/engine/sets.rs
use std::collections::HashSet;

/// Canonical roster keys. Membership oracle for the walker.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LookupSet(HashSet<String>);

impl LookupSet {
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains(key)
    }
    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl<S: Into<String>> FromIterator<S> for LookupSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Canonical keys confirmed present in at least one payload.
/// Insert-only: the run coordinator owns one and feeds every payload into it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchedSet(HashSet<String>);

impl MatchedSet {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, key: String) -> bool {
        self.0.insert(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains(key)
    }

    /// Set union; order of merging does not matter.
    pub fn merge(&mut self, other: MatchedSet) {
        self.0.extend(other.0);
    }

    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Keys in sorted order, for stable logging and tests.
    pub fn sorted(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.0.iter().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

impl<S: Into<String>> FromIterator<S> for MatchedSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
