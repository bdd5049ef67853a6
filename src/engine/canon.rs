// src/engine/canon.rs
// Display name -> comparison key.

use crate::config::consts::DEFAULT_SEPARATORS;
use crate::core::sanitize::normalize_ws;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CanonMode {
    /// Drop every whitespace character: "홍 길동" == "홍길동".
    Strict,
    /// Strip separator characters, then collapse whitespace runs to one space.
    Loose,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canonicalizer {
    pub mode: CanonMode,
    /// Only consulted in `Loose` mode.
    pub separators: Vec<char>,
    pub fold_case: bool,
}

impl Default for Canonicalizer {
    fn default() -> Self {
        Self::strict()
    }
}

impl Canonicalizer {
    pub fn strict() -> Self {
        Self {
            mode: CanonMode::Strict,
            separators: DEFAULT_SEPARATORS.to_vec(),
            fold_case: false,
        }
    }

    pub fn loose() -> Self {
        Self { mode: CanonMode::Loose, ..Self::strict() }
    }

    pub fn with_separators(mut self, separators: impl IntoIterator<Item = char>) -> Self {
        self.separators = separators.into_iter().collect();
        self
    }

    pub fn with_fold_case(mut self, fold_case: bool) -> Self {
        self.fold_case = fold_case;
        self
    }

    /// Total and idempotent: `canonicalize(canonicalize(s)) == canonicalize(s)`.
    /// Case is folded before anything is stripped, so a separator can never
    /// reappear as the lowercase form of a kept character.
    pub fn canonicalize(&self, raw: &str) -> String {
        let folded;
        let text = if self.fold_case {
            folded = raw.to_lowercase();
            folded.as_str()
        } else {
            raw
        };
        match self.mode {
            CanonMode::Strict => text.chars().filter(|c| !c.is_whitespace()).collect(),
            CanonMode::Loose => {
                let stripped: String = text
                    .chars()
                    .filter(|c| !self.separators.contains(c))
                    .collect();
                normalize_ws(&stripped)
            }
        }
    }

    /// Missing values canonicalize to the empty key.
    pub fn canonicalize_opt(&self, raw: Option<&str>) -> String {
        raw.map(|s| self.canonicalize(s)).unwrap_or_default()
    }
}
