// src/engine/roster.rs
use super::canon::Canonicalizer;
use super::sets::{LookupSet, MatchedSet};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RosterEntry {
    /// Trimmed input line, as it appears in the report.
    pub raw: String,
    pub canonical_key: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportRow {
    pub display: String,
    pub found: bool,
}

/// Candidate names in input order. Duplicates are kept.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Roster {
    entries: Vec<RosterEntry>,
}

impl Roster {
    /// One entry per non-blank line (CRLF tolerant), trimmed.
    pub fn parse(text: &str, canon: &Canonicalizer) -> Self {
        let entries = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| RosterEntry {
                raw: line.to_string(),
                canonical_key: canon.canonicalize(line),
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[RosterEntry] { &self.entries }
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn lookup(&self) -> LookupSet {
        self.entries
            .iter()
            .map(|e| e.canonical_key.as_str())
            .filter(|k| !k.is_empty())
            .collect()
    }

    pub fn reconcile(&self, matched: &MatchedSet) -> Vec<ReportRow> {
        reconcile(&self.entries, matched)
    }
}

/// Exactly one row per entry, in order.
pub fn reconcile(roster: &[RosterEntry], matched: &MatchedSet) -> Vec<ReportRow> {
    roster
        .iter()
        .map(|e| ReportRow {
            display: e.raw.clone(),
            found: matched.contains(&e.canonical_key),
        })
        .collect()
}
