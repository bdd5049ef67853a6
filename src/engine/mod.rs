// src/engine/mod.rs
//! # Name-matching engine
//!
//! Pure, synchronous, no I/O. Everything here works on in-memory data and
//! cannot fail; acquisition and file handling live in `scrape`, `file` and
//! `runner`.
//!
//! ```text
//! roster text ──Roster::parse──▶ Roster ──lookup()──▶ LookupSet
//!                                   │                    │
//! payload(s) ─────────────▶ Matcher::collect_into ───────┘
//!                                   │
//!                                   ▼
//!                               MatchedSet ──Roster::reconcile──▶ Vec<ReportRow>
//! ```
//!
//! A `Matcher` bundles the two knobs that make up a matching strategy: the
//! `Canonicalizer` (strict / loose keys, optional case folding) and a
//! `FieldClassifier` (which JSON fields may hold participant names).
pub mod canon;
pub mod classify;
pub mod roster;
pub mod sets;
pub mod walk;

pub use canon::{CanonMode, Canonicalizer};
pub use classify::{AnyField, FieldClassifier, KeywordClassifier};
pub use roster::{reconcile, ReportRow, Roster, RosterEntry};
pub use sets::{LookupSet, MatchedSet};
pub use walk::Matcher;
