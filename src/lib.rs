// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod cli;
pub mod config;
pub mod core;
pub mod csv;
pub mod engine;
pub mod error;
pub mod file;
pub mod progress;
pub mod runner;
pub mod scrape;

pub use engine::{Canonicalizer, KeywordClassifier, Matcher, MatchedSet, Roster};
pub use error::{Error, Result};
