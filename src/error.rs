// src/error.rs
//! Error surface of a run.
//!
//! The engine itself is infallible; everything here comes from acquiring
//! payloads, reading the roster, or writing the report.
//!
//! | Error | Fatal? |
//! |-------|--------|
//! | [`Acquisition`](Error::Acquisition) | yes, no report is written |
//! | [`MalformedPayload`](Error::MalformedPayload) | for that payload; the run aborts only if no payload parsed |
//! | [`Http`](Error::Http) / [`Pagination`](Error::Pagination) | yes, wrapped into `Acquisition` by the runner |
//! | [`Io`](Error::Io) | yes |
//! | [`Config`](Error::Config) | yes |
//!
//! An empty roster is not an error: it produces a header-only report.
use std::path::PathBuf;

use thiserror::Error;

use crate::config::consts::EXCERPT_CHARS;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// No usable payload was obtained. Writing an all-NO report here would
    /// look exactly like an empty participant list.
    #[error("no JSON payload obtained: {0}")]
    Acquisition(String),

    #[error("payload from {origin} is not valid JSON ({reason}); starts with: {excerpt:?}")]
    MalformedPayload {
        origin: String,
        reason: String,
        excerpt: String,
    },

    #[error("request to {url} failed: {reason}")]
    Http { url: String, reason: String },

    #[error("pagination stopped at {url}: {reason}")]
    Pagination { url: String, reason: String },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Config(String),
}

impl Error {
    /// Build a `MalformedPayload`, keeping only a bounded excerpt of `raw`.
    pub fn malformed(origin: impl Into<String>, reason: impl ToString, raw: &str) -> Self {
        Error::MalformedPayload {
            origin: origin.into(),
            reason: reason.to_string(),
            excerpt: crate::core::sanitize::excerpt(raw, EXCERPT_CHARS),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Error::MalformedPayload { .. })
    }
}
