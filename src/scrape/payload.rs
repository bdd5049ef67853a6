// src/scrape/payload.rs
use serde_json::Value;

use crate::core::sanitize::strip_bom;
use crate::error::{Error, Result};

/// One parsed JSON document and where it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct Payload {
    pub origin: String,
    pub value: Value,
}

impl Payload {
    /// Parse `text`; anything that is not JSON becomes `MalformedPayload`
    /// with a bounded excerpt of the body. serde_json's recursion limit
    /// applies: documents nested more than 128 levels deep are rejected.
    pub fn parse(origin: impl Into<String>, text: &str) -> Result<Self> {
        let origin = origin.into();
        match serde_json::from_str(strip_bom(text).trim()) {
            Ok(value) => Ok(Self { origin, value }),
            Err(e) => Err(Error::malformed(origin, e, text)),
        }
    }

    /// `next` link of a `{results, next}` envelope. Null, empty, or missing → None.
    pub fn next_link(&self) -> Option<&str> {
        self.value
            .get("next")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Number of participant records: a bare array's length, or the length
    /// of an envelope's `results`. Other shapes count as one record.
    pub fn record_count(&self) -> usize {
        match &self.value {
            Value::Array(items) => items.len(),
            Value::Object(map) => match map.get("results") {
                Some(Value::Array(items)) => items.len(),
                _ => 1,
            },
            _ => 0,
        }
    }
}
