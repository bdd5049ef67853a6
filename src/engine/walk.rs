// src/engine/walk.rs
// Explicit-stack walk over a JSON payload, collecting roster names.

use serde_json::Value;

use super::canon::Canonicalizer;
use super::classify::{AnyField, FieldClassifier};
use super::sets::{LookupSet, MatchedSet};

/// Matching strategy: how strings are keyed and which fields may hold names.
pub struct Matcher {
    canon: Canonicalizer,
    classifier: Box<dyn FieldClassifier>,
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(Canonicalizer::default(), AnyField)
    }
}

impl Matcher {
    pub fn new(canon: Canonicalizer, classifier: impl FieldClassifier + 'static) -> Self {
        Self { canon, classifier: Box::new(classifier) }
    }

    pub fn canonicalizer(&self) -> &Canonicalizer {
        &self.canon
    }

    pub fn canonicalize(&self, raw: &str) -> String {
        self.canon.canonicalize(raw)
    }

    pub fn eligible(&self, key: &str) -> bool {
        self.classifier.is_name_field(key)
    }

    /// Walk `root` and return the roster keys it contains.
    pub fn extract_matches(&self, root: &Value, lookup: &LookupSet) -> MatchedSet {
        let mut out = MatchedSet::new();
        self.collect_into(root, lookup, &mut out);
        out
    }

    /// Walk `root`, adding every eligible string whose canonical form is in
    /// `lookup` to `matched`. Returns how many keys were new.
    ///
    /// Array elements inherit the key the array was reached through; the root
    /// is reached through `""`.
    pub fn collect_into(&self, root: &Value, lookup: &LookupSet, matched: &mut MatchedSet) -> usize {
        if lookup.is_empty() {
            return 0;
        }
        let mut added = 0;
        let mut stack: Vec<(&str, &Value)> = vec![("", root)];

        while let Some((key, cur)) = stack.pop() {
            match cur {
                Value::String(s) => {
                    if !self.eligible(key) { continue; }
                    let c = self.canonicalize(s);
                    if !c.is_empty() && lookup.contains(&c) && matched.insert(c) {
                        added += 1;
                    }
                }
                Value::Array(items) => {
                    stack.extend(items.iter().map(|v| (key, v)));
                }
                Value::Object(map) => {
                    stack.extend(map.iter().map(|(k, v)| (k.as_str(), v)));
                }
                Value::Null | Value::Bool(_) | Value::Number(_) => {}
            }
        }
        added
    }
}
