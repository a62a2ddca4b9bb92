//! Preview-time answers keyed by element id.
//!
//! Values are stored as raw JSON; this layer does not check them against the
//! element's declared type. Entries are never pruned when elements are
//! removed, so stale keys can outlive their element.

#[cfg(test)]
#[path = "responses_test.rs"]
mod responses_test;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Mapping from element id to answer value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseStore {
    answers: Map<String, Value>,
}

impl ResponseStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` for `id`, returning the previous answer if any.
    pub fn set(&mut self, id: impl Into<String>, value: Value) -> Option<Value> {
        self.answers.insert(id.into(), value)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Value> {
        self.answers.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.answers.contains_key(id)
    }

    pub fn clear(&mut self) {
        self.answers.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.answers.iter()
    }

    /// Merge every entry of `answers` into the store.
    pub fn extend(&mut self, answers: Map<String, Value>) {
        self.answers.extend(answers);
    }
}

impl From<Map<String, Value>> for ResponseStore {
    fn from(answers: Map<String, Value>) -> Self {
        Self { answers }
    }
}
