//! Structured context attached to log records

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ordered key-value data attached to a single log event.
///
/// Keys keep their insertion order so enrichment steps produce stable
/// output. Values are arbitrary JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context {
    entries: IndexMap<String, Value>,
}

impl Context {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a key, replacing any previous value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Builder-style variant of [`set`](Self::set)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Look up a key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Remove a key, returning its value if present
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the context holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge another context into this one; keys from `other` win
    pub fn merge(&mut self, other: &Context) {
        for (key, value) in &other.entries {
            self.entries.insert(key.clone(), value.clone());
        }
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl From<IndexMap<String, Value>> for Context {
    fn from(entries: IndexMap<String, Value>) -> Self {
        Self { entries }
    }
}

impl FromIterator<(String, Value)> for Context {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Extend<(String, Value)> for Context {
    fn extend<I: IntoIterator<Item = (String, Value)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_insertion_order() {
        let mut ctx = Context::new();
        ctx.set("zebra", 1);
        ctx.set("apple", 2);
        ctx.set("mango", 3);

        let keys: Vec<_> = ctx.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn merge_overwrites_with_other() {
        let mut base = Context::new().with("user", "alice").with("request", 7);
        let patch = Context::new().with("user", "bob");
        base.merge(&patch);

        assert_eq!(base.get("user"), Some(&json!("bob")));
        assert_eq!(base.get("request"), Some(&json!(7)));
        assert_eq!(base.len(), 2);
    }

    #[test]
    fn serializes_as_plain_object() {
        let ctx = Context::new().with("id", 42);
        let json = serde_json::to_value(&ctx).unwrap();
        assert_eq!(json, json!({"id": 42}));
    }
}
