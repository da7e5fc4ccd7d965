//! Sensitive-field redaction
//!
//! Strips credential-bearing values from objects before they reach logs or
//! trace output. Matching is by key substring: any entry whose key contains
//! one of the configured fragments has its entire value, subtree included,
//! replaced by the redaction placeholder.

use serde_json::{Map, Value};

/// Key fragments redacted by default.
pub const REDACTED_FIELDS: [&str; 4] = ["password", "private", "secret", "token"];

const PLACEHOLDER: &str = "REDACTED";

/// Redacts object entries whose keys contain configured fragments.
#[derive(Debug, Clone)]
pub struct Redactor {
    keys: Vec<String>,
}

impl Redactor {
    /// Builds a redactor for the given key fragments.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns a redacted copy of the value; the input is not mutated.
    pub fn redact(&self, data: &Value) -> Value {
        match data {
            Value::Object(map) => {
                let redacted: Map<String, Value> = map
                    .iter()
                    .map(|(key, value)| {
                        if self.is_sensitive(key) {
                            (key.clone(), Value::String(PLACEHOLDER.to_string()))
                        } else {
                            (key.clone(), self.redact(value))
                        }
                    })
                    .collect();
                Value::Object(redacted)
            }
            Value::Array(items) => {
                Value::Array(items.iter().map(|item| self.redact(item)).collect())
            }
            other => other.clone(),
        }
    }

    fn is_sensitive(&self, key: &str) -> bool {
        self.keys.iter().any(|fragment| key.contains(fragment.as_str()))
    }
}

impl Default for Redactor {
    fn default() -> Self {
        Self::new(REDACTED_FIELDS)
    }
}

/// Redacts with the default field set.
pub fn redact(data: &Value) -> Value {
    Redactor::default().redact(data)
}
