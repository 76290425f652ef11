//! The transaction record as it is stored and sent over the wire.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A transaction record before normalization.
///
/// Older records carry `total_amount` and `timestamp` where newer ones carry
/// `amount` and `date`. Any field may be missing or hold an unexpected JSON
/// type, and unknown fields (e.g., bill line items) are kept so the record
/// round-trips through a store unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawTransaction(Map<String, Value>);

impl RawTransaction {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value` and return the record.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Set `key` to `value`, replacing any previous value.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_owned(), value.into());
    }

    /// Get the value for `key`. A `null` or blank string value counts as missing.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|value| match value {
            Value::Null => false,
            Value::String(text) => !text.trim().is_empty(),
            _ => true,
        })
    }

    /// Get the value for `primary`, falling back to `fallback` when
    /// `primary` is missing.
    pub fn first_of(&self, primary: &str, fallback: &str) -> Option<&Value> {
        self.get(primary).or_else(|| self.get(fallback))
    }

    /// Get the value for `key` if it is a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// The identifier assigned by the store, if any.
    pub fn id(&self) -> Option<i64> {
        self.get("id").and_then(Value::as_i64)
    }

    /// The underlying JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for RawTransaction {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}

/// Read a JSON value as an amount.
///
/// Numbers are used as is and strings are accepted if they hold a finite
/// decimal number. Returns `None` for everything else.
pub fn parse_amount(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|amount| amount.is_finite()),
        _ => None,
    }
}
