//! Search domain value objects: normalized backend output

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One search hit: field name → value, in backend order.
///
/// Backends disagree on shape (FOFA returns rows of strings, Hunter returns
/// JSON objects), so a record carries no fixed schema. Insertion order is
/// kept for row-shaped backends where column order is meaningful.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    entries: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a positional row, naming columns from `names`.
    ///
    /// Columns past the end of `names` are keyed by their index.
    pub fn from_row(names: &[String], row: Vec<Value>) -> Self {
        let entries = row
            .into_iter()
            .enumerate()
            .map(|(i, value)| {
                let key = names.get(i).cloned().unwrap_or_else(|| i.to_string());
                (key, value)
            })
            .collect();
        Self { entries }
    }

    pub fn from_object(object: serde_json::Map<String, Value>) -> Self {
        Self {
            entries: object.into_iter().collect(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.push((key.into(), value.into()));
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A logical failure reported by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendFailure {
    pub code: i64,
    pub message: String,
}

/// Normalized result of one search call.
///
/// `total_count` is whatever the backend reports as the total; `records` is
/// only the returned page, so the two are independent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub total_count: u64,
    pub records: Vec<Record>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend_error: Option<BackendFailure>,
}

impl SearchResponse {
    pub fn success(total_count: u64, records: Vec<Record>) -> Self {
        Self {
            total_count,
            records,
            backend_error: None,
        }
    }

    pub fn failure(code: i64, message: impl Into<String>) -> Self {
        Self {
            total_count: 0,
            records: Vec::new(),
            backend_error: Some(BackendFailure {
                code,
                message: message.into(),
            }),
        }
    }

    pub fn is_success(&self) -> bool {
        self.backend_error.is_none()
    }
}
