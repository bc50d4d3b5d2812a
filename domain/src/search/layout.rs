//! Record layouts
//!
//! A backend declares how its records become report lines. The formatter
//! only interprets the layout; it never assumes which keys a record has.

use super::value_objects::Record;
use serde_json::Value;

/// Separator used between values on a report line.
pub const FIELD_SEPARATOR: &str = " | ";

/// A named field rendered with a fixed label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledField {
    pub key: String,
    pub label: String,
}

impl LabeledField {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// How one record is rendered as a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordLayout {
    /// Every value of the record, in record order, joined by `separator`
    AllFields { separator: String },
    /// A fixed subset of keys, each as `label: value`, joined by `separator`
    Labeled {
        fields: Vec<LabeledField>,
        separator: String,
    },
}

impl RecordLayout {
    pub fn all_fields() -> Self {
        RecordLayout::AllFields {
            separator: FIELD_SEPARATOR.to_string(),
        }
    }

    pub fn labeled(fields: impl IntoIterator<Item = LabeledField>) -> Self {
        RecordLayout::Labeled {
            fields: fields.into_iter().collect(),
            separator: FIELD_SEPARATOR.to_string(),
        }
    }

    /// Render one record. Missing keys render as empty text.
    pub fn render_line(&self, record: &Record) -> String {
        match self {
            RecordLayout::AllFields { separator } => record
                .values()
                .map(display_value)
                .collect::<Vec<_>>()
                .join(separator),
            RecordLayout::Labeled { fields, separator } => fields
                .iter()
                .map(|f| {
                    let value = record.get(&f.key).map(display_value).unwrap_or_default();
                    format!("{}: {}", f.label, value)
                })
                .collect::<Vec<_>>()
                .join(separator),
        }
    }
}

/// Plain-text form of a JSON value: strings unquoted, null empty.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
