//! FILENAME: grid-model/src/value.rs
//! PURPOSE: The scalar payload carried by data cells and label cells.
//! CONTEXT: Values are opaque to the layout engine. They are copied into the
//! flattened output untouched; `display_value` exists for renderers that
//! only deal in text.

use serde::{Deserialize, Serialize};
use crate::label::Label;

/// The value shown in a single cell of the output grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum Value {
    #[default]
    Empty,
    Number(f64),
    Text(String),
    Boolean(bool),
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    /// Returns the value as text.
    /// Non-finite numbers render as "NaN" / "inf" / "-inf" so spreadsheet
    /// writers never receive a float they cannot store.
    pub fn display_value(&self) -> String {
        match self {
            Value::Empty => String::new(),
            Value::Number(n) => {
                if n.is_nan() {
                    "NaN".to_string()
                } else if n.is_infinite() {
                    String::from(if *n > 0.0 { "inf" } else { "-inf" })
                } else if n.fract() == 0.0 && n.abs() < 1e15 {
                    // Format without unnecessary decimal places
                    format!("{:.0}", n)
                } else {
                    format!("{}", n)
                }
            }
            Value::Text(s) => s.clone(),
            Value::Boolean(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&Label> for Value {
    fn from(label: &Label) -> Self {
        match label {
            Label::Text(s) => Value::Text(s.clone()),
            Label::Integer(i) => Value::Number(*i as f64),
            Label::Boolean(b) => Value::Boolean(*b),
        }
    }
}
