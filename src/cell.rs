/// Flat export values
///
/// Vendor responses mix scalars, lists and nested objects. Everything is
/// flattened into a `Cell` before it reaches an exporter, so CSV and
/// spreadsheet cells never hold nested structures.
use serde_json::{Number, Value};
use std::fmt;

/// Sentinel written wherever a value is absent
pub const MISSING: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Cell {
    Missing,
    Text(String),
    Number(Number),
    Bool(bool),
}

impl Cell {
    /// Flatten a JSON value.
    ///
    /// Arrays become a ", "-joined string (strings raw, other elements as
    /// compact JSON), objects become compact JSON text, null becomes
    /// `Missing`, and scalars pass through unchanged.
    pub fn from_json(value: &Value) -> Cell {
        match value {
            Value::Null => Cell::Missing,
            Value::String(s) => Cell::Text(s.clone()),
            Value::Number(n) => Cell::Number(n.clone()),
            Value::Bool(b) => Cell::Bool(*b),
            Value::Array(items) => {
                let parts: Vec<String> = items.iter().map(element_text).collect();
                Cell::Text(parts.join(", "))
            }
            Value::Object(_) => Cell::Text(value.to_string()),
        }
    }

    /// Flatten an optional field; absent fields become `Missing`
    pub fn from_field(value: Option<&Value>) -> Cell {
        value.map(Cell::from_json).unwrap_or(Cell::Missing)
    }

    pub fn text(s: impl Into<String>) -> Cell {
        Cell::Text(s.into())
    }
}

fn element_text(item: &Value) -> String {
    match item {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Missing => f.write_str(MISSING),
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Truthiness of an optional JSON flag (null, false, 0, "" and empty
/// containers are false)
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}
