//! Value enum for dynamic cell values

use std::borrow::Cow;
use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// A dynamic value held by a single cell.
///
/// Rows are opaque mappings from column key to `Value`; the engine never
/// assumes a fixed row shape beyond the configured columns.
///
/// # Numeric access
///
/// Two flavours of numeric access exist:
///
/// - [`as_f64`](Value::as_f64) is strict and only accepts `Int`/`Float`. It is
///   used by aggregation and by sorting.
/// - [`coerce_number`](Value::coerce_number) also parses numeric strings. It is
///   used by filter comparison so that a typed-in `"15"` compares numerically
///   against a cell holding `15`.
///
/// # Example
///
/// ```
/// use datagrid_lib::model::Value;
///
/// assert_eq!(Value::from(15).as_f64(), Some(15.0));
/// assert_eq!(Value::from("15").as_f64(), None);
/// assert_eq!(Value::from("15").coerce_number(), Some(15.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null/absent value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// String value.
    String(String),
    /// Timestamp, built from a `DateTime<Utc>`.
    ///
    /// Serializes as RFC 3339. Deserialized strings always stay `String`, so
    /// text filters see exactly the text that arrived.
    DateTime(DateTime<Utc>),
    /// Fallback for arrays, objects and anything else.
    Json(serde_json::Value),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null | Value::Json(serde_json::Value::Null))
    }

    /// Returns `true` for values a filter treats as "no value entered".
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            Value::Json(serde_json::Value::Null) => true,
            Value::Json(serde_json::Value::String(s)) => s.is_empty(),
            Value::Json(serde_json::Value::Array(items)) => items.is_empty(),
            _ => false,
        }
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::DateTime(_) => "datetime",
            Value::String(_) => "string",
            Value::Json(_) => "json",
        }
    }

    /// Returns the numeric value for `Int` and `Float` only.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) if !v.is_nan() => Some(*v),
            Value::Json(serde_json::Value::Number(n)) => n.as_f64(),
            _ => None,
        }
    }

    /// Coerces the value to a number, parsing numeric strings.
    ///
    /// Empty and whitespace-only strings do not coerce.
    pub fn coerce_number(&self) -> Option<f64> {
        if let Some(n) = self.as_f64() {
            return Some(n);
        }
        let text = match self {
            Value::String(s) => s.as_str(),
            Value::Json(serde_json::Value::String(s)) => s.as_str(),
            _ => return None,
        };
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        text.parse::<f64>().ok().filter(|n| n.is_finite())
    }

    /// Returns the string form used by text comparisons and grouping.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Value::Null => Cow::Borrowed(""),
            Value::Bool(b) => Cow::Owned(b.to_string()),
            Value::Int(v) => Cow::Owned(v.to_string()),
            Value::Float(v) => Cow::Owned(v.to_string()),
            Value::DateTime(dt) => Cow::Owned(dt.to_rfc3339()),
            Value::String(s) => Cow::Borrowed(s),
            Value::Json(serde_json::Value::String(s)) => Cow::Borrowed(s),
            Value::Json(serde_json::Value::Null) => Cow::Borrowed(""),
            Value::Json(other) => Cow::Owned(other.to_string()),
        }
    }

    /// Returns the string value, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n
                    .as_f64()
                    .map(Value::Float)
                    .unwrap_or(Value::Json(serde_json::Value::Number(n))),
            },
            serde_json::Value::String(s) => Value::String(s),
            other => Value::Json(other),
        }
    }
}
