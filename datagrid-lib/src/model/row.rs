//! Dynamic grid row

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use super::Value;

/// A single row of grid data.
///
/// Rows hold cell values as a `HashMap<String, Value>` keyed by column key.
/// Missing keys read as absent, never as an error.
///
/// # Example
///
/// ```
/// use datagrid_lib::model::Row;
///
/// let row = Row::new()
///     .set("id", 1)
///     .set("dept", "A")
///     .set("amt", 10);
///
/// assert_eq!(row.get("dept").and_then(|v| v.as_str()), Some("A"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    fields: HashMap<String, Value>,
}

impl Row {
    /// Creates a new empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field setter.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Inserts a field, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    /// Removes a field, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.remove(key)
    }

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Returns the field value, treating a missing key as [`Value::Null`].
    pub fn value(&self, key: &str) -> &Value {
        static NULL: Value = Value::Null;
        self.fields.get(key).unwrap_or(&NULL)
    }

    /// Returns `true` if the row contains the given key.
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    /// Number of fields in the row.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the row has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Builds a row from a JSON object.
    pub fn from_json(json: serde_json::Value) -> Result<Self, serde_json::Error> {
        let raw: HashMap<String, serde_json::Value> = serde_json::from_value(json)?;
        Ok(Self {
            fields: raw.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
        })
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Stable identity of a row.
///
/// Derived once when a row enters the grid, so it survives re-filtering and
/// re-sorting. See [`RowIdentity`](crate::identity::RowIdentity).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(String);

impl RowId {
    /// Creates a new row id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RowId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RowId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<i64> for RowId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<i32> for RowId {
    fn from(id: i32) -> Self {
        Self(id.to_string())
    }
}

/// A row paired with its identity.
#[derive(Debug, Clone, PartialEq)]
pub struct RowEntry {
    /// Stable identity.
    pub id: RowId,
    /// The row data.
    pub row: Row,
}

impl RowEntry {
    /// Creates a new entry.
    pub fn new(id: impl Into<RowId>, row: Row) -> Self {
        Self { id: id.into(), row }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json() {
        let row = Row::from_json(serde_json::json!({"id": 1, "name": "Ada", "score": 9.5}))
            .expect("object should parse");
        assert_eq!(row.get("id"), Some(&Value::Int(1)));
        assert_eq!(row.get("name"), Some(&Value::from("Ada")));
        assert_eq!(row.get("score"), Some(&Value::Float(9.5)));
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert!(Row::from_json(serde_json::json!([1, 2])).is_err());
    }

    #[test]
    fn test_missing_field_reads_null() {
        let row = Row::new().set("a", 1);
        assert!(row.value("b").is_null());
        assert!(!row.contains("b"));
    }
}
