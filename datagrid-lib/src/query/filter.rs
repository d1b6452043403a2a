//! Per-column filter predicates.

use std::cmp::Ordering;

use serde::Deserialize;
use serde::Serialize;

use crate::model::Row;
use crate::model::Value;

/// Comparison applied by a filter.
///
/// Unrecognised operator names deserialize to [`FilterOperator::Unsupported`],
/// which never excludes a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperator {
    Equals,
    Contains,
    StartsWith,
    EndsWith,
    Gt,
    Lt,
    Gte,
    Lte,
    #[serde(other)]
    Unsupported,
}

impl FilterOperator {
    /// Parses an operator name; unknown names map to `Unsupported`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "equals" => Self::Equals,
            "contains" => Self::Contains,
            "startsWith" => Self::StartsWith,
            "endsWith" => Self::EndsWith,
            "gt" => Self::Gt,
            "lt" => Self::Lt,
            "gte" => Self::Gte,
            "lte" => Self::Lte,
            _ => Self::Unsupported,
        }
    }

    /// Returns the wire name of this operator.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::Contains => "contains",
            Self::StartsWith => "startsWith",
            Self::EndsWith => "endsWith",
            Self::Gt => "gt",
            Self::Lt => "lt",
            Self::Gte => "gte",
            Self::Lte => "lte",
            Self::Unsupported => "unsupported",
        }
    }
}

impl From<&str> for FilterOperator {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

/// An active filter on one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterValue {
    pub key: String,
    pub value: Value,
    pub operator: FilterOperator,
}

impl FilterValue {
    pub fn new(key: impl Into<String>, value: impl Into<Value>, operator: FilterOperator) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            operator,
        }
    }
}

/// Returns `true` if `row` passes a single filter.
///
/// Empty filter values and unsupported operators always pass.
pub fn passes(row: &Row, filter: &FilterValue) -> bool {
    if filter.value.is_empty() {
        return true;
    }
    let cell = row.value(&filter.key);

    match filter.operator {
        FilterOperator::Unsupported => true,
        FilterOperator::Contains => lower(cell).contains(&lower(&filter.value)),
        FilterOperator::StartsWith => lower(cell).starts_with(&lower(&filter.value)),
        FilterOperator::EndsWith => lower(cell).ends_with(&lower(&filter.value)),
        FilterOperator::Equals => compare_for_filter(cell, &filter.value) == Ordering::Equal,
        FilterOperator::Gt => compare_for_filter(cell, &filter.value) == Ordering::Greater,
        FilterOperator::Lt => compare_for_filter(cell, &filter.value) == Ordering::Less,
        FilterOperator::Gte => compare_for_filter(cell, &filter.value) != Ordering::Less,
        FilterOperator::Lte => compare_for_filter(cell, &filter.value) != Ordering::Greater,
    }
}

/// Returns `true` if `row` passes every filter (logical AND).
pub fn passes_all(row: &Row, filters: &[FilterValue]) -> bool {
    filters.iter().all(|f| passes(row, f))
}

fn lower(value: &Value) -> String {
    value.as_text().to_lowercase()
}

/// Numeric when both sides coerce to numbers, else case-insensitive text.
fn compare_for_filter(cell: &Value, operand: &Value) -> Ordering {
    match (cell.coerce_number(), operand.coerce_number()) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        _ => lower(cell).cmp(&lower(operand)),
    }
}

/// Holds at most one filter per column key.
///
/// Insertion order is kept so the active filters can be shown as chips in the
/// order the user added them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterStore {
    filters: Vec<FilterValue>,
}

impl FilterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upserts a filter, or removes it when `value` is empty.
    ///
    /// Returns `true` if the store changed.
    pub fn set(&mut self, key: &str, value: impl Into<Value>, operator: FilterOperator) -> bool {
        let value = value.into();
        if value.is_empty() {
            return self.clear(key);
        }
        let filter = FilterValue::new(key, value, operator);
        match self.filters.iter_mut().find(|f| f.key == key) {
            Some(existing) if *existing == filter => false,
            Some(existing) => {
                *existing = filter;
                true
            }
            None => {
                self.filters.push(filter);
                true
            }
        }
    }

    /// Removes the filter on `key`. Returns `true` if one was removed.
    pub fn clear(&mut self, key: &str) -> bool {
        let before = self.filters.len();
        self.filters.retain(|f| f.key != key);
        self.filters.len() != before
    }

    /// Removes every filter. Returns `true` if any were removed.
    pub fn clear_all(&mut self) -> bool {
        let changed = !self.filters.is_empty();
        self.filters.clear();
        changed
    }

    /// Drops filters whose key is not accepted by `keep`.
    pub fn retain_keys(&mut self, keep: impl Fn(&str) -> bool) -> bool {
        let before = self.filters.len();
        self.filters.retain(|f| keep(&f.key));
        self.filters.len() != before
    }

    /// Returns the filter on `key`, if any.
    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.filters.iter().find(|f| f.key == key)
    }

    /// Active filters in insertion order.
    pub fn active(&self) -> &[FilterValue] {
        &self.filters
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns `true` if `row` passes every active filter.
    pub fn matches(&self, row: &Row) -> bool {
        passes_all(row, &self.filters)
    }
}
