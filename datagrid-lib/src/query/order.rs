//! Single-column sort state and value ordering.

use std::cmp::Ordering;

use serde::Deserialize;
use serde::Serialize;

use crate::model::RowEntry;
use crate::model::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Applies this direction to an ascending ordering.
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }
}

/// The active sort: one key, one direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub key: String,
    pub direction: Direction,
}

impl SortState {
    pub fn asc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: Direction::Desc,
        }
    }
}

/// What a third activation of the same sort key does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortCycle {
    /// asc -> desc -> unsorted
    #[default]
    ClearOnThird,
    /// asc -> desc -> desc
    StayDescending,
}

/// Tracks the single active sort key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sorter {
    state: Option<SortState>,
    cycle: SortCycle,
}

impl Sorter {
    pub fn new(cycle: SortCycle) -> Self {
        Self { state: None, cycle }
    }

    /// Current sort, if any.
    pub fn current(&self) -> Option<&SortState> {
        self.state.as_ref()
    }

    pub fn cycle(&self) -> SortCycle {
        self.cycle
    }

    /// Advances the sort cycle for `key` and returns the new state.
    ///
    /// A different key replaces the previous sort outright.
    pub fn toggle(&mut self, key: &str) -> Option<&SortState> {
        let next = match &self.state {
            Some(s) if s.key == key => match (s.direction, self.cycle) {
                (Direction::Asc, _) => Some(SortState::desc(key)),
                (Direction::Desc, SortCycle::ClearOnThird) => None,
                (Direction::Desc, SortCycle::StayDescending) => Some(SortState::desc(key)),
            },
            _ => Some(SortState::asc(key)),
        };
        self.state = next;
        self.state.as_ref()
    }

    /// Sets the sort explicitly.
    pub fn set(&mut self, key: impl Into<String>, direction: Direction) {
        self.state = Some(SortState {
            key: key.into(),
            direction,
        });
    }

    /// Clears the sort. Returns `true` if one was active.
    pub fn clear(&mut self) -> bool {
        self.state.take().is_some()
    }
}

/// Ascending order of two non-null values.
///
/// Numbers compare numerically, timestamps chronologically, everything else
/// as text: case-insensitively first, lowercase before uppercase on ties.
/// Mixed kinds order numbers first, then timestamps, then text.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => return x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => return Ordering::Less,
        (None, Some(_)) => return Ordering::Greater,
        (None, None) => {}
    }
    match (a, b) {
        (Value::DateTime(x), Value::DateTime(y)) => x.cmp(y),
        (Value::DateTime(_), _) => Ordering::Less,
        (_, Value::DateTime(_)) => Ordering::Greater,
        _ => compare_text(&a.as_text(), &b.as_text()),
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Orders two values in `direction`, with nulls last either way.
pub fn compare_directed(a: &Value, b: &Value, direction: Direction) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => direction.apply(compare_values(a, b)),
    }
}

/// Stable-sorts entries by the given sort state.
pub fn sort_entries(entries: &mut [RowEntry], sort: &SortState) {
    entries.sort_by(|a, b| {
        compare_directed(a.row.value(&sort.key), b.row.value(&sort.key), sort.direction)
    });
}
