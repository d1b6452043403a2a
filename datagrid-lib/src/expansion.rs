//! Per-key expand/collapse state.

use std::collections::HashSet;
use std::hash::Hash;

use crate::model::RowId;

/// Tracks which keys are toggled.
///
/// Used with [`RowId`] for expanded detail rows and with group paths for
/// collapsed groups. Toggling one key never affects another, and state for a
/// key is kept even while it is not displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionState<K: Clone + Eq + Hash> {
    keys: HashSet<K>,
}

impl<K: Clone + Eq + Hash> Default for ExpansionState<K> {
    fn default() -> Self {
        Self {
            keys: HashSet::new(),
        }
    }
}

impl<K: Clone + Eq + Hash> ExpansionState<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips `key`. Returns the new state.
    pub fn toggle(&mut self, key: &K) -> bool {
        if self.keys.remove(key) {
            false
        } else {
            self.keys.insert(key.clone());
            true
        }
    }

    /// Sets `key` on or off. Returns `true` if the state changed.
    pub fn set(&mut self, key: &K, on: bool) -> bool {
        if on {
            self.keys.insert(key.clone())
        } else {
            self.keys.remove(key)
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        self.keys.contains(key)
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.keys.iter()
    }
}

/// Expanded detail rows.
pub type RowExpansion = ExpansionState<RowId>;

/// Collapsed groups, keyed by group path.
pub type GroupCollapse = ExpansionState<String>;
