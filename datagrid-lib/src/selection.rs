//! Identity-based row selection.

use std::collections::HashSet;

use serde::Deserialize;
use serde::Serialize;

use crate::model::RowId;

/// Selection mode for the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// No selection allowed.
    #[default]
    None,
    /// Single row selection (radio-button style).
    Single,
    /// Multiple rows can be selected (checkbox style).
    Multi,
}

/// Tracks selected rows by identity.
///
/// The set is independent of what is currently displayed: it survives paging,
/// filtering and sorting, and ids of rows that are no longer visible are kept
/// rather than pruned. Selection order is preserved for bulk actions.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    mode: SelectionMode,
    order: Vec<RowId>,
    selected: HashSet<RowId>,
}

impl Selection {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            order: Vec::new(),
            selected: HashSet::new(),
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Changes the mode. Switching to `None` clears the selection, switching to
    /// `Single` keeps only the most recent id.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        self.mode = mode;
        match mode {
            SelectionMode::None => self.clear_all(),
            SelectionMode::Single => {
                if let Some(last) = self.order.pop() {
                    self.clear_all();
                    self.insert(last);
                }
            }
            SelectionMode::Multi => {}
        }
    }

    /// Adds or removes one id. Returns `true` if the selection changed.
    pub fn select(&mut self, id: &RowId, checked: bool) -> bool {
        match (self.mode, checked) {
            (SelectionMode::None, _) => false,
            (_, false) => self.remove(id),
            (SelectionMode::Single, true) => {
                if self.selected.contains(id) && self.selected.len() == 1 {
                    return false;
                }
                self.clear_all();
                self.insert(id.clone())
            }
            (SelectionMode::Multi, true) => self.insert(id.clone()),
        }
    }

    /// Flips one id. Returns the new state.
    pub fn toggle(&mut self, id: &RowId) -> bool {
        let checked = !self.is_selected(id);
        self.select(id, checked);
        self.is_selected(id)
    }

    /// Selects or deselects every id in `displayed`; ids outside it are left
    /// alone. Selecting is only available in `Multi` mode.
    pub fn select_all<'a>(
        &mut self,
        displayed: impl IntoIterator<Item = &'a RowId>,
        checked: bool,
    ) -> bool {
        if self.mode == SelectionMode::None || (checked && self.mode != SelectionMode::Multi) {
            return false;
        }
        let mut changed = false;
        for id in displayed {
            changed |= if checked {
                self.insert(id.clone())
            } else {
                self.remove(id)
            };
        }
        changed
    }

    /// `true` iff `displayed` is non-empty and every id in it is selected.
    pub fn all_selected<'a>(&self, displayed: impl IntoIterator<Item = &'a RowId>) -> bool {
        let mut any = false;
        for id in displayed {
            if !self.selected.contains(id) {
                return false;
            }
            any = true;
        }
        any
    }

    /// `true` if at least one id in `displayed` is selected.
    pub fn some_selected<'a>(&self, displayed: impl IntoIterator<Item = &'a RowId>) -> bool {
        displayed.into_iter().any(|id| self.selected.contains(id))
    }

    pub fn is_selected(&self, id: &RowId) -> bool {
        self.selected.contains(id)
    }

    /// Selected ids in selection order.
    pub fn ids(&self) -> &[RowId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Replaces the whole selection. Returns the previously selected ids.
    pub fn replace(&mut self, ids: impl IntoIterator<Item = RowId>) -> Vec<RowId> {
        let previous = std::mem::take(&mut self.order);
        self.selected.clear();
        if self.mode == SelectionMode::None {
            return previous;
        }
        for id in ids {
            if self.mode == SelectionMode::Single {
                self.clear_all();
            }
            self.insert(id);
        }
        previous
    }

    /// Clears the selection. Returns the previously selected ids.
    pub fn clear(&mut self) -> Vec<RowId> {
        self.replace(std::iter::empty())
    }

    fn insert(&mut self, id: RowId) -> bool {
        if self.selected.insert(id.clone()) {
            self.order.push(id);
            true
        } else {
            false
        }
    }

    fn remove(&mut self, id: &RowId) -> bool {
        if self.selected.remove(id) {
            self.order.retain(|x| x != id);
            true
        } else {
            false
        }
    }

    fn clear_all(&mut self) {
        self.order.clear();
        self.selected.clear();
    }
}
