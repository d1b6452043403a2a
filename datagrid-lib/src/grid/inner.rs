//! Grid state and the display pipeline.

use std::collections::HashMap;

use crate::GridConfig;
use crate::expansion::GroupCollapse;
use crate::expansion::RowExpansion;
use crate::group::GroupConfig;
use crate::group::GroupContent;
use crate::group::GroupNode;
use crate::group::build_groups;
use crate::identity::RowIdentity;
use crate::layout::ColumnLayout;
use crate::model::Row;
use crate::model::RowEntry;
use crate::model::RowId;
use crate::pagination::PageInfo;
use crate::pagination::PageRequest;
use crate::pagination::PaginationState;
use crate::query::FilterStore;
use crate::query::Sorter;
use crate::query::sort_entries;
use crate::selection::Selection;

/// Internal state for a [`DataGrid`](crate::DataGrid).
#[derive(Debug)]
pub(super) struct GridInner {
    pub identity: RowIdentity,
    pub expandable: bool,
    /// Every row in client mode; the last good page in lazy mode.
    pub source: Vec<RowEntry>,
    /// Most recently seen values by identity, for bulk actions.
    pub known: HashMap<RowId, Row>,
    pub filters: FilterStore,
    pub sorter: Sorter,
    pub grouping: Vec<GroupConfig>,
    pub pagination: PaginationState,
    pub selection: Selection,
    pub expanded: RowExpansion,
    /// Paths of collapsed groups; groups not listed are expanded.
    pub collapsed: GroupCollapse,
    pub layout: ColumnLayout,
    /// Bumped on every filter or sort change so lazy responses issued under
    /// older parameters are recognised as stale.
    pub generation: u64,
    pub next_ticket: u64,
    /// Outstanding lazy request.
    pub in_flight: Option<PageRequest>,
    /// Outstanding infinite-scroll step.
    pub loading_more: bool,
}

impl GridInner {
    pub fn new(config: GridConfig) -> Self {
        let gutter_width = config.gutter_width();
        Self {
            identity: config.identity,
            expandable: config.expandable,
            source: Vec::new(),
            known: HashMap::new(),
            filters: FilterStore::new(),
            sorter: Sorter::new(config.sort_cycle),
            grouping: config.grouping,
            pagination: PaginationState::new(&config.pagination),
            selection: Selection::new(config.selection_mode),
            expanded: RowExpansion::new(),
            collapsed: GroupCollapse::new(),
            layout: ColumnLayout::new(config.columns, gutter_width),
            generation: 0,
            next_ticket: 0,
            in_flight: None,
            loading_more: false,
        }
    }

    /// Rows after filtering and sorting. Lazy pages are taken verbatim.
    pub fn processed(&self) -> Vec<RowEntry> {
        if self.pagination.is_lazy() {
            return self.source.clone();
        }
        let mut rows: Vec<RowEntry> = self
            .source
            .iter()
            .filter(|entry| self.filters.matches(&entry.row))
            .cloned()
            .collect();
        if let Some(sort) = self.sorter.current() {
            sort_entries(&mut rows, sort);
        }
        rows
    }

    /// Rows of the current page window.
    pub fn displayed(&self) -> Vec<RowEntry> {
        let mut rows = self.processed();
        if self.pagination.is_lazy() {
            return rows;
        }
        let window = self.pagination.window(rows.len());
        rows.truncate(window.end);
        rows.drain(..window.start);
        rows
    }

    /// Group tree over the displayed window, if grouping is configured.
    pub fn groups(&self, displayed: &[RowEntry]) -> Option<Vec<GroupNode>> {
        if self.grouping.is_empty() {
            return None;
        }
        Some(build_groups(displayed, &self.grouping))
    }

    pub fn displayed_ids(&self) -> Vec<RowId> {
        self.displayed().into_iter().map(|entry| entry.id).collect()
    }

    pub fn page_info(&self) -> PageInfo {
        self.pagination.info(self.displayed().len())
    }

    /// Re-derives the client-side item count after rows or filters changed.
    pub fn sync_total(&mut self) {
        if self.pagination.is_lazy() {
            return;
        }
        let total = self
            .source
            .iter()
            .filter(|entry| self.filters.matches(&entry.row))
            .count();
        self.pagination.set_total_items(total);
    }

    /// Marks a filter or sort change.
    pub fn invalidate(&mut self) {
        self.generation += 1;
    }

    pub fn replace_source(&mut self, entries: Vec<RowEntry>) {
        self.known = entries
            .iter()
            .map(|entry| (entry.id.clone(), entry.row.clone()))
            .collect();
        self.source = entries;
    }

    /// Installs a lazy page, keeping values of rows seen on other pages.
    pub fn apply_page(&mut self, entries: Vec<RowEntry>, total_items: usize) {
        for entry in &entries {
            self.known.insert(entry.id.clone(), entry.row.clone());
        }
        self.source = entries;
        self.pagination.set_total_items(total_items);
    }

    /// Selected rows in selection order; ids with no known row are skipped.
    pub fn selected_rows(&self) -> Vec<Row> {
        self.selection
            .ids()
            .iter()
            .filter_map(|id| self.known.get(id).cloned())
            .collect()
    }
}

/// Every group path in the tree, outermost first.
pub(super) fn group_paths(groups: &[GroupNode], out: &mut Vec<String>) {
    for group in groups {
        out.push(group.path.clone());
        if let GroupContent::SubGroups(sub) = &group.content {
            group_paths(sub, out);
        }
    }
}
