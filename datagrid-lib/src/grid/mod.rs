//! The grid handle.

mod inner;
mod loading;
mod view;

use std::sync::Arc;
use std::sync::RwLock;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

pub use view::GridView;

use self::inner::GridInner;
use self::inner::group_paths;
use crate::GridConfig;
use crate::config::validate_columns;
use crate::error::ConfigError;
use crate::error::GridError;
use crate::events::GridEvent;
use crate::events::GridListener;
use crate::group::GroupConfig;
use crate::layout::ColumnGeometry;
use crate::layout::ResizeDrag;
use crate::model::Column;
use crate::model::Row;
use crate::model::RowEntry;
use crate::model::RowId;
use crate::model::Value;
use crate::pagination::PageInfo;
use crate::pagination::PageLoader;
use crate::pagination::PaginationMode;
use crate::query::Direction;
use crate::query::FilterOperator;
use crate::query::FilterValue;
use crate::query::SortState;
use crate::selection::SelectionMode;

/// An interactive data grid.
///
/// `DataGrid` owns filter, sort, grouping, pagination, selection, expansion
/// and column layout state for one grid instance, and composes them into the
/// rows to display: filter, then sort, then paginate, then group the page.
///
/// The handle is cheap to clone; clones share state. Each operation takes the
/// state lock for the duration of one discrete event, and listener
/// notifications are delivered after the lock is released.
///
/// # Example
///
/// ```
/// use datagrid_lib::{DataGrid, GridConfig};
/// use datagrid_lib::identity::RowIdentity;
/// use datagrid_lib::model::{Column, Row};
/// use datagrid_lib::pagination::PaginationConfig;
/// use datagrid_lib::query::FilterOperator;
///
/// let config = GridConfig::new(vec![
///         Column::new("id", "ID", 80),
///         Column::new("amt", "Amount", 120).sortable(),
///     ])
///     .with_identity(RowIdentity::field("id"))
///     .with_pagination(PaginationConfig::client(2));
///
/// let grid = DataGrid::new(config).unwrap();
/// grid.set_rows((1..=5).map(|i| Row::new().set("id", i).set("amt", i * 10)).collect());
/// grid.set_filter("amt", 20, FilterOperator::Gte);
///
/// let view = grid.view();
/// assert_eq!(view.page.total_items, 4);
/// assert_eq!(view.rows.len(), 2);
/// ```
#[derive(Clone)]
pub struct DataGrid {
    inner: Arc<RwLock<GridInner>>,
    /// Dirty flag for re-render.
    dirty: Arc<AtomicBool>,
    loader: Option<Arc<dyn PageLoader>>,
    listener: Option<Arc<dyn GridListener>>,
}

impl std::fmt::Debug for DataGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataGrid")
            .field("inner", &self.inner)
            .field("dirty", &self.dirty)
            .field("has_loader", &self.loader.is_some())
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}

impl DataGrid {
    /// Creates a grid from a validated configuration.
    pub fn new(config: GridConfig) -> Result<Self, GridError> {
        config.validate()?;
        Ok(Self {
            inner: Arc::new(RwLock::new(GridInner::new(config))),
            dirty: Arc::new(AtomicBool::new(false)),
            loader: None,
            listener: None,
        })
    }

    /// Attaches the page loader used in lazy mode.
    pub fn with_loader(mut self, loader: Arc<dyn PageLoader>) -> Self {
        self.loader = Some(loader);
        self
    }

    /// Registers a listener for host notifications.
    pub fn with_listener(mut self, listener: Arc<dyn GridListener>) -> Self {
        self.listener = Some(listener);
        self
    }

    fn read<R: Default>(&self, f: impl FnOnce(&GridInner) -> R) -> R {
        self.inner.read().map(|guard| f(&guard)).unwrap_or_default()
    }

    /// Applies one state transition, then marks the grid dirty and delivers
    /// queued notifications with the lock released.
    fn update<R: Default>(&self, f: impl FnOnce(&mut GridInner, &mut Vec<GridEvent>) -> R) -> R {
        let mut events = Vec::new();
        let result = match self.inner.write() {
            Ok(mut guard) => f(&mut guard, &mut events),
            Err(_) => {
                log::warn!("grid state lock poisoned; ignoring update");
                return R::default();
            }
        };
        self.dirty.store(true, Ordering::SeqCst);
        self.emit(&events);
        result
    }

    fn emit(&self, events: &[GridEvent]) {
        if let Some(listener) = &self.listener {
            for event in events {
                event.dispatch(listener.as_ref());
            }
        }
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the grid changed since the last render.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag after rendering.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }

    // -------------------------------------------------------------------------
    // Rows
    // -------------------------------------------------------------------------

    /// Replaces the client-side dataset.
    ///
    /// Filters, sort, grouping, expansion and column widths are kept. Selected
    /// ids that no longer exist in the new rows are dropped, and the current
    /// page is clamped into range. Lazy grids receive rows from their loader
    /// and ignore this call.
    pub fn set_rows(&self, rows: Vec<Row>) {
        self.update(|inner, events| {
            if inner.pagination.is_lazy() {
                log::warn!("set_rows ignored on a lazy grid");
                return;
            }
            let page = inner.pagination.current_page();
            let entries = inner.identity.assign(rows, 0);
            let count = entries.len();
            inner.replace_source(entries);
            if inner.known.len() < count {
                log::warn!(
                    "{} rows share an identity with another row",
                    count - inner.known.len()
                );
            }

            let kept: Vec<RowId> = inner
                .selection
                .ids()
                .iter()
                .filter(|id| inner.known.contains_key(id))
                .cloned()
                .collect();
            if kept.len() != inner.selection.len() {
                inner.selection.replace(kept);
                events.push(GridEvent::SelectionChange(inner.selection.ids().to_vec()));
            }

            inner.sync_total();
            if inner.pagination.current_page() != page {
                events.push(GridEvent::PageChange(inner.page_info()));
            }
            log::trace!("loaded {count} rows");
        });
    }

    /// The whole dataset in source order (the loaded page in lazy mode).
    pub fn rows(&self) -> Vec<RowEntry> {
        self.read(|inner| inner.source.clone())
    }

    /// The filtered and sorted dataset, before pagination.
    pub fn processed_rows(&self) -> Vec<RowEntry> {
        self.read(|inner| inner.processed())
    }

    pub fn len(&self) -> usize {
        self.read(|inner| inner.source.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // -------------------------------------------------------------------------
    // Columns
    // -------------------------------------------------------------------------

    /// Columns in rendered order.
    pub fn columns(&self) -> Vec<Column> {
        self.read(|inner| inner.layout.ordered().into_iter().cloned().collect())
    }

    pub fn column(&self, key: &str) -> Option<Column> {
        self.read(|inner| inner.layout.column(key).cloned())
    }

    /// Replaces the column configuration.
    ///
    /// Widths and order are re-seeded only when keys were added, removed or
    /// reordered; returns `true` in that case. Filters, sort and grouping
    /// levels on removed keys are dropped.
    pub fn set_columns(&self, columns: Vec<Column>) -> Result<bool, GridError> {
        validate_columns(&columns)?;
        Ok(self.update(|inner, events| {
            let reseeded = inner.layout.set_columns(columns);
            if !reseeded {
                return false;
            }
            let filters_dropped = {
                let layout = &inner.layout;
                inner.filters.retain_keys(|key| layout.contains(key))
            };
            if filters_dropped {
                after_filter_change(inner, events);
            }
            if let Some(sort) = inner.sorter.current()
                && !inner.layout.contains(&sort.key)
            {
                let key = sort.key.clone();
                inner.sorter.clear();
                inner.invalidate();
                events.push(GridEvent::Sort(key, None));
            }
            let before = inner.grouping.len();
            let layout = &inner.layout;
            inner.grouping.retain(|level| layout.contains(&level.key));
            if inner.grouping.len() != before {
                log::warn!(
                    "dropped {} grouping levels on removed columns",
                    before - inner.grouping.len()
                );
                inner.collapsed.clear();
            }
            true
        }))
    }

    /// Current width of `key`.
    pub fn column_width(&self, key: &str) -> Option<u32> {
        self.read(|inner| inner.layout.width(key))
    }

    /// Resizes a column, clamped to its bounds.
    ///
    /// Returns the applied width, or `None` for unknown or fixed columns.
    pub fn resize_column(&self, key: &str, width: i64) -> Option<u32> {
        self.update(|inner, events| {
            let applied = inner.layout.set_width(key, width)?;
            events.push(GridEvent::ColumnResize(key.to_string(), applied));
            Some(applied)
        })
    }

    /// Starts a resize drag on `key`.
    pub fn begin_resize(&self, key: &str) -> Option<ResizeDrag> {
        self.read(|inner| inner.layout.begin_resize(key))
    }

    /// Applies a drag delta measured from where the drag started.
    pub fn drag_resize(&self, drag: &ResizeDrag, delta_x: i64) -> Option<u32> {
        self.update(|inner, events| {
            let applied = inner.layout.drag_resize(drag, delta_x)?;
            events.push(GridEvent::ColumnResize(drag.key.clone(), applied));
            Some(applied)
        })
    }

    /// Moves the column at rendered index `from` to `to`.
    pub fn move_column(&self, from: usize, to: usize) -> bool {
        self.update(|inner, events| {
            if !inner.layout.move_column(from, to) {
                return false;
            }
            let ordered = inner.layout.ordered().into_iter().cloned().collect();
            events.push(GridEvent::ColumnReorder(ordered));
            true
        })
    }

    /// Widths and sticky offsets in rendered order.
    pub fn column_geometry(&self) -> Vec<ColumnGeometry> {
        self.read(|inner| inner.layout.geometry())
    }

    pub fn total_width(&self) -> u32 {
        self.read(|inner| inner.layout.total_width())
    }

    // -------------------------------------------------------------------------
    // Filtering
    // -------------------------------------------------------------------------

    /// Sets the filter on `key`; an empty value removes it.
    ///
    /// Any change returns to page 1.
    pub fn set_filter(&self, key: &str, value: impl Into<Value>, operator: FilterOperator) -> bool {
        let value = value.into();
        self.update(|inner, events| {
            if !inner.filters.set(key, value, operator) {
                return false;
            }
            after_filter_change(inner, events);
            true
        })
    }

    /// Sets a filter using the column's default operator.
    pub fn set_filter_default(&self, key: &str, value: impl Into<Value>) -> bool {
        let operator = self
            .column(key)
            .map(|c| c.default_operator())
            .unwrap_or(FilterOperator::Contains);
        self.set_filter(key, value, operator)
    }

    pub fn clear_filter(&self, key: &str) -> bool {
        self.update(|inner, events| {
            if !inner.filters.clear(key) {
                return false;
            }
            after_filter_change(inner, events);
            true
        })
    }

    pub fn clear_filters(&self) -> bool {
        self.update(|inner, events| {
            if !inner.filters.clear_all() {
                return false;
            }
            after_filter_change(inner, events);
            true
        })
    }

    /// Active filters in the order they were added.
    pub fn filters(&self) -> Vec<FilterValue> {
        self.read(|inner| inner.filters.active().to_vec())
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Advances the sort cycle for a sortable column.
    ///
    /// Returns the resulting sort; unknown and non-sortable columns are
    /// ignored and return the current sort unchanged.
    pub fn sort(&self, key: &str) -> Option<SortState> {
        self.update(|inner, events| {
            if !inner.layout.column(key).is_some_and(|c| c.sortable) {
                log::trace!("ignoring sort on non-sortable column {key}");
                return inner.sorter.current().cloned();
            }
            let state = inner.sorter.toggle(key).cloned();
            inner.invalidate();
            events.push(GridEvent::Sort(key.to_string(), state.as_ref().map(|s| s.direction)));
            state
        })
    }

    /// Sets the sort explicitly, bypassing the cycle.
    pub fn set_sort(&self, key: &str, direction: Direction) -> bool {
        self.update(|inner, events| {
            if !inner.layout.contains(key) {
                return false;
            }
            if inner.sorter.current() == Some(&SortState { key: key.to_string(), direction }) {
                return false;
            }
            inner.sorter.set(key, direction);
            inner.invalidate();
            events.push(GridEvent::Sort(key.to_string(), Some(direction)));
            true
        })
    }

    pub fn clear_sort(&self) -> bool {
        self.update(|inner, events| {
            let Some(key) = inner.sorter.current().map(|s| s.key.clone()) else {
                return false;
            };
            inner.sorter.clear();
            inner.invalidate();
            events.push(GridEvent::Sort(key, None));
            true
        })
    }

    pub fn sort_state(&self) -> Option<SortState> {
        self.read(|inner| inner.sorter.current().cloned())
    }

    // -------------------------------------------------------------------------
    // Grouping
    // -------------------------------------------------------------------------

    /// Replaces the grouping hierarchy. Collapse state is reset.
    pub fn set_grouping(&self, grouping: Vec<GroupConfig>) -> Result<(), GridError> {
        let unknown = self.read(|inner| {
            grouping
                .iter()
                .find(|level| !inner.layout.contains(&level.key))
                .map(|level| level.key.clone())
        });
        if let Some(key) = unknown {
            return Err(ConfigError::unknown_column(key, "grouping").into());
        }
        self.update(|inner, _| {
            inner.grouping = grouping;
            inner.collapsed.clear();
        });
        Ok(())
    }

    pub fn grouping(&self) -> Vec<GroupConfig> {
        self.read(|inner| inner.grouping.clone())
    }

    /// Flips the group at `path`. Returns `true` if it is now expanded.
    pub fn toggle_group(&self, path: &str) -> bool {
        self.update(|inner, _| !inner.collapsed.toggle(&path.to_string()))
    }

    /// Returns `true` if the state changed.
    pub fn set_group_expanded(&self, path: &str, expanded: bool) -> bool {
        self.update(|inner, _| inner.collapsed.set(&path.to_string(), !expanded))
    }

    pub fn is_group_expanded(&self, path: &str) -> bool {
        self.read(|inner| !inner.collapsed.contains(&path.to_string()))
    }

    pub fn expand_all_groups(&self) {
        self.update(|inner, _| inner.collapsed.clear());
    }

    /// Collapses every group of the currently displayed tree.
    pub fn collapse_all_groups(&self) {
        self.update(|inner, _| {
            let displayed = inner.displayed();
            let mut paths = Vec::new();
            if let Some(groups) = inner.groups(&displayed) {
                group_paths(&groups, &mut paths);
            }
            for path in &paths {
                inner.collapsed.set(path, true);
            }
        });
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    pub fn pagination_mode(&self) -> PaginationMode {
        self.read(|inner| inner.pagination.mode())
    }

    pub fn is_lazy(&self) -> bool {
        self.read(|inner| inner.pagination.is_lazy())
    }

    /// Moves to `page`; out-of-range pages are ignored.
    ///
    /// In lazy mode the new page is shown once [`load`](Self::load) completes.
    pub fn go_to_page(&self, page: usize) -> bool {
        self.update(|inner, events| {
            if !inner.pagination.go_to(page) {
                return false;
            }
            events.push(GridEvent::PageChange(inner.page_info()));
            true
        })
    }

    pub fn next_page(&self) -> bool {
        self.go_to_page(self.page_info().current_page + 1)
    }

    pub fn previous_page(&self) -> bool {
        self.go_to_page(self.page_info().current_page.saturating_sub(1))
    }

    pub fn first_page(&self) -> bool {
        self.go_to_page(1)
    }

    pub fn last_page(&self) -> bool {
        self.go_to_page(self.page_info().total_pages)
    }

    /// Changes the page size and returns to page 1.
    pub fn set_page_size(&self, size: usize) -> bool {
        self.update(|inner, events| {
            if !inner.pagination.set_page_size(size) {
                return false;
            }
            events.push(GridEvent::PageChange(inner.page_info()));
            true
        })
    }

    pub fn page_info(&self) -> PageInfo {
        self.read(|inner| inner.page_info())
    }

    /// Starts an infinite-scroll step.
    ///
    /// Returns `false` if infinite scroll is off, every row is already shown
    /// or a previous step has not completed.
    pub fn begin_load_more(&self) -> bool {
        self.update(|inner, _| {
            if !inner.pagination.is_infinite()
                || inner.loading_more
                || !inner.pagination.has_more()
            {
                return false;
            }
            inner.loading_more = true;
            true
        })
    }

    /// Completes an infinite-scroll step, growing the window by one page.
    pub fn complete_load_more(&self) -> bool {
        self.update(|inner, events| {
            if !inner.loading_more {
                return false;
            }
            inner.loading_more = false;
            if !inner.pagination.advance() {
                return false;
            }
            events.push(GridEvent::PageChange(inner.page_info()));
            true
        })
    }

    /// Grows the infinite-scroll window by one page.
    pub fn load_more(&self) -> bool {
        self.begin_load_more() && self.complete_load_more()
    }

    pub fn has_more(&self) -> bool {
        self.read(|inner| inner.pagination.has_more())
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    pub fn selection_mode(&self) -> SelectionMode {
        self.read(|inner| inner.selection.mode())
    }

    /// Switches the selection mode. `None` clears the selection and `Single`
    /// keeps only the most recently selected row.
    pub fn set_selection_mode(&self, mode: SelectionMode) -> bool {
        self.update(|inner, events| {
            if inner.selection.mode() == mode {
                return false;
            }
            let before = inner.selection.ids().to_vec();
            inner.selection.set_mode(mode);
            log::debug!("selection mode set to {mode:?}");
            if inner.selection.ids() != before.as_slice() {
                events.push(GridEvent::SelectionChange(inner.selection.ids().to_vec()));
            }
            true
        })
    }

    /// Selects or deselects one row. Ids need not be currently displayed.
    pub fn select_row(&self, id: &RowId, checked: bool) -> bool {
        self.update(|inner, events| {
            if !inner.selection.select(id, checked) {
                return false;
            }
            events.push(GridEvent::SelectionChange(inner.selection.ids().to_vec()));
            true
        })
    }

    /// Flips one row. Returns `true` if it is now selected.
    pub fn toggle_row(&self, id: &RowId) -> bool {
        self.update(|inner, events| {
            let before = inner.selection.is_selected(id);
            let after = inner.selection.toggle(id);
            if before != after {
                events.push(GridEvent::SelectionChange(inner.selection.ids().to_vec()));
            }
            after
        })
    }

    /// Selects or deselects every currently displayed row.
    pub fn select_all(&self, checked: bool) -> bool {
        self.update(|inner, events| {
            let displayed = inner.displayed_ids();
            if !inner.selection.select_all(&displayed, checked) {
                return false;
            }
            events.push(GridEvent::SelectionChange(inner.selection.ids().to_vec()));
            true
        })
    }

    pub fn is_selected(&self, id: &RowId) -> bool {
        self.read(|inner| inner.selection.is_selected(id))
    }

    /// Selected ids in selection order.
    pub fn selected_ids(&self) -> Vec<RowId> {
        self.read(|inner| inner.selection.ids().to_vec())
    }

    /// Most recently known values of every selected row, in selection order.
    pub fn selected_rows(&self) -> Vec<Row> {
        self.read(|inner| inner.selected_rows())
    }

    /// Replaces the selection. Returns the previously selected ids.
    pub fn replace_selection(&self, ids: impl IntoIterator<Item = RowId>) -> Vec<RowId> {
        self.update(|inner, events| {
            let previous = inner.selection.replace(ids);
            if previous.as_slice() != inner.selection.ids() {
                events.push(GridEvent::SelectionChange(inner.selection.ids().to_vec()));
            }
            previous
        })
    }

    /// Clears the selection. Returns the previously selected ids.
    pub fn clear_selection(&self) -> Vec<RowId> {
        self.replace_selection(std::iter::empty())
    }

    // -------------------------------------------------------------------------
    // Row expansion
    // -------------------------------------------------------------------------

    /// Flips the detail area of one row. Returns `true` if it is now open.
    ///
    /// Always `false` when rows are not expandable.
    pub fn toggle_row_expansion(&self, id: &RowId) -> bool {
        self.update(|inner, _| inner.expandable && inner.expanded.toggle(id))
    }

    /// Returns `true` if the state changed.
    pub fn set_row_expanded(&self, id: &RowId, expanded: bool) -> bool {
        self.update(|inner, _| inner.expandable && inner.expanded.set(id, expanded))
    }

    pub fn is_row_expanded(&self, id: &RowId) -> bool {
        self.read(|inner| inner.expanded.contains(id))
    }

    pub fn expanded_ids(&self) -> Vec<RowId> {
        self.read(|inner| inner.expanded.iter().cloned().collect())
    }

    pub fn collapse_all_rows(&self) {
        self.update(|inner, _| inner.expanded.clear());
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Computes what to display.
    pub fn view(&self) -> GridView {
        self.read(|inner| {
            let rows = inner.displayed();
            let groups = inner.groups(&rows);
            let ids: Vec<&RowId> = rows.iter().map(|entry| &entry.id).collect();
            GridView {
                page: inner.pagination.info(rows.len()),
                all_selected: inner.selection.all_selected(ids.iter().copied()),
                some_selected: inner.selection.some_selected(ids.iter().copied()),
                loading: inner.in_flight.is_some(),
                collapsed: inner.collapsed.clone(),
                expanded: ids
                    .iter()
                    .filter(|id| inner.expanded.contains(id))
                    .map(|id| (*id).clone())
                    .collect(),
                groups,
                rows,
            }
        })
    }
}

/// Shared follow-up of every filter change: new generation, back to page 1,
/// recount.
fn after_filter_change(inner: &mut GridInner, events: &mut Vec<GridEvent>) {
    inner.invalidate();
    let page_changed = inner.pagination.reset();
    inner.sync_total();
    events.push(GridEvent::Filter(inner.filters.active().to_vec()));
    if page_changed {
        events.push(GridEvent::PageChange(inner.page_info()));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::identity::RowIdentity;
    use crate::pagination::PaginationConfig;

    fn columns() -> Vec<Column> {
        vec![
            Column::new("id", "ID", 80),
            Column::new("dept", "Dept", 100).sortable(),
            Column::new("amt", "Amount", 120).sortable(),
        ]
    }

    fn grid(pagination: PaginationConfig) -> DataGrid {
        let config = GridConfig::new(columns())
            .with_identity(RowIdentity::field("id"))
            .with_pagination(pagination);
        let grid = DataGrid::new(config).unwrap();
        grid.set_rows(vec![
            Row::new().set("id", 1).set("dept", "A").set("amt", 10),
            Row::new().set("id", 2).set("dept", "B").set("amt", 20),
            Row::new().set("id", 3).set("dept", "A").set("amt", 30),
            Row::new().set("id", 4).set("dept", "A").set("amt", 5),
            Row::new().set("id", 5).set("dept", "B").set("amt", 15),
        ]);
        grid
    }

    fn ids(rows: &[RowEntry]) -> Vec<&str> {
        rows.iter().map(|e| e.id.as_str()).collect()
    }

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
    }

    impl GridListener for Recorder {
        fn on_sort(&self, key: &str, direction: Option<Direction>) {
            self.events.lock().unwrap().push(format!("sort {key} {direction:?}"));
        }

        fn on_filter(&self, filters: &[FilterValue]) {
            self.events.lock().unwrap().push(format!("filter {}", filters.len()));
        }

        fn on_page_change(&self, page: &PageInfo) {
            self.events.lock().unwrap().push(format!("page {}", page.current_page));
        }
    }

    #[test]
    fn test_pipeline_filters_sorts_then_pages() {
        let grid = grid(PaginationConfig::client(2));
        grid.set_filter("amt", 10, FilterOperator::Gte);
        grid.sort("amt");
        grid.sort("amt");

        let view = grid.view();
        assert_eq!(ids(&view.rows), vec!["3", "2"]);
        assert_eq!(view.page.total_items, 4);
        assert_eq!(view.page.total_pages, 2);

        assert!(grid.next_page());
        assert_eq!(ids(&grid.view().rows), vec!["5", "1"]);
    }

    #[test]
    fn test_filter_change_returns_to_first_page() {
        let grid = grid(PaginationConfig::client(2));
        assert!(grid.go_to_page(3));
        grid.set_filter("dept", "a", FilterOperator::Equals);
        assert_eq!(grid.page_info().current_page, 1);
        assert_eq!(grid.page_info().total_items, 3);
    }

    #[test]
    fn test_sort_keeps_page() {
        let grid = grid(PaginationConfig::client(2));
        assert!(grid.go_to_page(2));
        grid.sort("amt");
        assert_eq!(grid.page_info().current_page, 2);
    }

    #[test]
    fn test_sort_ignores_non_sortable_column() {
        let grid = grid(PaginationConfig::client(10));
        assert_eq!(grid.sort("id"), None);
        assert_eq!(grid.sort_state(), None);
    }

    #[test]
    fn test_grouping_applies_to_page_window() {
        let grid = grid(PaginationConfig::client(2));
        grid.set_grouping(vec![GroupConfig::new("dept")]).unwrap();
        let view = grid.view();
        let groups = view.groups.as_ref().unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].row_count + groups[1].row_count, 2);
    }

    #[test]
    fn test_set_grouping_rejects_unknown_column() {
        let grid = grid(PaginationConfig::client(2));
        assert!(matches!(
            grid.set_grouping(vec![GroupConfig::new("region")]),
            Err(GridError::Config(ConfigError::UnknownColumn { .. }))
        ));
    }

    #[test]
    fn test_set_rows_prunes_removed_selection() {
        let grid = grid(PaginationConfig::client(10));
        grid.select_row(&RowId::from(1), true);
        grid.select_row(&RowId::from(2), true);
        grid.set_rows(vec![Row::new().set("id", 2).set("amt", 99)]);
        assert_eq!(grid.selected_ids(), vec![RowId::from(2)]);
        assert_eq!(grid.selected_rows()[0].value("amt"), &Value::Int(99));
    }

    #[test]
    fn test_set_columns_drops_state_on_removed_keys() {
        let grid = grid(PaginationConfig::client(10));
        grid.set_filter("amt", 10, FilterOperator::Gt);
        grid.sort("amt");
        let reseeded = grid
            .set_columns(vec![Column::new("id", "ID", 80), Column::new("dept", "Dept", 100)])
            .unwrap();
        assert!(reseeded);
        assert!(grid.filters().is_empty());
        assert_eq!(grid.sort_state(), None);
        assert_eq!(grid.view().rows.len(), 5);
    }

    #[test]
    fn test_set_columns_rejects_duplicates() {
        let grid = grid(PaginationConfig::client(10));
        let result = grid.set_columns(vec![
            Column::new("id", "ID", 80),
            Column::new("id", "Again", 80),
        ]);
        assert!(matches!(result, Err(GridError::Config(ConfigError::DuplicateColumn { .. }))));
    }

    #[test]
    fn test_listener_receives_notifications() {
        let recorder = Arc::new(Recorder::default());
        let grid = grid(PaginationConfig::client(2)).with_listener(recorder.clone());
        grid.go_to_page(2);
        grid.sort("amt");
        grid.set_filter("dept", "B", FilterOperator::Equals);

        let events = recorder.events.lock().unwrap().clone();
        assert_eq!(events, vec!["page 2", "sort amt Some(Asc)", "filter 1", "page 1"]);
    }

    #[test]
    fn test_dirty_flag() {
        let grid = grid(PaginationConfig::client(2));
        assert!(grid.is_dirty());
        grid.clear_dirty();
        assert!(!grid.is_dirty());
        grid.toggle_group("0-A");
        assert!(grid.is_dirty());
    }

    #[test]
    fn test_expansion_requires_expandable() {
        let grid = grid(PaginationConfig::client(10));
        assert!(!grid.toggle_row_expansion(&RowId::from(1)));
        assert!(grid.expanded_ids().is_empty());
    }

    #[test]
    fn test_clones_share_state() {
        let grid = grid(PaginationConfig::client(10));
        let other = grid.clone();
        other.select_row(&RowId::from(3), true);
        assert!(grid.is_selected(&RowId::from(3)));
    }
}
