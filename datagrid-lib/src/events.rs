//! Host notifications and bulk actions.
//!
//! Listeners are registered per grid instance; there is no global callback
//! registry. Notifications are fire-and-forget and are delivered after the
//! grid has released its internal lock, so a listener may call back into the
//! grid.

use async_trait::async_trait;

use crate::error::BulkActionError;
use crate::error::LoadError;
use crate::model::Column;
use crate::model::Row;
use crate::model::RowId;
use crate::pagination::PageInfo;
use crate::query::Direction;
use crate::query::FilterValue;

/// Receives informational callbacks from a grid.
///
/// Every method has a no-op default. The grid's own state is authoritative
/// whether or not anything listens.
pub trait GridListener: Send + Sync {
    /// The sort changed; `direction` is `None` when the sort was cleared.
    fn on_sort(&self, _key: &str, _direction: Option<Direction>) {}

    /// The active filter set changed.
    fn on_filter(&self, _filters: &[FilterValue]) {}

    /// A column was resized to `width` (after clamping).
    fn on_column_resize(&self, _key: &str, _width: u32) {}

    /// Columns were reordered; `columns` is the new rendered order.
    fn on_column_reorder(&self, _columns: &[Column]) {}

    /// The current page or page size changed.
    fn on_page_change(&self, _page: &PageInfo) {}

    /// The selection changed; `selected` is the full selected set.
    fn on_selection_change(&self, _selected: &[RowId]) {}

    /// A lazy page load failed. The grid kept its previous page.
    fn on_load_error(&self, _error: &LoadError) {}
}

/// Handles a bulk action over the selected rows.
#[async_trait]
pub trait BulkActionHandler: Send + Sync {
    /// `rows` holds the most recently known values of every selected row.
    async fn on_bulk_action(&self, action_id: &str, rows: Vec<Row>) -> Result<(), BulkActionError>;
}

/// A notification queued while the grid lock is held.
#[derive(Debug, Clone)]
pub(crate) enum GridEvent {
    Sort(String, Option<Direction>),
    Filter(Vec<FilterValue>),
    ColumnResize(String, u32),
    ColumnReorder(Vec<Column>),
    PageChange(PageInfo),
    SelectionChange(Vec<RowId>),
}

impl GridEvent {
    pub(crate) fn dispatch(&self, listener: &dyn GridListener) {
        match self {
            GridEvent::Sort(key, direction) => listener.on_sort(key, *direction),
            GridEvent::Filter(filters) => listener.on_filter(filters),
            GridEvent::ColumnResize(key, width) => listener.on_column_resize(key, *width),
            GridEvent::ColumnReorder(columns) => listener.on_column_reorder(columns),
            GridEvent::PageChange(info) => listener.on_page_change(info),
            GridEvent::SelectionChange(ids) => listener.on_selection_change(ids),
        }
    }
}
