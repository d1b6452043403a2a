//! Render snapshot.

use crate::expansion::GroupCollapse;
use crate::group::GroupLine;
use crate::group::GroupNode;
use crate::group::visible_lines;
use crate::model::RowEntry;
use crate::model::RowId;
use crate::pagination::PageInfo;

/// Everything needed to render one frame of the grid.
///
/// The same shape is produced for client and lazy data sources.
#[derive(Debug, Clone, Default)]
pub struct GridView {
    /// Displayed rows: the current page window, or the loaded lazy page.
    pub rows: Vec<RowEntry>,
    /// Group tree over `rows`, when grouping is configured.
    pub groups: Option<Vec<GroupNode>>,
    pub page: PageInfo,
    /// Header checkbox state: every displayed row selected (and at least one
    /// displayed).
    pub all_selected: bool,
    /// At least one displayed row selected.
    pub some_selected: bool,
    /// A lazy page request is outstanding.
    pub loading: bool,
    pub(super) collapsed: GroupCollapse,
    pub(super) expanded: Vec<RowId>,
}

impl GridView {
    /// Display lines in render order.
    ///
    /// Without grouping every row is a depth-0 line. With grouping, headers
    /// are followed by their contents unless collapsed.
    pub fn lines(&self) -> Vec<GroupLine<'_>> {
        match &self.groups {
            Some(groups) => {
                let is_collapsed = |path: &str| self.collapsed.contains(&path.to_string());
                visible_lines(groups, &is_collapsed)
            }
            None => self
                .rows
                .iter()
                .map(|entry| GroupLine::Row { entry, depth: 0 })
                .collect(),
        }
    }

    pub fn is_grouped(&self) -> bool {
        self.groups.is_some()
    }

    /// Whether the detail area of `id` is open.
    pub fn is_expanded(&self, id: &RowId) -> bool {
        self.expanded.contains(id)
    }
}
