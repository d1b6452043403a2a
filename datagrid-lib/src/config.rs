//! Grid configuration

use std::collections::HashSet;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ConfigError;
use crate::group::GroupConfig;
use crate::identity::RowIdentity;
use crate::model::Column;
use crate::pagination::PaginationConfig;
use crate::query::SortCycle;
use crate::selection::SelectionMode;

/// Widths of the fixed gutter columns left of all data columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    /// Checkbox column, present when selection is enabled.
    pub selection_gutter_width: u32,
    /// Expand toggle column, present when rows are expandable.
    pub expansion_gutter_width: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            selection_gutter_width: 48,
            expansion_gutter_width: 40,
        }
    }
}

/// Configuration for one [`DataGrid`](crate::DataGrid) instance.
///
/// # Example
///
/// ```
/// use datagrid_lib::GridConfig;
/// use datagrid_lib::identity::RowIdentity;
/// use datagrid_lib::model::Column;
/// use datagrid_lib::pagination::PaginationConfig;
///
/// let config = GridConfig::new(vec![
///         Column::new("id", "ID", 80),
///         Column::new("name", "Name", 200).sortable(),
///     ])
///     .with_identity(RowIdentity::field("id"))
///     .with_pagination(PaginationConfig::client(25));
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridConfig {
    pub columns: Vec<Column>,
    pub identity: RowIdentity,
    pub selection_mode: SelectionMode,
    /// Whether rows have an expandable detail area.
    pub expandable: bool,
    pub pagination: PaginationConfig,
    /// Initial grouping hierarchy, outermost first.
    pub grouping: Vec<GroupConfig>,
    pub sort_cycle: SortCycle,
    pub layout: LayoutConfig,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            identity: RowIdentity::Index,
            selection_mode: SelectionMode::Multi,
            expandable: false,
            pagination: PaginationConfig::default(),
            grouping: Vec::new(),
            sort_cycle: SortCycle::default(),
            layout: LayoutConfig::default(),
        }
    }
}

impl GridConfig {
    /// Creates a config with default settings for the given columns.
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            ..Self::default()
        }
    }

    /// Parses a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_identity(mut self, identity: RowIdentity) -> Self {
        self.identity = identity;
        self
    }

    pub fn with_selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    pub fn with_expandable(mut self, expandable: bool) -> Self {
        self.expandable = expandable;
        self
    }

    pub fn with_pagination(mut self, pagination: PaginationConfig) -> Self {
        self.pagination = pagination;
        self
    }

    pub fn with_grouping(mut self, grouping: Vec<GroupConfig>) -> Self {
        self.grouping = grouping;
        self
    }

    pub fn with_sort_cycle(mut self, cycle: SortCycle) -> Self {
        self.sort_cycle = cycle;
        self
    }

    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Total width of the gutter columns implied by this config.
    pub fn gutter_width(&self) -> u32 {
        let mut width = 0;
        if self.selection_mode != SelectionMode::None {
            width += self.layout.selection_gutter_width;
        }
        if self.expandable {
            width += self.layout.expansion_gutter_width;
        }
        width
    }

    /// Checks the configuration for structural errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_columns(&self.columns)?;

        if self.pagination.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }

        for level in &self.grouping {
            if !self.has_column(&level.key) {
                return Err(ConfigError::unknown_column(&level.key, "grouping"));
            }
        }
        for key in self.identity.keys() {
            if !self.has_column(key) {
                return Err(ConfigError::unknown_column(key, "row identity"));
            }
        }
        Ok(())
    }

    fn has_column(&self, key: &str) -> bool {
        self.columns.iter().any(|c| c.key == key)
    }
}

/// Checks key uniqueness and explicit width bounds.
pub(crate) fn validate_columns(columns: &[Column]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for column in columns {
        if !seen.insert(column.key.as_str()) {
            return Err(ConfigError::DuplicateColumn {
                key: column.key.clone(),
            });
        }
        if let (Some(min), Some(max)) = (column.min_width, column.max_width)
            && min > max
        {
            return Err(ConfigError::InvalidWidthBounds {
                key: column.key.clone(),
                min,
                max,
            });
        }
    }
    Ok(())
}
