//! Column definitions and cell rendering strategy

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use super::Row;
use super::Value;
use crate::query::FilterOperator;

/// Width used when a column does not configure one.
pub const DEFAULT_COLUMN_WIDTH: u32 = 150;
/// Lower resize bound when a column does not configure `min_width`.
pub const DEFAULT_MIN_WIDTH: u32 = 50;
/// Upper resize bound when a column does not configure `max_width`.
pub const DEFAULT_MAX_WIDTH: u32 = 1000;

/// Horizontal alignment for column content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Edge a column is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frozen {
    Left,
    Right,
}

/// Kind of filter control a column offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    #[default]
    Text,
    Number,
    Date,
    Select,
}

impl FilterType {
    /// Operator used when the host sets a filter without choosing one.
    pub fn default_operator(&self) -> FilterOperator {
        match self {
            FilterType::Text => FilterOperator::Contains,
            FilterType::Number | FilterType::Date | FilterType::Select => FilterOperator::Equals,
        }
    }
}

/// One choice of a select-type filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOption {
    pub label: String,
    pub value: Value,
}

impl FilterOption {
    pub fn new(label: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Strategy for turning a cell value into renderable output.
///
/// Renderers must be pure: they are invoked once per visible cell per render
/// pass. Closures of the right shape implement this trait.
///
/// # Example
///
/// ```
/// use datagrid_lib::model::{Column, Row, Value};
///
/// let column = Column::new("amt", "Amount", 120)
///     .renderer(|value: &Value, _row: &Row| format!("${}", value));
///
/// let row = Row::new().set("amt", 10);
/// assert_eq!(column.render(&row), "$10");
/// ```
pub trait CellRenderer<T = String>: Send + Sync {
    fn render(&self, value: &Value, row: &Row) -> T;
}

impl<T, F> CellRenderer<T> for F
where
    F: Fn(&Value, &Row) -> T + Send + Sync,
{
    fn render(&self, value: &Value, row: &Row) -> T {
        self(value, row)
    }
}

/// Column configuration.
///
/// # Examples
///
/// ```
/// use datagrid_lib::model::{Column, FilterType, Frozen};
///
/// let columns = vec![
///     Column::new("id", "ID", 80).frozen(Frozen::Left),
///     Column::new("name", "Name", 200).sortable().filterable(FilterType::Text),
///     Column::new("amt", "Amount", 120).sortable().min_width(80).max_width(300),
/// ];
/// ```
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Unique key within the column set; also the row field it reads.
    pub key: String,
    /// Header text.
    #[serde(default)]
    pub title: String,
    /// Configured width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default)]
    pub sortable: bool,
    #[serde(default)]
    pub filterable: bool,
    #[serde(default)]
    pub filter_type: Option<FilterType>,
    #[serde(default)]
    pub filter_options: Vec<FilterOption>,
    #[serde(default)]
    pub frozen: Option<Frozen>,
    #[serde(default = "default_resizable")]
    pub resizable: bool,
    #[serde(default)]
    pub min_width: Option<u32>,
    #[serde(default)]
    pub max_width: Option<u32>,
    #[serde(default)]
    pub align: Alignment,
    #[serde(skip)]
    renderer: Option<Arc<dyn CellRenderer>>,
}

fn default_width() -> u32 {
    DEFAULT_COLUMN_WIDTH
}

fn default_resizable() -> bool {
    true
}

impl Column {
    /// Creates a new resizable column.
    pub fn new(key: impl Into<String>, title: impl Into<String>, width: u32) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            width,
            sortable: false,
            filterable: false,
            filter_type: None,
            filter_options: Vec::new(),
            frozen: None,
            resizable: true,
            min_width: None,
            max_width: None,
            align: Alignment::Left,
            renderer: None,
        }
    }

    /// Make the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Make the column filterable with the given control type.
    pub fn filterable(mut self, filter_type: FilterType) -> Self {
        self.filterable = true;
        self.filter_type = Some(filter_type);
        self
    }

    /// Set the choices of a select filter.
    pub fn filter_options(mut self, options: impl IntoIterator<Item = FilterOption>) -> Self {
        self.filter_options = options.into_iter().collect();
        self
    }

    /// Pin the column to an edge.
    pub fn frozen(mut self, side: Frozen) -> Self {
        self.frozen = Some(side);
        self
    }

    /// Disable user resizing.
    pub fn fixed(mut self) -> Self {
        self.resizable = false;
        self
    }

    pub fn min_width(mut self, width: u32) -> Self {
        self.min_width = Some(width);
        self
    }

    pub fn max_width(mut self, width: u32) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Attach a cell renderer.
    pub fn renderer(mut self, renderer: impl CellRenderer + 'static) -> Self {
        self.renderer = Some(Arc::new(renderer));
        self
    }

    /// Effective lower resize bound.
    pub fn resolved_min_width(&self) -> u32 {
        self.min_width.unwrap_or(DEFAULT_MIN_WIDTH)
    }

    /// Effective upper resize bound, never below the lower bound.
    pub fn resolved_max_width(&self) -> u32 {
        self.max_width
            .unwrap_or(DEFAULT_MAX_WIDTH)
            .max(self.resolved_min_width())
    }

    /// Clamp a width into this column's bounds.
    pub fn clamp_width(&self, width: i64) -> u32 {
        let min = self.resolved_min_width() as i64;
        let max = self.resolved_max_width() as i64;
        width.clamp(min, max) as u32
    }

    /// Operator used by filters that don't name one.
    pub fn default_operator(&self) -> FilterOperator {
        self.filter_type.unwrap_or_default().default_operator()
    }

    /// Render this column's cell for a row.
    pub fn render(&self, row: &Row) -> String {
        let value = row.value(&self.key);
        match &self.renderer {
            Some(renderer) => renderer.render(value, row),
            None => value.to_string(),
        }
    }

    /// Returns `true` if a custom renderer is attached.
    pub fn has_renderer(&self) -> bool {
        self.renderer.is_some()
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("width", &self.width)
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .field("filter_type", &self.filter_type)
            .field("frozen", &self.frozen)
            .field("resizable", &self.resizable)
            .field("min_width", &self.min_width)
            .field("max_width", &self.max_width)
            .field("align", &self.align)
            .field("renderer", &self.renderer.is_some())
            .finish()
    }
}
