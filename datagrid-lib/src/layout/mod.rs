//! Column geometry: order, widths, resize bounds and frozen offsets.

mod resize;

use std::collections::HashMap;

pub use resize::ResizeDrag;

use crate::model::Column;
use crate::model::Frozen;

/// Rendered geometry of one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnGeometry {
    pub key: String,
    pub width: u32,
    pub frozen: Option<Frozen>,
    /// Distance from the pinned edge for frozen columns.
    pub sticky_offset: Option<u32>,
}

/// Owns column order and widths for one grid.
///
/// Widths are seeded from the configured column widths and only re-seeded when
/// the configured key list changes; data changes never touch them.
#[derive(Debug, Clone)]
pub struct ColumnLayout {
    /// Columns in user order (after reorders).
    columns: Vec<Column>,
    /// Keys as last configured, for change detection.
    configured_keys: Vec<String>,
    widths: HashMap<String, u32>,
    /// Width of the fixed selection/expansion gutters left of all data columns.
    gutter_width: u32,
}

impl ColumnLayout {
    pub fn new(columns: Vec<Column>, gutter_width: u32) -> Self {
        let mut layout = Self {
            columns: Vec::new(),
            configured_keys: Vec::new(),
            widths: HashMap::new(),
            gutter_width,
        };
        layout.reseed(columns);
        layout
    }

    fn reseed(&mut self, columns: Vec<Column>) {
        self.configured_keys = columns.iter().map(|c| c.key.clone()).collect();
        self.widths = columns
            .iter()
            .map(|c| (c.key.clone(), c.clamp_width(c.width as i64)))
            .collect();
        self.columns = columns;
    }

    /// Applies a new column configuration.
    ///
    /// Returns `true` if widths and order were re-seeded (keys added, removed
    /// or reordered). Otherwise only the column definitions are refreshed and
    /// user-driven order and widths are kept.
    pub fn set_columns(&mut self, columns: Vec<Column>) -> bool {
        let keys: Vec<&str> = columns.iter().map(|c| c.key.as_str()).collect();
        if keys == self.configured_keys {
            let mut by_key: HashMap<String, Column> =
                columns.into_iter().map(|c| (c.key.clone(), c)).collect();
            for column in &mut self.columns {
                if let Some(updated) = by_key.remove(&column.key) {
                    *column = updated;
                }
            }
            for column in &self.columns {
                if let Some(width) = self.widths.get_mut(&column.key) {
                    *width = column.clamp_width(*width as i64);
                }
            }
            return false;
        }
        log::trace!("column set changed, re-seeding widths");
        self.reseed(columns);
        true
    }

    pub fn gutter_width(&self) -> u32 {
        self.gutter_width
    }

    /// Columns in user order, frozen or not.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.column(key).is_some()
    }

    /// Current width of a column.
    pub fn width(&self, key: &str) -> Option<u32> {
        self.widths.get(key).copied()
    }

    /// Sets a column's width, clamped into its bounds.
    ///
    /// Returns the applied width, or `None` for unknown or fixed columns.
    pub fn set_width(&mut self, key: &str, width: i64) -> Option<u32> {
        let column = self.columns.iter().find(|c| c.key == key)?;
        if !column.resizable {
            return None;
        }
        let clamped = column.clamp_width(width);
        self.widths.insert(key.to_string(), clamped);
        Some(clamped)
    }

    /// Starts a drag-resize on `key`, capturing its current width.
    pub fn begin_resize(&self, key: &str) -> Option<ResizeDrag> {
        let column = self.column(key)?;
        if !column.resizable {
            return None;
        }
        Some(ResizeDrag::new(key, self.width(key)?))
    }

    /// Applies a drag delta relative to the width captured at drag start.
    pub fn drag_resize(&mut self, drag: &ResizeDrag, delta_x: i64) -> Option<u32> {
        self.set_width(&drag.key, drag.target_width(delta_x))
    }

    /// Columns in rendered order: left-frozen, unfrozen, right-frozen.
    ///
    /// Each bucket keeps the relative user order of its columns.
    pub fn ordered(&self) -> Vec<&Column> {
        let bucket = |side: Option<Frozen>| self.columns.iter().filter(move |c| c.frozen == side);
        bucket(Some(Frozen::Left))
            .chain(bucket(None))
            .chain(bucket(Some(Frozen::Right)))
            .collect()
    }

    /// Moves the column at rendered index `from` to rendered index `to`.
    ///
    /// Implemented as remove-then-insert over the rendered order, after which
    /// columns are re-bucketed, so frozen and unfrozen columns never
    /// interleave. Returns `true` if the order changed.
    pub fn move_column(&mut self, from: usize, to: usize) -> bool {
        let mut keys: Vec<String> = self.ordered().iter().map(|c| c.key.clone()).collect();
        if from >= keys.len() || from == to {
            return false;
        }
        let key = keys.remove(from);
        keys.insert(to.min(keys.len()), key);

        let before: Vec<String> = self.ordered().iter().map(|c| c.key.clone()).collect();
        let mut by_key: HashMap<String, Column> =
            self.columns.drain(..).map(|c| (c.key.clone(), c)).collect();
        self.columns = keys.iter().filter_map(|k| by_key.remove(k)).collect();

        let after: Vec<String> = self.ordered().iter().map(|c| c.key.clone()).collect();
        before != after
    }

    /// Geometry of every column in rendered order, with sticky offsets.
    ///
    /// A left-frozen column's offset is the gutter width plus the widths of the
    /// left-frozen columns before it. A right-frozen column's offset is the sum
    /// of the widths of the right-frozen columns after it.
    pub fn geometry(&self) -> Vec<ColumnGeometry> {
        let ordered = self.ordered();
        let width_of = |c: &Column| self.width(&c.key).unwrap_or(c.width);

        let mut left_offset = self.gutter_width;
        let mut out: Vec<ColumnGeometry> = ordered
            .iter()
            .map(|c| {
                let width = width_of(c);
                let sticky_offset = match c.frozen {
                    Some(Frozen::Left) => {
                        let offset = left_offset;
                        left_offset += width;
                        Some(offset)
                    }
                    _ => None,
                };
                ColumnGeometry {
                    key: c.key.clone(),
                    width,
                    frozen: c.frozen,
                    sticky_offset,
                }
            })
            .collect();

        let mut right_offset = 0;
        for geometry in out.iter_mut().rev() {
            if geometry.frozen == Some(Frozen::Right) {
                geometry.sticky_offset = Some(right_offset);
                right_offset += geometry.width;
            }
        }
        out
    }

    /// Sum of all column widths plus the gutter.
    pub fn total_width(&self) -> u32 {
        self.gutter_width
            + self
                .columns
                .iter()
                .map(|c| self.width(&c.key).unwrap_or(c.width))
                .sum::<u32>()
    }
}
