use std::sync::{Arc, Mutex};

use datagrid_lib::events::GridListener;
use datagrid_lib::model::{Column, Frozen, Row};
use datagrid_lib::selection::SelectionMode;
use datagrid_lib::{DataGrid, GridConfig};

fn columns() -> Vec<Column> {
    vec![
        Column::new("id", "ID", 60).frozen(Frozen::Left),
        Column::new("name", "Name", 200).min_width(100).max_width(400),
        Column::new("code", "Code", 80).frozen(Frozen::Left),
        Column::new("amt", "Amount", 120),
        Column::new("actions", "", 90).frozen(Frozen::Right).fixed(),
        Column::new("status", "Status", 70).frozen(Frozen::Right),
    ]
}

fn grid() -> DataGrid {
    // 48px selection gutter
    DataGrid::new(GridConfig::new(columns())).unwrap()
}

fn keys(grid: &DataGrid) -> Vec<String> {
    grid.columns().into_iter().map(|c| c.key).collect()
}

fn offset(grid: &DataGrid, key: &str) -> Option<u32> {
    grid.column_geometry()
        .into_iter()
        .find(|g| g.key == key)
        .and_then(|g| g.sticky_offset)
}

#[test]
fn test_frozen_columns_are_bucketed() {
    assert_eq!(keys(&grid()), vec!["id", "code", "name", "amt", "actions", "status"]);
}

#[test]
fn test_sticky_offsets() {
    let grid = grid();
    assert_eq!(offset(&grid, "id"), Some(48));
    assert_eq!(offset(&grid, "code"), Some(108));
    assert_eq!(offset(&grid, "name"), None);
    assert_eq!(offset(&grid, "actions"), Some(70));
    assert_eq!(offset(&grid, "status"), Some(0));
}

#[test]
fn test_gutters_follow_config() {
    let config = GridConfig::new(columns())
        .with_selection_mode(SelectionMode::None)
        .with_expandable(true);
    let grid = DataGrid::new(config).unwrap();
    assert_eq!(offset(&grid, "id"), Some(40));
}

#[test]
fn test_offsets_follow_resize() {
    let grid = grid();
    assert_eq!(grid.resize_column("id", 90), Some(90));
    assert_eq!(offset(&grid, "code"), Some(138));
    assert_eq!(grid.resize_column("status", 100), Some(100));
    assert_eq!(offset(&grid, "actions"), Some(100));
}

#[test]
fn test_resize_clamps_to_bounds() {
    let grid = grid();
    assert_eq!(grid.resize_column("name", 10), Some(100));
    assert_eq!(grid.resize_column("name", 10_000), Some(400));
    // default bounds apply when a column sets none
    assert_eq!(grid.resize_column("amt", -5), Some(50));
}

#[test]
fn test_repeated_clamp_is_idempotent() {
    let once = grid();
    once.resize_column("name", 3);

    let many = grid();
    for _ in 0..5 {
        many.resize_column("name", 3);
    }
    assert_eq!(once.column_width("name"), many.column_width("name"));
}

#[test]
fn test_drag_measures_from_start_width() {
    let grid = grid();
    let drag = grid.begin_resize("name").unwrap();
    grid.drag_resize(&drag, 30);
    grid.drag_resize(&drag, 50);
    assert_eq!(grid.column_width("name"), Some(250));
    grid.drag_resize(&drag, -500);
    assert_eq!(grid.column_width("name"), Some(100));
}

#[test]
fn test_fixed_columns_do_not_resize() {
    let grid = grid();
    assert_eq!(grid.resize_column("actions", 200), None);
    assert!(grid.begin_resize("actions").is_none());
    assert_eq!(grid.column_width("actions"), Some(90));
}

#[test]
fn test_reorder_never_interleaves_frozen() {
    let grid = grid();
    // move "amt" to the very front
    assert!(grid.move_column(3, 0));
    assert_eq!(keys(&grid), vec!["id", "code", "amt", "name", "actions", "status"]);

    // reorder inside the left bucket
    assert!(grid.move_column(1, 0));
    assert_eq!(keys(&grid), vec!["code", "id", "amt", "name", "actions", "status"]);
    assert_eq!(offset(&grid, "id"), Some(128));
}

#[test]
fn test_data_changes_keep_widths() {
    let grid = grid();
    grid.resize_column("amt", 300);
    grid.set_rows(vec![Row::new().set("id", 1)]);
    assert_eq!(grid.column_width("amt"), Some(300));

    // same keys: widths kept
    assert!(!grid.set_columns(columns()).unwrap());
    assert_eq!(grid.column_width("amt"), Some(300));

    // key list changed: widths re-seeded
    let mut changed = columns();
    changed.pop();
    assert!(grid.set_columns(changed).unwrap());
    assert_eq!(grid.column_width("amt"), Some(120));
}

#[derive(Default)]
struct LayoutRecorder {
    resized: Mutex<Vec<(String, u32)>>,
    reordered: Mutex<Vec<Vec<String>>>,
}

impl GridListener for LayoutRecorder {
    fn on_column_resize(&self, key: &str, width: u32) {
        self.resized.lock().unwrap().push((key.to_string(), width));
    }

    fn on_column_reorder(&self, columns: &[Column]) {
        let keys = columns.iter().map(|c| c.key.clone()).collect();
        self.reordered.lock().unwrap().push(keys);
    }
}

#[test]
fn test_layout_notifications() {
    let recorder = Arc::new(LayoutRecorder::default());
    let grid = grid().with_listener(recorder.clone());
    grid.resize_column("name", 5);
    grid.move_column(2, 3);

    assert_eq!(*recorder.resized.lock().unwrap(), vec![("name".to_string(), 100)]);
    assert_eq!(
        recorder.reordered.lock().unwrap()[0],
        vec!["id", "code", "amt", "name", "actions", "status"]
    );
}
