//! Shared fixtures for integration tests.

#![allow(dead_code)]

use datagrid_lib::identity::RowIdentity;
use datagrid_lib::model::{Column, Row, RowEntry, RowId};
use datagrid_lib::pagination::PaginationConfig;
use datagrid_lib::{DataGrid, GridConfig};

/// `[{id:1,dept:'A',amt:10}, {id:2,dept:'B',amt:20}, {id:3,dept:'A',amt:30},
///   {id:4,dept:'A',amt:5}, {id:5,dept:'B',amt:15}]`
pub fn scenario_rows() -> Vec<Row> {
    [(1, "A", 10), (2, "B", 20), (3, "A", 30), (4, "A", 5), (5, "B", 15)]
        .into_iter()
        .map(|(id, dept, amt)| Row::new().set("id", id).set("dept", dept).set("amt", amt))
        .collect()
}

pub fn scenario_columns() -> Vec<Column> {
    vec![
        Column::new("id", "ID", 80),
        Column::new("dept", "Department", 120).sortable(),
        Column::new("amt", "Amount", 120).sortable(),
    ]
}

pub fn scenario_config(pagination: PaginationConfig) -> GridConfig {
    GridConfig::new(scenario_columns())
        .with_identity(RowIdentity::field("id"))
        .with_pagination(pagination)
}

/// A client-mode grid holding the scenario rows.
pub fn scenario_grid(page_size: usize) -> DataGrid {
    let grid = DataGrid::new(scenario_config(PaginationConfig::client(page_size))).unwrap();
    grid.set_rows(scenario_rows());
    grid
}

pub fn ids(rows: &[RowEntry]) -> Vec<String> {
    rows.iter().map(|entry| entry.id.to_string()).collect()
}

pub fn id(raw: i32) -> RowId {
    RowId::from(raw)
}
