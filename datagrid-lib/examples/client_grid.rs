use std::fs::File;

use datagrid_lib::group::{AggregateType, Aggregation, GroupConfig, GroupLine};
use datagrid_lib::identity::RowIdentity;
use datagrid_lib::model::{Alignment, Column, FilterType, Frozen, Row, Value};
use datagrid_lib::pagination::PaginationConfig;
use datagrid_lib::query::FilterOperator;
use datagrid_lib::{DataGrid, GridConfig, GridView};
use simplelog::{Config, LevelFilter, WriteLogger};

fn columns() -> Vec<Column> {
    vec![
        Column::new("id", "ID", 60).frozen(Frozen::Left).fixed(),
        Column::new("name", "Name", 180).sortable().filterable(FilterType::Text),
        Column::new("dept", "Department", 120).sortable().filterable(FilterType::Select),
        Column::new("amt", "Amount", 100)
            .sortable()
            .filterable(FilterType::Number)
            .align(Alignment::Right)
            .renderer(|value: &Value, _row: &Row| match value.as_f64() {
                Some(n) => format!("${n:.2}"),
                None => "-".to_string(),
            }),
    ]
}

fn rows() -> Vec<Row> {
    let people = [
        (1, "Ada", "Engineering", 120),
        (2, "Grace", "Engineering", 135),
        (3, "Linus", "Operations", 90),
        (4, "Barbara", "Research", 150),
        (5, "Ken", "Operations", 80),
        (6, "Margaret", "Research", 140),
        (7, "Dennis", "Engineering", 110),
    ];
    people
        .into_iter()
        .map(|(id, name, dept, amt)| {
            Row::new()
                .set("id", id)
                .set("name", name)
                .set("dept", dept)
                .set("amt", amt)
        })
        .collect()
}

fn print_view(grid: &DataGrid, view: &GridView) {
    let columns = grid.columns();
    for line in view.lines() {
        match line {
            GroupLine::Header { group, expanded } => {
                let marker = if expanded { "v" } else { ">" };
                let indent = "  ".repeat(group.depth);
                let total = group.aggregate("amt_sum").unwrap_or_default();
                println!(
                    "{indent}{marker} {} ({} rows, total {total})",
                    group.value, group.row_count
                );
            }
            GroupLine::Row { entry, depth } => {
                let cells: Vec<String> = columns.iter().map(|c| c.render(&entry.row)).collect();
                println!("{}{}", "  ".repeat(depth), cells.join(" | "));
            }
        }
    }
    let page = view.page;
    println!(
        "-- showing {}-{} of {} (page {}/{})\n",
        page.first_item, page.last_item, page.total_items, page.current_page, page.total_pages
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_file = File::create("client_grid.log")?;
    WriteLogger::init(LevelFilter::Trace, Config::default(), log_file)?;

    let config = GridConfig::new(columns())
        .with_identity(RowIdentity::field("id"))
        .with_pagination(PaginationConfig::client(3));
    let grid = DataGrid::new(config)?;
    grid.set_rows(rows());

    println!("== first page");
    print_view(&grid, &grid.view());

    println!("== sorted by amount, descending");
    grid.sort("amt");
    grid.sort("amt");
    print_view(&grid, &grid.view());

    println!("== amount >= 100, page 2");
    grid.set_filter("amt", 100, FilterOperator::Gte);
    grid.next_page();
    print_view(&grid, &grid.view());

    println!("== grouped by department, pagination off");
    grid.clear_filters();
    grid.set_page_size(rows().len());
    grid.set_grouping(vec![
        GroupConfig::new("dept").aggregate(Aggregation::new("amt", AggregateType::Sum)),
    ])?;
    grid.toggle_group("0-Operations");
    print_view(&grid, &grid.view());

    Ok(())
}
