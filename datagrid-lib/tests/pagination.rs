mod common;

use common::{ids, scenario_config, scenario_grid, scenario_rows};
use datagrid_lib::DataGrid;
use datagrid_lib::model::Row;
use datagrid_lib::pagination::{PaginationConfig, PaginationMode};

#[test]
fn test_second_page_scenario() {
    let grid = scenario_grid(2);
    assert!(grid.go_to_page(2));
    assert_eq!(ids(&grid.view().rows), vec!["3", "4"]);
}

#[test]
fn test_total_pages_is_ceiling() {
    for page_size in 1..=7 {
        for n in 0..=12usize {
            let grid = DataGrid::new(scenario_config(PaginationConfig::client(page_size))).unwrap();
            grid.set_rows((0..n).map(|i| Row::new().set("id", i as i64)).collect());
            assert_eq!(grid.page_info().total_pages, n.div_ceil(page_size));
        }
    }
}

#[test]
fn test_out_of_range_pages_are_ignored() {
    let grid = scenario_grid(2);
    let total_pages = grid.page_info().total_pages;
    assert_eq!(total_pages, 3);

    assert!(!grid.go_to_page(0));
    assert_eq!(grid.page_info().current_page, 1);
    assert!(!grid.go_to_page(total_pages + 1));
    assert_eq!(grid.page_info().current_page, 1);
    assert!(!grid.previous_page());
}

#[test]
fn test_page_size_change_resets_page() {
    let grid = scenario_grid(2);
    grid.last_page();
    assert_eq!(grid.page_info().current_page, 3);

    assert!(grid.set_page_size(4));
    let info = grid.page_info();
    assert_eq!(info.current_page, 1);
    assert_eq!(info.total_pages, 2);
}

#[test]
fn test_page_info_ranges() {
    let grid = scenario_grid(2);
    grid.last_page();
    let info = grid.page_info();
    assert_eq!((info.first_item, info.last_item), (5, 5));
    assert!(info.has_previous);
    assert!(!info.has_next);
}

#[test]
fn test_shrinking_dataset_clamps_page() {
    let grid = scenario_grid(2);
    grid.last_page();
    grid.set_rows(scenario_rows().into_iter().take(2).collect());
    assert_eq!(grid.page_info().current_page, 1);
    assert_eq!(grid.view().rows.len(), 2);
}

#[test]
fn test_infinite_scroll_grows_window() {
    let config = scenario_config(PaginationConfig::client(2).with_infinite_scroll());
    let grid = DataGrid::new(config).unwrap();
    grid.set_rows(scenario_rows());
    assert_eq!(ids(&grid.view().rows), vec!["1", "2"]);

    assert!(grid.load_more());
    assert_eq!(ids(&grid.view().rows), vec!["1", "2", "3", "4"]);

    assert!(grid.load_more());
    assert_eq!(grid.view().rows.len(), 5);
    assert!(!grid.has_more());
    assert!(!grid.load_more());
}

#[test]
fn test_load_more_waits_for_previous_step() {
    let config = scenario_config(PaginationConfig::client(2).with_infinite_scroll());
    let grid = DataGrid::new(config).unwrap();
    grid.set_rows(scenario_rows());

    assert!(grid.begin_load_more());
    assert!(!grid.begin_load_more());
    assert_eq!(grid.page_info().current_page, 1);

    assert!(grid.complete_load_more());
    assert_eq!(grid.page_info().current_page, 2);
    assert!(grid.begin_load_more());
}

#[test]
fn test_disabled_pagination_shows_everything() {
    let grid = DataGrid::new(scenario_config(PaginationConfig::disabled())).unwrap();
    grid.set_rows(scenario_rows());
    let view = grid.view();
    assert_eq!(grid.pagination_mode(), PaginationMode::Disabled);
    assert_eq!(view.rows.len(), 5);
    assert_eq!(view.page.total_pages, 1);
}
