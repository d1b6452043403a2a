mod common;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;

use async_trait::async_trait;
use common::{ids, scenario_config};
use datagrid_lib::error::{GridError, LoadError};
use datagrid_lib::events::GridListener;
use datagrid_lib::identity::RowIdentity;
use datagrid_lib::model::{Row, RowId};
use datagrid_lib::pagination::{
    FnLoader, LoadOutcome, MemoryLoader, Page, PageLoader, PageRequest, PaginationConfig,
};
use datagrid_lib::query::FilterOperator;
use datagrid_lib::{DataGrid, GridConfig};

fn remote_rows(n: i64) -> Vec<Row> {
    (1..=n)
        .map(|i| {
            Row::new()
                .set("id", i)
                .set("dept", if i % 2 == 0 { "B" } else { "A" })
                .set("amt", i * 10)
        })
        .collect()
}

fn lazy_grid(page_size: usize, loader: Arc<dyn PageLoader>) -> DataGrid {
    DataGrid::new(scenario_config(PaginationConfig::lazy(page_size)))
        .unwrap()
        .with_loader(loader)
}

#[tokio::test]
async fn test_loads_first_page() {
    let grid = lazy_grid(3, Arc::new(MemoryLoader::new(remote_rows(8))));

    let outcome = grid.load().await.unwrap();
    assert_eq!(outcome, LoadOutcome::Applied { rows: 3, total_items: 8 });

    let view = grid.view();
    assert_eq!(ids(&view.rows), vec!["1", "2", "3"]);
    assert_eq!(view.page.total_pages, 3);
    assert!(!view.loading);
}

#[tokio::test]
async fn test_load_page_navigates() {
    let grid = lazy_grid(3, Arc::new(MemoryLoader::new(remote_rows(8))));
    grid.load().await.unwrap();

    grid.load_page(3).await.unwrap();
    assert_eq!(ids(&grid.view().rows), vec!["7", "8"]);

    let outcome = grid.load_page(4).await.unwrap();
    assert_eq!(outcome, LoadOutcome::OutOfRange);
    assert_eq!(grid.page_info().current_page, 3);
}

#[tokio::test]
async fn test_rows_are_displayed_verbatim() {
    // A loader that ignores filters; the grid must not filter locally.
    let loader = FnLoader::new(|request: PageRequest| async move {
        let rows = vec![
            Row::new().set("id", 20).set("amt", 1),
            Row::new().set("id", 10).set("amt", 999),
        ];
        Ok::<_, LoadError>(Page::new(rows, request.page_size * 4))
    });
    let grid = lazy_grid(2, Arc::new(loader));
    grid.set_filter("amt", 500, FilterOperator::Gt);
    grid.sort("amt");
    grid.load().await.unwrap();

    assert_eq!(ids(&grid.view().rows), vec!["20", "10"]);
    assert_eq!(grid.page_info().total_items, 8);
}

#[tokio::test]
async fn test_request_carries_filters_and_sort() {
    let grid = lazy_grid(2, Arc::new(MemoryLoader::new(remote_rows(8))));
    grid.set_filter("dept", "B", FilterOperator::Equals);
    grid.sort("amt");
    grid.sort("amt");
    grid.load().await.unwrap();

    assert_eq!(ids(&grid.view().rows), vec!["8", "6"]);
    assert_eq!(grid.page_info().total_items, 4);
}

#[tokio::test]
async fn test_index_identity_uses_page_offset() {
    let config = scenario_config(PaginationConfig::lazy(3)).with_identity(RowIdentity::Index);
    let grid = DataGrid::new(config)
        .unwrap()
        .with_loader(Arc::new(MemoryLoader::new(remote_rows(8))));
    grid.load().await.unwrap();
    grid.load_page(2).await.unwrap();
    assert_eq!(ids(&grid.view().rows), vec!["#3", "#4", "#5"]);
}

#[test]
fn test_second_request_blocked_while_in_flight() {
    let grid = DataGrid::new(scenario_config(PaginationConfig::lazy(2))).unwrap();
    let first = grid.begin_load().unwrap();
    assert!(grid.is_loading());
    assert!(matches!(grid.begin_load(), Err(GridError::LoadInFlight)));

    grid.complete_load(&first, Ok(Page::new(remote_rows(2), 6))).unwrap();
    assert!(!grid.is_loading());
    assert!(grid.begin_load().is_ok());
}

#[test]
fn test_cancel_load_releases_only_its_own_request() {
    let grid = DataGrid::new(scenario_config(PaginationConfig::lazy(2))).unwrap();
    let first = grid.begin_load().unwrap();
    assert!(grid.cancel_load(&first));
    assert!(!grid.is_loading());
    assert!(!grid.cancel_load(&first));

    let second = grid.begin_load().unwrap();
    assert!(!grid.cancel_load(&first));
    assert!(grid.is_loading());

    // A late response for the cancelled request must not release the new one.
    grid.complete_load(&first, Ok(Page::new(remote_rows(2), 6))).unwrap();
    assert!(grid.is_loading());
    grid.complete_load(&second, Ok(Page::new(remote_rows(2), 6))).unwrap();
    assert!(!grid.is_loading());
}

struct SlowLoader {
    inner: MemoryLoader,
    delay: Duration,
}

#[async_trait]
impl PageLoader for SlowLoader {
    async fn load_page(&self, request: &PageRequest) -> Result<Page, LoadError> {
        tokio::time::sleep(self.delay).await;
        self.inner.load_page(request).await
    }
}

#[tokio::test]
async fn test_dropped_load_releases_in_flight_flag() {
    let grid = lazy_grid(
        2,
        Arc::new(SlowLoader {
            inner: MemoryLoader::new(remote_rows(6)),
            delay: Duration::from_millis(200),
        }),
    );

    let timed_out = tokio::time::timeout(Duration::from_millis(10), grid.load()).await;
    assert!(timed_out.is_err());
    assert!(!grid.is_loading());

    let outcome = grid.load().await.unwrap();
    assert_eq!(outcome, LoadOutcome::Applied { rows: 2, total_items: 6 });
    assert_eq!(ids(&grid.view().rows), vec!["1", "2"]);
}

#[test]
fn test_stale_response_after_page_size_change() {
    let grid = DataGrid::new(scenario_config(PaginationConfig::lazy(2))).unwrap();
    let request = grid.begin_load().unwrap();
    grid.set_page_size(5);

    let outcome = grid
        .complete_load(&request, Ok(Page::new(remote_rows(2), 6)))
        .unwrap();
    assert_eq!(outcome, LoadOutcome::Stale);
    assert!(grid.view().rows.is_empty());
    assert!(!grid.is_loading());
}

#[test]
fn test_stale_response_after_filter_change() {
    let grid = DataGrid::new(scenario_config(PaginationConfig::lazy(2))).unwrap();
    let request = grid.begin_load().unwrap();
    grid.set_filter("dept", "A", FilterOperator::Equals);

    let outcome = grid
        .complete_load(&request, Ok(Page::new(remote_rows(2), 6)))
        .unwrap();
    assert_eq!(outcome, LoadOutcome::Stale);
}

#[derive(Default)]
struct ErrorRecorder {
    errors: Mutex<Vec<String>>,
}

impl GridListener for ErrorRecorder {
    fn on_load_error(&self, error: &LoadError) {
        self.errors.lock().unwrap().push(error.to_string());
    }
}

struct FlakyLoader {
    inner: MemoryLoader,
    fail: AtomicBool,
}

#[async_trait]
impl PageLoader for FlakyLoader {
    async fn load_page(&self, request: &PageRequest) -> Result<Page, LoadError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(LoadError::failed(request.page, request.page_size, "connection reset"));
        }
        self.inner.load_page(request).await
    }
}

#[tokio::test]
async fn test_failed_load_keeps_last_good_page() {
    let loader = Arc::new(FlakyLoader {
        inner: MemoryLoader::new(remote_rows(6)),
        fail: AtomicBool::new(false),
    });
    let recorder = Arc::new(ErrorRecorder::default());
    let grid = lazy_grid(2, loader.clone()).with_listener(recorder.clone());
    grid.load().await.unwrap();

    loader.fail.store(true, Ordering::SeqCst);
    grid.go_to_page(2);
    let result = grid.load().await;
    assert!(matches!(result, Err(GridError::Load(ref e)) if e.is_retryable()));
    assert_eq!(ids(&grid.view().rows), vec!["1", "2"]);
    assert!(!grid.is_loading());
    assert_eq!(recorder.errors.lock().unwrap().len(), 1);

    loader.fail.store(false, Ordering::SeqCst);
    grid.load().await.unwrap();
    assert_eq!(ids(&grid.view().rows), vec!["3", "4"]);
}

/// Changes the grid's page size during the first request, as a user would
/// while the request is outstanding.
struct InterruptingLoader {
    inner: MemoryLoader,
    grid: OnceLock<DataGrid>,
    calls: AtomicUsize,
}

#[async_trait]
impl PageLoader for InterruptingLoader {
    async fn load_page(&self, request: &PageRequest) -> Result<Page, LoadError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0
            && let Some(grid) = self.grid.get()
        {
            grid.set_page_size(4);
        }
        self.inner.load_page(request).await
    }
}

#[tokio::test]
async fn test_load_retries_after_stale_response() {
    let loader = Arc::new(InterruptingLoader {
        inner: MemoryLoader::new(remote_rows(8)),
        grid: OnceLock::new(),
        calls: AtomicUsize::new(0),
    });
    let grid = lazy_grid(2, loader.clone());
    let _ = loader.grid.set(grid.clone());

    let outcome = grid.load().await.unwrap();
    assert_eq!(outcome, LoadOutcome::Applied { rows: 4, total_items: 8 });
    assert_eq!(loader.calls.load(Ordering::SeqCst), 2);
    assert_eq!(ids(&grid.view().rows), vec!["1", "2", "3", "4"]);
}

#[tokio::test]
async fn test_missing_loader() {
    let grid = DataGrid::new(scenario_config(PaginationConfig::lazy(2))).unwrap();
    assert!(matches!(grid.load().await, Err(GridError::NoLoader)));
}

#[tokio::test]
async fn test_client_grid_rejects_lazy_operations() {
    let grid = DataGrid::new(GridConfig::default())
        .unwrap()
        .with_loader(Arc::new(MemoryLoader::new(Vec::new())));
    assert!(matches!(grid.load().await, Err(GridError::NotLazy)));
}

#[tokio::test]
async fn test_selection_spans_lazy_pages() {
    let grid = lazy_grid(2, Arc::new(MemoryLoader::new(remote_rows(6))));
    grid.load().await.unwrap();
    grid.select_row(&RowId::from(1), true);

    grid.load_page(2).await.unwrap();
    grid.select_row(&RowId::from(4), true);

    let amounts: Vec<String> = grid
        .selected_rows()
        .iter()
        .map(|row| row.value("amt").to_string())
        .collect();
    assert_eq!(amounts, vec!["10", "40"]);
}
