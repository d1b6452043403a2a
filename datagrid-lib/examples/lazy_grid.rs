use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use datagrid_lib::error::{BulkActionError, LoadError};
use datagrid_lib::events::{BulkActionHandler, GridListener};
use datagrid_lib::identity::RowIdentity;
use datagrid_lib::model::{Column, Row};
use datagrid_lib::pagination::{
    MemoryLoader, Page, PageInfo, PageLoader, PageRequest, PaginationConfig,
};
use datagrid_lib::query::FilterOperator;
use datagrid_lib::{DataGrid, GridConfig};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

/// Simulates a remote service: filtering and sorting happen "server-side".
struct SlowService {
    backend: MemoryLoader,
}

#[async_trait]
impl PageLoader for SlowService {
    async fn load_page(&self, request: &PageRequest) -> Result<Page, LoadError> {
        tokio::time::sleep(Duration::from_millis(50)).await;
        log::info!("served page {} (size {})", request.page, request.page_size);
        self.backend.load_page(request).await
    }
}

struct PrintListener;

impl GridListener for PrintListener {
    fn on_page_change(&self, page: &PageInfo) {
        log::info!("page {}/{}", page.current_page, page.total_pages);
    }

    fn on_load_error(&self, error: &LoadError) {
        log::error!("{error}");
    }
}

struct Export;

#[async_trait]
impl BulkActionHandler for Export {
    async fn on_bulk_action(&self, action_id: &str, rows: Vec<Row>) -> Result<(), BulkActionError> {
        for row in &rows {
            println!("{action_id}: {} ({})", row.value("sku"), row.value("stock"));
        }
        Ok(())
    }
}

fn inventory() -> Vec<Row> {
    (1..=47i64)
        .map(|i| {
            Row::new()
                .set("sku", format!("SKU-{i:03}"))
                .set("warehouse", if i % 3 == 0 { "East" } else { "West" })
                .set("stock", (i * 37) % 101)
        })
        .collect()
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    TermLogger::init(
        LevelFilter::Debug,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let config = GridConfig::new(vec![
        Column::new("sku", "SKU", 100),
        Column::new("warehouse", "Warehouse", 100),
        Column::new("stock", "Stock", 80).sortable(),
    ])
    .with_identity(RowIdentity::field("sku"))
    .with_pagination(PaginationConfig::lazy(10));

    let service = SlowService {
        backend: MemoryLoader::new(inventory()),
    };
    let grid = DataGrid::new(config)?
        .with_loader(Arc::new(service))
        .with_listener(Arc::new(PrintListener));

    grid.load().await?;
    grid.select_all(true);

    grid.set_filter("warehouse", "East", FilterOperator::Equals);
    grid.sort("stock");
    grid.load().await?;
    for entry in grid.view().rows {
        println!("{} {} {}", entry.id, entry.row.value("warehouse"), entry.row.value("stock"));
    }

    grid.load_page(2).await?;
    grid.select_all(true);

    let exported = grid.run_bulk_action("export", &Export).await?;
    println!("exported {exported} rows across pages");
    Ok(())
}
