//! Remote page loading contract.

use std::future::Future;

use async_trait::async_trait;

use crate::error::LoadError;
use crate::model::Row;
use crate::query::FilterValue;
use crate::query::SortState;

/// One page of rows returned by a [`PageLoader`].
///
/// # Example
///
/// ```
/// use datagrid_lib::model::Row;
/// use datagrid_lib::pagination::Page;
///
/// let page = Page::new(vec![Row::new().set("id", 1)], 42);
/// assert_eq!(page.len(), 1);
/// assert_eq!(page.total_items(), 42);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    data: Vec<Row>,
    total_items: usize,
}

impl Page {
    /// Creates a page with its rows and the total item count of the source.
    pub fn new(data: Vec<Row>, total_items: usize) -> Self {
        Self { data, total_items }
    }

    /// An empty page, as returned for out-of-range requests.
    pub fn empty(total_items: usize) -> Self {
        Self::new(Vec::new(), total_items)
    }

    pub fn rows(&self) -> &[Row] {
        &self.data
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.data
    }

    /// Authoritative item count across all pages.
    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Parameters a page request was issued for.
///
/// The grid compares a response's request against its current state and
/// discards responses issued for a different page, page size or
/// filter/sort generation.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: usize,
    pub page_size: usize,
    /// Active filters, for loaders that filter server-side.
    pub filters: Vec<FilterValue>,
    /// Active sort, for loaders that sort server-side.
    pub sort: Option<SortState>,
    /// Filter/sort generation the request belongs to.
    pub generation: u64,
    /// Unique per issued request.
    pub(crate) ticket: u64,
}

impl PageRequest {
    /// Index of the first row of this page in the full result.
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.page_size
    }
}

/// Result of applying a loader response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The page was displayed.
    Applied { rows: usize, total_items: usize },
    /// The grid moved on before the response arrived; it was ignored.
    Stale,
    /// The requested page lies outside the known page range; nothing was
    /// requested.
    OutOfRange,
}

/// Source of rows for lazy pagination.
///
/// Implementations must be idempotent for the same `(page, page_size)` and
/// return an empty page, not an error, for out-of-range pages.
#[async_trait]
pub trait PageLoader: Send + Sync {
    async fn load_page(&self, request: &PageRequest) -> Result<Page, LoadError>;
}

/// Adapts an async closure into a [`PageLoader`].
///
/// ```
/// use datagrid_lib::error::LoadError;
/// use datagrid_lib::pagination::{FnLoader, Page, PageRequest};
///
/// let loader = FnLoader::new(|request: PageRequest| async move {
///     Ok::<_, LoadError>(Page::empty(request.page_size * 3))
/// });
/// ```
pub struct FnLoader<F> {
    load: F,
}

impl<F> FnLoader<F> {
    pub fn new(load: F) -> Self {
        Self { load }
    }
}

#[async_trait]
impl<F, Fut> PageLoader for FnLoader<F>
where
    F: Fn(PageRequest) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Page, LoadError>> + Send,
{
    async fn load_page(&self, request: &PageRequest) -> Result<Page, LoadError> {
        (self.load)(request.clone()).await
    }
}
