//! In-memory page loader.

use async_trait::async_trait;

use super::Page;
use super::PageLoader;
use super::PageRequest;
use crate::error::LoadError;
use crate::model::Row;
use crate::query::passes_all;
use crate::query::compare_directed;

/// Serves pages from a fixed row set, applying the request's filters and sort
/// the way a server would.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    rows: Vec<Row>,
}

impl MemoryLoader {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Synchronous form of [`PageLoader::load_page`].
    pub fn page(&self, request: &PageRequest) -> Page {
        let mut matching: Vec<&Row> = self
            .rows
            .iter()
            .filter(|row| passes_all(row, &request.filters))
            .collect();
        if let Some(sort) = &request.sort {
            matching.sort_by(|a, b| {
                compare_directed(a.value(&sort.key), b.value(&sort.key), sort.direction)
            });
        }

        let total = matching.len();
        let start = request.offset().min(total);
        let end = (start + request.page_size).min(total);
        Page::new(matching[start..end].iter().map(|r| (*r).clone()).collect(), total)
    }
}

#[async_trait]
impl PageLoader for MemoryLoader {
    async fn load_page(&self, request: &PageRequest) -> Result<Page, LoadError> {
        Ok(self.page(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::FilterOperator;
    use crate::query::FilterValue;
    use crate::query::SortState;

    fn loader() -> MemoryLoader {
        MemoryLoader::new((1..=5).map(|i| Row::new().set("id", i).set("amt", i * 10)).collect())
    }

    fn request(page: usize, page_size: usize) -> PageRequest {
        PageRequest {
            page,
            page_size,
            filters: Vec::new(),
            sort: None,
            generation: 0,
            ticket: 0,
        }
    }

    #[test]
    fn test_pages() {
        let page = loader().page(&request(2, 2));
        assert_eq!(page.total_items(), 5);
        let ids: Vec<_> = page.rows().iter().map(|r| r.value("id").to_string()).collect();
        assert_eq!(ids, ["3", "4"]);
    }

    #[test]
    fn test_out_of_range_is_empty() {
        let page = loader().page(&request(9, 2));
        assert!(page.is_empty());
        assert_eq!(page.total_items(), 5);
    }

    #[test]
    fn test_filters_and_sort_apply() {
        let mut req = request(1, 10);
        req.filters = vec![FilterValue::new("amt", 30, FilterOperator::Gte)];
        req.sort = Some(SortState::desc("amt"));
        let page = loader().page(&req);
        let ids: Vec<_> = page.rows().iter().map(|r| r.value("id").to_string()).collect();
        assert_eq!(ids, ["5", "4", "3"]);
        assert_eq!(page.total_items(), 3);
    }
}
