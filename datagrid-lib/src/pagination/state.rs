//! Page position bookkeeping.

use std::ops::Range;

use serde::Deserialize;
use serde::Serialize;

/// Default rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// How rows are sourced and paged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaginationMode {
    /// Slice an in-memory dataset.
    #[default]
    Client,
    /// Fetch each page from a loader.
    Lazy,
    /// Show every row as a single window.
    Disabled,
}

/// Pagination configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaginationConfig {
    pub mode: PaginationMode,
    pub page_size: usize,
    /// Choices offered by a page-size picker.
    pub page_size_options: Vec<usize>,
    /// Cumulative "load more" window instead of fixed pages (client mode).
    pub infinite_scroll: bool,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            mode: PaginationMode::Client,
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: vec![10, 25, 50, 100],
            infinite_scroll: false,
        }
    }
}

impl PaginationConfig {
    pub fn client(page_size: usize) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }

    pub fn lazy(page_size: usize) -> Self {
        Self {
            mode: PaginationMode::Lazy,
            page_size,
            ..Self::default()
        }
    }

    pub fn disabled() -> Self {
        Self {
            mode: PaginationMode::Disabled,
            ..Self::default()
        }
    }

    pub fn with_infinite_scroll(mut self) -> Self {
        self.infinite_scroll = true;
        self
    }

    pub fn with_page_size_options(mut self, options: impl IntoIterator<Item = usize>) -> Self {
        self.page_size_options = options.into_iter().collect();
        self
    }
}

/// Snapshot of the pagination position for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageInfo {
    pub current_page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    /// 1-based index of the first displayed item, 0 when nothing is shown.
    pub first_item: usize,
    /// 1-based index of the last displayed item, 0 when nothing is shown.
    pub last_item: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

/// Current page, page size and item count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState {
    mode: PaginationMode,
    infinite_scroll: bool,
    current_page: usize,
    page_size: usize,
    total_items: usize,
}

impl PaginationState {
    pub fn new(config: &PaginationConfig) -> Self {
        Self {
            mode: config.mode,
            infinite_scroll: config.infinite_scroll && config.mode == PaginationMode::Client,
            current_page: 1,
            page_size: config.page_size.max(1),
            total_items: 0,
        }
    }

    pub fn mode(&self) -> PaginationMode {
        self.mode
    }

    pub fn is_lazy(&self) -> bool {
        self.mode == PaginationMode::Lazy
    }

    pub fn is_infinite(&self) -> bool {
        self.infinite_scroll
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// `ceil(total_items / page_size)`; 1 when pagination is disabled and
    /// there is at least one item.
    pub fn total_pages(&self) -> usize {
        if self.mode == PaginationMode::Disabled {
            return usize::from(self.total_items > 0);
        }
        self.total_items.div_ceil(self.page_size)
    }

    /// Moves to `page`. Out-of-range requests are no-ops.
    ///
    /// Returns `true` if the page changed.
    pub fn go_to(&mut self, page: usize) -> bool {
        if page < 1 || page > self.total_pages() || page == self.current_page {
            return false;
        }
        self.current_page = page;
        true
    }

    /// Changes the page size and returns to page 1.
    ///
    /// Returns `false` for a zero or unchanged size.
    pub fn set_page_size(&mut self, size: usize) -> bool {
        if size == 0 || size == self.page_size {
            return false;
        }
        self.page_size = size;
        self.current_page = 1;
        true
    }

    /// Updates the item count, clamping the current page into range.
    pub fn set_total_items(&mut self, total: usize) {
        self.total_items = total;
        let last = self.total_pages().max(1);
        if self.current_page > last {
            self.current_page = last;
        }
    }

    /// Returns to page 1. Returns `true` if the page changed.
    pub fn reset(&mut self) -> bool {
        let changed = self.current_page != 1;
        self.current_page = 1;
        changed
    }

    /// `true` if the cumulative window does not yet cover every item.
    pub fn has_more(&self) -> bool {
        self.current_page * self.page_size < self.total_items
    }

    /// Grows the cumulative window by one page.
    pub(crate) fn advance(&mut self) -> bool {
        if !self.has_more() {
            return false;
        }
        self.current_page += 1;
        true
    }

    /// Index range of the displayed rows within a client-side result of `len`
    /// rows.
    pub fn window(&self, len: usize) -> Range<usize> {
        let end = (self.current_page * self.page_size).min(len);
        match self.mode {
            PaginationMode::Disabled => 0..len,
            _ if self.infinite_scroll => 0..end,
            _ => ((self.current_page - 1) * self.page_size).min(end)..end,
        }
    }

    /// Display snapshot given how many rows are actually shown.
    pub fn info(&self, displayed: usize) -> PageInfo {
        let total_pages = self.total_pages();
        let first_item = match self.mode {
            _ if displayed == 0 => 0,
            PaginationMode::Disabled => 1,
            _ if self.infinite_scroll => 1,
            _ => (self.current_page - 1) * self.page_size + 1,
        };
        let last_item = if displayed == 0 {
            0
        } else {
            first_item + displayed - 1
        };
        PageInfo {
            current_page: self.current_page,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages,
            first_item,
            last_item,
            has_previous: self.current_page > 1 && !self.infinite_scroll,
            has_next: self.current_page < total_pages,
        }
    }
}
