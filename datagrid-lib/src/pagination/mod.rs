//! Pagination: client-side slicing and lazily loaded remote pages
//!
//! The two data-sourcing models are mutually exclusive and chosen by
//! [`PaginationMode`]:
//!
//! - **Client** - the full dataset is in memory; each page is a window over
//!   the filtered and sorted rows. With `infinite_scroll` the window grows
//!   cumulatively from the first row instead.
//! - **Lazy** - each page is fetched from a [`PageLoader`]; its rows are
//!   displayed verbatim and `total_items` is whatever the loader reports.

mod loader;
mod memory;
mod state;

pub use loader::FnLoader;
pub use loader::LoadOutcome;
pub use loader::Page;
pub use loader::PageLoader;
pub use loader::PageRequest;
pub use memory::MemoryLoader;
pub use state::PageInfo;
pub use state::PaginationConfig;
pub use state::PaginationMode;
pub use state::PaginationState;
