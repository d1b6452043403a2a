//! Filtering and sorting
//!
//! # Shared Types
//!
//! - [`FilterValue`] / [`FilterStore`] - per-column filter predicates
//! - [`SortState`] / [`Sorter`] - the single active sort key
//! - [`compare_values`] - ordering shared by sorting and group ordering

mod filter;
mod order;

pub use filter::FilterOperator;
pub use filter::FilterStore;
pub use filter::FilterValue;
pub use filter::passes;
pub use filter::passes_all;
pub use order::Direction;
pub use order::SortCycle;
pub use order::SortState;
pub use order::Sorter;
pub use order::compare_directed;
pub use order::compare_values;
pub use order::sort_entries;
