//! Interactive tabular data engine
//!
//! Keeps a mutable dataset consistent across filtering, sorting, grouping,
//! pagination, selection and column geometry, for both an in-memory row array
//! and a remotely paged data source.

pub mod config;
pub mod error;
pub mod events;
pub mod expansion;
pub mod group;
pub mod identity;
pub mod layout;
pub mod model;
pub mod pagination;
pub mod query;
pub mod selection;

mod grid;

pub use config::GridConfig;
pub use grid::*;
