//! Error types

mod bulk;
mod config;
mod grid;
mod load;

pub use bulk::*;
pub use config::*;
pub use grid::*;
pub use load::*;
