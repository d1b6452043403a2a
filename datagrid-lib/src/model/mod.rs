//! Data model: cell values, rows and column definitions

mod column;
mod row;
mod value;

pub use column::*;
pub use row::*;
pub use value::Value;
