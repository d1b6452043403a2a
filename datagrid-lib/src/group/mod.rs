//! Hierarchical grouping with per-group aggregation
//!
//! Rows are partitioned level by level according to an ordered list of
//! [`GroupConfig`]s, outermost first. Each partition carries the aggregates
//! requested for its level.
//!
//! # Example
//!
//! ```
//! use datagrid_lib::group::{AggregateType, Aggregation, GroupConfig, build_groups};
//! use datagrid_lib::model::{Row, RowEntry};
//!
//! let rows = vec![
//!     RowEntry::new(1, Row::new().set("dept", "A").set("amt", 10)),
//!     RowEntry::new(2, Row::new().set("dept", "B").set("amt", 20)),
//!     RowEntry::new(3, Row::new().set("dept", "A").set("amt", 30)),
//! ];
//! let config = [GroupConfig::new("dept").aggregate(Aggregation::new("amt", AggregateType::Sum))];
//!
//! let groups = build_groups(&rows, &config);
//! assert_eq!(groups.len(), 2);
//! assert_eq!(groups[0].aggregate("amt_sum"), Some(40.0));
//! ```

mod aggregate;
mod tree;

pub use aggregate::AggregateType;
pub use aggregate::Aggregation;
pub use aggregate::aggregate_rows;
pub use tree::GroupConfig;
pub use tree::GroupContent;
pub use tree::GroupLine;
pub use tree::GroupNode;
pub use tree::build_groups;
pub use tree::flatten_leaves;
pub use tree::visible_lines;
