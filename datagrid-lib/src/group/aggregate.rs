//! Per-group numeric summaries.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::model::RowEntry;

/// The type of aggregation to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateType {
    /// Sum of numeric values.
    Sum,
    /// Average of numeric values.
    Avg,
    /// Number of rows in the group, numeric or not.
    Count,
    /// Minimum numeric value.
    Min,
    /// Maximum numeric value.
    Max,
}

impl AggregateType {
    pub fn name(&self) -> &'static str {
        match self {
            AggregateType::Sum => "sum",
            AggregateType::Avg => "avg",
            AggregateType::Count => "count",
            AggregateType::Min => "min",
            AggregateType::Max => "max",
        }
    }
}

/// One requested aggregate: a column and how to summarise it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregation {
    pub column_key: String,
    #[serde(rename = "type")]
    pub kind: AggregateType,
}

impl Aggregation {
    pub fn new(column_key: impl Into<String>, kind: AggregateType) -> Self {
        Self {
            column_key: column_key.into(),
            kind,
        }
    }

    /// Key of this aggregate in a group's result map: `"<columnKey>_<type>"`.
    pub fn result_key(&self) -> String {
        format!("{}_{}", self.column_key, self.kind.name())
    }

    /// Computes the aggregate over `rows`.
    ///
    /// Non-numeric cells are skipped. With no numeric cells, every type but
    /// `count` yields `0.0`.
    pub fn compute(&self, rows: &[RowEntry]) -> f64 {
        if self.kind == AggregateType::Count {
            return rows.len() as f64;
        }

        let numbers: Vec<f64> = rows
            .iter()
            .filter_map(|e| e.row.value(&self.column_key).as_f64())
            .collect();
        if numbers.is_empty() {
            return 0.0;
        }

        match self.kind {
            AggregateType::Sum => numbers.iter().sum(),
            AggregateType::Avg => numbers.iter().sum::<f64>() / numbers.len() as f64,
            AggregateType::Min => numbers.iter().copied().fold(f64::INFINITY, f64::min),
            AggregateType::Max => numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            AggregateType::Count => rows.len() as f64,
        }
    }
}

/// Computes every aggregation over `rows`, keyed by [`Aggregation::result_key`].
pub fn aggregate_rows(rows: &[RowEntry], aggregations: &[Aggregation]) -> BTreeMap<String, f64> {
    aggregations
        .iter()
        .map(|agg| (agg.result_key(), agg.compute(rows)))
        .collect()
}
