//! Row identity derivation.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use crate::model::Row;
use crate::model::RowEntry;
use crate::model::RowId;

/// Rule used to derive a stable [`RowId`] for each row.
///
/// Identities are computed once, when rows enter the grid, so selection and
/// expansion survive re-filtering and re-sorting. `Field` and `Composite` fall
/// back to the positional index for rows missing the key.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "keys")]
pub enum RowIdentity {
    /// The value of one field, e.g. `"id"`.
    Field(String),
    /// Several field values joined with `|`.
    Composite(Vec<String>),
    /// Position in the source array (or `(page-1)*pageSize + i` for lazy pages).
    #[default]
    Index,
    /// Host-supplied selector.
    #[serde(skip)]
    Custom(Arc<dyn Fn(&Row) -> Option<String> + Send + Sync>),
}

impl RowIdentity {
    pub fn field(key: impl Into<String>) -> Self {
        Self::Field(key.into())
    }

    pub fn composite(keys: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self::Composite(keys.into_iter().map(Into::into).collect())
    }

    pub fn custom(selector: impl Fn(&Row) -> Option<String> + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(selector))
    }

    /// Column keys this identity reads, for config validation.
    pub fn keys(&self) -> Vec<&str> {
        match self {
            Self::Field(key) => vec![key.as_str()],
            Self::Composite(keys) => keys.iter().map(String::as_str).collect(),
            Self::Index | Self::Custom(_) => Vec::new(),
        }
    }

    /// Derives the id of `row` found at `position` in its source.
    pub fn identify(&self, row: &Row, position: usize) -> RowId {
        let derived = match self {
            Self::Field(key) => row
                .get(key)
                .filter(|v| !v.is_null())
                .map(|v| v.as_text().into_owned()),
            Self::Composite(keys) => {
                let parts: Option<Vec<String>> = keys
                    .iter()
                    .map(|k| row.get(k).map(|v| v.as_text().into_owned()))
                    .collect();
                parts.map(|p| p.join("|"))
            }
            Self::Index => None,
            Self::Custom(selector) => selector(row),
        };
        match derived {
            Some(id) => RowId::new(id),
            None => RowId::new(format!("#{position}")),
        }
    }

    /// Pairs each row with its identity; `offset` is the source position of
    /// the first row.
    pub fn assign(&self, rows: Vec<Row>, offset: usize) -> Vec<RowEntry> {
        rows.into_iter()
            .enumerate()
            .map(|(i, row)| RowEntry {
                id: self.identify(&row, offset + i),
                row,
            })
            .collect()
    }
}

impl fmt::Debug for RowIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(key) => f.debug_tuple("Field").field(key).finish(),
            Self::Composite(keys) => f.debug_tuple("Composite").field(keys).finish(),
            Self::Index => f.write_str("Index"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
