//! Configuration error types

/// Errors raised while validating or parsing a [`GridConfig`](crate::GridConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Two columns share the same key.
    #[error("Duplicate column key: {key}")]
    DuplicateColumn { key: String },

    /// A page size of zero was configured.
    #[error("Page size must be at least 1")]
    ZeroPageSize,

    /// A group level or identity selector names a column that does not exist.
    #[error("Unknown column '{key}' referenced by {context}")]
    UnknownColumn { key: String, context: &'static str },

    /// A column's minimum width exceeds its maximum width.
    #[error("Column '{key}' has min width {min} greater than max width {max}")]
    InvalidWidthBounds { key: String, min: u32, max: u32 },

    /// The configuration document could not be parsed.
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    /// Creates a new unknown column error.
    pub fn unknown_column(key: impl Into<String>, context: &'static str) -> Self {
        Self::UnknownColumn {
            key: key.into(),
            context,
        }
    }
}
