//! Bulk action error types

/// Error returned by a [`BulkActionHandler`](crate::events::BulkActionHandler).
#[derive(Debug, Clone, thiserror::Error)]
#[error("Bulk action '{action_id}' failed: {message}")]
pub struct BulkActionError {
    /// The action that failed.
    pub action_id: String,
    /// Human-readable reason.
    pub message: String,
}

impl BulkActionError {
    /// Creates a new bulk action error.
    pub fn new(action_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            action_id: action_id.into(),
            message: message.into(),
        }
    }
}
