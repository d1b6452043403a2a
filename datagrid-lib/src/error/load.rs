//! Lazy page loading error types

/// Errors reported by a [`PageLoader`](crate::pagination::PageLoader).
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The loader could not produce the requested page.
    #[error("Failed to load page {page} (size {page_size}): {message}")]
    Failed {
        /// The requested page (1-based).
        page: usize,
        /// The requested page size.
        page_size: usize,
        /// Description of the failure.
        message: String,
        /// Whether the host considers a retry worthwhile.
        retryable: bool,
    },

    /// An underlying transport or decoding error.
    #[error("Loader error: {0}")]
    Source(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl LoadError {
    /// Creates a new retryable failure for a page request.
    pub fn failed(page: usize, page_size: usize, message: impl Into<String>) -> Self {
        Self::Failed {
            page,
            page_size,
            message: message.into(),
            retryable: true,
        }
    }

    /// Creates a failure that should not be retried.
    pub fn fatal(page: usize, page_size: usize, message: impl Into<String>) -> Self {
        Self::Failed {
            page,
            page_size,
            message: message.into(),
            retryable: false,
        }
    }

    /// Returns `true` if re-issuing the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Failed { retryable, .. } => *retryable,
            Self::Source(_) => true,
        }
    }
}
