//! Top-level grid error

use super::BulkActionError;
use super::ConfigError;
use super::LoadError;

/// Errors surfaced by [`DataGrid`](crate::DataGrid) operations.
///
/// User-composed state changes (filters, resizes, selecting unknown rows)
/// never produce an error; only configuration, loading and bulk actions do.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A lazy page load failed. The grid keeps its last good page.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// A bulk action handler failed. The selection is left untouched.
    #[error(transparent)]
    BulkAction(#[from] BulkActionError),

    /// The grid is in lazy mode but no loader was attached.
    #[error("No page loader attached to lazy grid")]
    NoLoader,

    /// A lazy-mode operation was invoked on a client-mode grid.
    #[error("Operation requires lazy pagination mode")]
    NotLazy,

    /// A page load is already outstanding for this grid.
    #[error("A page load is already in flight")]
    LoadInFlight,

    /// The grid state lock was poisoned by a panicking thread.
    #[error("Grid state lock poisoned")]
    Poisoned,
}
