//! Error taxonomy for the storage layer.

/// Failure modes of a [`StorageProvider`](crate::provider::StorageProvider)
/// operation.
///
/// Absence is not represented here: `get_view` on a missing ID returns
/// `Ok(None)` and `delete_view` on a missing ID returns `Ok(())`. Callers
/// can therefore rely on the variant to tell "missing" from "corrupt" from
/// "medium unavailable".
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The key-value provider was used with no backing medium available
    /// (the browser-global analog is absent in this environment). The call
    /// fails before any write is attempted.
    #[error("no key-value storage medium available for {operation}")]
    EnvironmentMismatch {
        /// Operation that was attempted.
        operation: &'static str,
    },

    /// The underlying read, write, delete, or directory operation failed.
    #[error("{operation} failed for {target}")]
    Io {
        /// Operation that was attempted.
        operation: &'static str,
        /// View ID, or the storage path for `list_views`.
        target: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The document stored at `id` could not be encoded or decoded as a
    /// schema. Distinct from absence: the bytes exist but are not usable.
    #[error("stored document for view {id:?} is not a valid schema")]
    Parse {
        /// View ID of the offending document.
        id: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}
