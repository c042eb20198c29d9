//! The storage capability trait.

use async_trait::async_trait;
use zopio_view_core::ViewSchema;

use crate::error::StoreError;

/// Pluggable persistence backend for view schemas.
///
/// Implementations: key-value ([`LocalStorageProvider`](crate::providers::LocalStorageProvider))
/// and filesystem ([`FileStorageProvider`](crate::providers::FileStorageProvider)).
/// Used as `Arc<dyn StorageProvider>`.
///
/// Providers perform no schema validation — they persist whatever
/// well-formed document they are given. Every operation reads or writes the
/// backing medium directly; there is no cache layer, no retry, and no
/// locking. Concurrent `save_view` calls for the same ID race and the last
/// write wins, which is accepted for the single-user design-tool workloads
/// this subsystem targets.
#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// Persists a schema under `id`, overwriting any existing document.
    ///
    /// The filesystem variant creates the storage directory on demand.
    async fn save_view(&self, id: &str, schema: &ViewSchema) -> Result<(), StoreError>;

    /// Loads the schema stored under `id`.
    ///
    /// Returns `Ok(None)` when no document exists. A document that exists
    /// but does not decode fails with [`StoreError::Parse`].
    async fn get_view(&self, id: &str) -> Result<Option<ViewSchema>, StoreError>;

    /// Lists every persisted view ID. Order is unspecified.
    async fn list_views(&self) -> Result<Vec<String>, StoreError>;

    /// Deletes the document under `id`. Deleting a missing ID is a no-op.
    async fn delete_view(&self, id: &str) -> Result<(), StoreError>;
}
