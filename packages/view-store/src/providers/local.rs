//! Key-value [`StorageProvider`] over a browser-style storage medium.
//!
//! In the original deployment the medium is the browser's `localStorage`
//! global; on the server side it is absent and every call fails fast. Here
//! the medium is abstracted as [`KeyValueBackend`], with [`MemoryBackend`]
//! as the in-process implementation for tests and ephemeral sessions.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use zopio_view_core::ViewSchema;

use crate::error::StoreError;
use crate::provider::StorageProvider;

/// Key prefix used when none is configured.
pub const DEFAULT_PREFIX: &str = "zopio_view_";

/// Synchronous string key-value medium, the `localStorage` analog.
///
/// Implementations hold the actual storage; the provider only namespaces
/// keys and (de)serializes documents. Used as `Arc<dyn KeyValueBackend>`.
pub trait KeyValueBackend: Send + Sync {
    /// Reads the value stored under `key`.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Writes `value` under `key`, overwriting any existing value.
    ///
    /// Fails when the medium rejects the write (e.g. quota exhausted).
    fn set_item(&self, key: &str, value: String) -> Result<(), std::io::Error>;

    /// Removes the value under `key`. Removing a missing key is a no-op.
    fn remove_item(&self, key: &str);

    /// Returns every key currently present, in no particular order.
    fn keys(&self) -> Vec<String>;
}

/// In-process [`KeyValueBackend`] backed by a [`DashMap`].
#[derive(Default)]
pub struct MemoryBackend {
    entries: DashMap<String, String>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|v| v.clone())
    }

    fn set_item(&self, key: &str, value: String) -> Result<(), std::io::Error> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove_item(&self, key: &str) {
        self.entries.remove(key);
    }

    fn keys(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.key().clone()).collect()
    }
}

/// [`StorageProvider`] that namespaces documents under a key prefix in a
/// [`KeyValueBackend`].
///
/// Constructed with `backend: None` when the environment provides no medium;
/// every operation then fails with [`StoreError::EnvironmentMismatch`]
/// without touching anything. Documents are stored as compact JSON.
pub struct LocalStorageProvider {
    backend: Option<Arc<dyn KeyValueBackend>>,
    prefix: String,
}

impl LocalStorageProvider {
    /// Creates a provider over `backend` with the given key prefix.
    #[must_use]
    pub fn new(backend: Option<Arc<dyn KeyValueBackend>>, prefix: impl Into<String>) -> Self {
        Self {
            backend,
            prefix: prefix.into(),
        }
    }

    fn backend(&self, operation: &'static str) -> Result<&Arc<dyn KeyValueBackend>, StoreError> {
        self.backend
            .as_ref()
            .ok_or(StoreError::EnvironmentMismatch { operation })
    }

    fn key_for(&self, id: &str) -> String {
        format!("{}{id}", self.prefix)
    }
}

#[async_trait]
impl StorageProvider for LocalStorageProvider {
    async fn save_view(&self, id: &str, schema: &ViewSchema) -> Result<(), StoreError> {
        let backend = self.backend("save_view")?;
        let document = serde_json::to_string(schema).map_err(|source| StoreError::Parse {
            id: id.to_string(),
            source,
        })?;
        backend
            .set_item(&self.key_for(id), document)
            .map_err(|source| StoreError::Io {
                operation: "save_view",
                target: id.to_string(),
                source,
            })?;
        tracing::debug!(id, prefix = %self.prefix, "saved view to key-value storage");
        Ok(())
    }

    async fn get_view(&self, id: &str) -> Result<Option<ViewSchema>, StoreError> {
        let backend = self.backend("get_view")?;
        let Some(raw) = backend.get_item(&self.key_for(id)) else {
            return Ok(None);
        };
        let schema = serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
            id: id.to_string(),
            source,
        })?;
        Ok(Some(schema))
    }

    async fn list_views(&self) -> Result<Vec<String>, StoreError> {
        let backend = self.backend("list_views")?;
        let ids = backend
            .keys()
            .into_iter()
            .filter_map(|key| key.strip_prefix(&self.prefix).map(str::to_string))
            .collect();
        Ok(ids)
    }

    async fn delete_view(&self, id: &str) -> Result<(), StoreError> {
        let backend = self.backend("delete_view")?;
        backend.remove_item(&self.key_for(id));
        tracing::debug!(id, "deleted view from key-value storage");
        Ok(())
    }
}
