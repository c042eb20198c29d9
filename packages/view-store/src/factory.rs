//! Provider construction from configuration.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::provider::StorageProvider;
use crate::providers::{
    DEFAULT_PREFIX, FileStorageProvider, KeyValueBackend, LocalStorageProvider,
};

/// Directory used by the filesystem provider when none is configured.
pub const DEFAULT_STORAGE_PATH: &str = ".zopio/views";

/// Which provider variant to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    /// Key-value provider over a browser-style storage medium.
    Local,
    /// Filesystem provider, one JSON document per view. The default.
    #[default]
    File,
}

/// Configuration for [`create_provider`].
///
/// `Default` selects the filesystem provider at [`DEFAULT_STORAGE_PATH`],
/// so a host that configures nothing gets deterministic on-disk storage.
#[derive(Clone, Default)]
pub struct ProviderOptions {
    /// Provider variant to construct.
    pub kind: ProviderKind,
    /// Directory for the filesystem variant; defaults to
    /// [`DEFAULT_STORAGE_PATH`].
    pub storage_path: Option<PathBuf>,
    /// Key prefix for the key-value variant; defaults to
    /// [`DEFAULT_PREFIX`](crate::providers::DEFAULT_PREFIX).
    pub storage_prefix: Option<String>,
    /// Storage medium for the key-value variant. Leaving this unset mirrors
    /// an environment without the browser global: the provider constructs,
    /// but every operation fails with
    /// [`StoreError::EnvironmentMismatch`](crate::error::StoreError::EnvironmentMismatch).
    pub backend: Option<Arc<dyn KeyValueBackend>>,
}

impl fmt::Debug for ProviderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderOptions")
            .field("kind", &self.kind)
            .field("storage_path", &self.storage_path)
            .field("storage_prefix", &self.storage_prefix)
            .field("backend", &self.backend.as_ref().map(|_| "<backend>"))
            .finish()
    }
}

/// Constructs a provider from options. Deterministic: the same options
/// always select the same variant with the same configuration.
#[must_use]
pub fn create_provider(options: &ProviderOptions) -> Arc<dyn StorageProvider> {
    match options.kind {
        ProviderKind::Local => {
            let prefix = options
                .storage_prefix
                .clone()
                .unwrap_or_else(|| DEFAULT_PREFIX.to_string());
            Arc::new(LocalStorageProvider::new(options.backend.clone(), prefix))
        }
        ProviderKind::File => {
            let path = options
                .storage_path
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE_PATH));
            Arc::new(FileStorageProvider::new(path))
        }
    }
}
