//! zopio view store — pluggable schema persistence and the view service.

pub mod error;
pub mod factory;
pub mod provider;
pub mod providers;
pub mod service;

pub use error::StoreError;
pub use factory::{DEFAULT_STORAGE_PATH, ProviderKind, ProviderOptions, create_provider};
pub use provider::StorageProvider;
pub use providers::{
    DEFAULT_PREFIX, FileStorageProvider, KeyValueBackend, LocalStorageProvider, MemoryBackend,
};
pub use service::{ProviderInit, ViewService};
