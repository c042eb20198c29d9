//! The two concrete [`StorageProvider`](crate::provider::StorageProvider)
//! variants.

pub mod file;
pub mod local;

pub use file::FileStorageProvider;
pub use local::{DEFAULT_PREFIX, KeyValueBackend, LocalStorageProvider, MemoryBackend};
