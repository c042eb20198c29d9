//! The view service façade.
//!
//! [`ViewService`] is the single boundary host applications and the designer
//! UI talk to. It owns one active [`StorageProvider`] and delegates the four
//! operations to it, adding no business logic — it exists to decouple call
//! sites from the concrete provider choice.
//!
//! The JS original kept the provider in a module-level singleton; here the
//! service is an explicit handle that call sites construct once and thread
//! through (typically inside an `Arc`).

use std::sync::Arc;

use parking_lot::RwLock;
use zopio_view_core::ViewSchema;

use crate::error::StoreError;
use crate::factory::{ProviderOptions, create_provider};
use crate::provider::StorageProvider;

/// How to (re)initialize a [`ViewService`].
pub enum ProviderInit {
    /// Use a caller-supplied provider instance.
    Provider(Arc<dyn StorageProvider>),
    /// Construct a provider from options via the
    /// [factory](crate::factory::create_provider).
    Options(ProviderOptions),
}

/// Façade over one active [`StorageProvider`].
///
/// Starts uninitialized; the first operation (or an explicit [`init`](Self::init))
/// lazily constructs the default provider ([`ProviderOptions::default()`],
/// i.e. filesystem storage at `.zopio/views`). Re-initialization swaps the
/// provider for subsequent calls only: each operation clones the active
/// provider reference before suspending, so in-flight operations finish
/// against the provider they started with.
#[derive(Default)]
pub struct ViewService {
    provider: RwLock<Option<Arc<dyn StorageProvider>>>,
}

impl ViewService {
    /// Creates an uninitialized service.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a provider has been installed (explicitly or lazily).
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.provider.read().is_some()
    }

    /// Installs the active provider, replacing any previous one.
    pub fn init(&self, init: ProviderInit) {
        let provider = match init {
            ProviderInit::Provider(provider) => provider,
            ProviderInit::Options(options) => create_provider(&options),
        };
        *self.provider.write() = Some(provider);
        tracing::debug!("view service provider installed");
    }

    /// Returns the active provider, lazily constructing the default.
    fn active(&self) -> Arc<dyn StorageProvider> {
        if let Some(provider) = self.provider.read().as_ref() {
            return provider.clone();
        }
        let mut slot = self.provider.write();
        // Re-check: another caller may have initialized between the locks.
        slot.get_or_insert_with(|| create_provider(&ProviderOptions::default()))
            .clone()
    }

    /// Persists `schema` under `id`. See
    /// [`StorageProvider::save_view`].
    pub async fn save_view(&self, id: &str, schema: &ViewSchema) -> Result<(), StoreError> {
        self.active().save_view(id, schema).await
    }

    /// Loads the schema under `id`, or `None` if absent. See
    /// [`StorageProvider::get_view`].
    pub async fn get_view(&self, id: &str) -> Result<Option<ViewSchema>, StoreError> {
        self.active().get_view(id).await
    }

    /// Lists every persisted view ID. See
    /// [`StorageProvider::list_views`].
    pub async fn list_views(&self) -> Result<Vec<String>, StoreError> {
        self.active().list_views().await
    }

    /// Deletes the schema under `id`; missing IDs are a no-op. See
    /// [`StorageProvider::delete_view`].
    pub async fn delete_view(&self, id: &str) -> Result<(), StoreError> {
        self.active().delete_view(id).await
    }
}

#[cfg(test)]
mod tests {
    use zopio_view_core::{FieldDefinition, FieldKind};

    use super::*;
    use crate::factory::ProviderKind;
    use crate::providers::{DEFAULT_PREFIX, LocalStorageProvider, MemoryBackend};

    fn memory_options() -> ProviderOptions {
        ProviderOptions {
            kind: ProviderKind::Local,
            backend: Some(Arc::new(MemoryBackend::new())),
            ..ProviderOptions::default()
        }
    }

    fn sample_schema(id: &str) -> ViewSchema {
        ViewSchema::new(id)
            .with_field("email", FieldDefinition::new(FieldKind::Text, "Email").required())
    }

    #[test]
    fn starts_uninitialized() {
        let service = ViewService::new();
        assert!(!service.is_initialized());
        service.init(ProviderInit::Options(memory_options()));
        assert!(service.is_initialized());
    }

    #[tokio::test]
    async fn delegates_all_four_operations() {
        let service = ViewService::new();
        service.init(ProviderInit::Options(memory_options()));
        let schema = sample_schema("contact-form");

        service.save_view("contact-form", &schema).await.unwrap();
        assert_eq!(service.get_view("contact-form").await.unwrap(), Some(schema));
        assert_eq!(service.list_views().await.unwrap(), vec!["contact-form"]);

        service.delete_view("contact-form").await.unwrap();
        assert_eq!(service.get_view("contact-form").await.unwrap(), None);
        assert!(service.list_views().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn accepts_a_caller_supplied_provider_instance() {
        let service = ViewService::new();
        let provider = Arc::new(LocalStorageProvider::new(
            Some(Arc::new(MemoryBackend::new())),
            DEFAULT_PREFIX,
        ));
        service.init(ProviderInit::Provider(provider));

        service.save_view("v", &sample_schema("v")).await.unwrap();
        assert_eq!(service.list_views().await.unwrap(), vec!["v"]);
    }

    #[tokio::test]
    async fn reinit_swaps_the_provider_for_subsequent_calls() {
        let service = ViewService::new();
        service.init(ProviderInit::Options(memory_options()));
        service.save_view("kept", &sample_schema("kept")).await.unwrap();

        // Fresh backend: previously saved views are no longer visible.
        service.init(ProviderInit::Options(memory_options()));
        assert!(service.list_views().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn first_operation_lazily_installs_the_default_provider() {
        let service = ViewService::new();
        assert!(!service.is_initialized());

        // Default provider is filesystem-backed; reading a never-saved ID
        // performs no writes and returns absence.
        assert_eq!(service.get_view("never-saved").await.unwrap(), None);
        assert!(service.is_initialized());
    }
}
