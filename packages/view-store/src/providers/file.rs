//! Filesystem [`StorageProvider`]: one JSON document per view ID.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use zopio_view_core::ViewSchema;

use crate::error::StoreError;
use crate::provider::StorageProvider;

const DOCUMENT_EXTENSION: &str = "json";

/// [`StorageProvider`] that stores each schema at
/// `<storage_path>/<id>.json`, pretty-printed with 2-space indentation.
///
/// The directory is created on demand by `save_view`; a directory that does
/// not exist yet lists as empty rather than failing.
pub struct FileStorageProvider {
    storage_path: PathBuf,
}

impl FileStorageProvider {
    /// Creates a provider rooted at `storage_path`. No I/O happens until the
    /// first operation.
    #[must_use]
    pub fn new(storage_path: impl Into<PathBuf>) -> Self {
        Self {
            storage_path: storage_path.into(),
        }
    }

    /// Directory this provider reads and writes.
    #[must_use]
    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }

    fn document_path(&self, id: &str) -> PathBuf {
        self.storage_path.join(format!("{id}.{DOCUMENT_EXTENSION}"))
    }
}

#[async_trait]
impl StorageProvider for FileStorageProvider {
    async fn save_view(&self, id: &str, schema: &ViewSchema) -> Result<(), StoreError> {
        fs::create_dir_all(&self.storage_path)
            .await
            .map_err(|source| StoreError::Io {
                operation: "save_view",
                target: id.to_string(),
                source,
            })?;

        let document = serde_json::to_vec_pretty(schema).map_err(|source| StoreError::Parse {
            id: id.to_string(),
            source,
        })?;

        fs::write(self.document_path(id), document)
            .await
            .map_err(|source| StoreError::Io {
                operation: "save_view",
                target: id.to_string(),
                source,
            })?;
        tracing::debug!(id, path = %self.storage_path.display(), "saved view document");
        Ok(())
    }

    async fn get_view(&self, id: &str) -> Result<Option<ViewSchema>, StoreError> {
        let bytes = match fs::read(self.document_path(id)).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Io {
                    operation: "get_view",
                    target: id.to_string(),
                    source,
                });
            }
        };

        let schema = serde_json::from_slice(&bytes).map_err(|source| StoreError::Parse {
            id: id.to_string(),
            source,
        })?;
        Ok(Some(schema))
    }

    async fn list_views(&self) -> Result<Vec<String>, StoreError> {
        let mut entries = match fs::read_dir(&self.storage_path).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    operation: "list_views",
                    target: self.storage_path.display().to_string(),
                    source,
                });
            }
        };

        let mut ids = Vec::new();
        loop {
            let entry = entries.next_entry().await.map_err(|source| StoreError::Io {
                operation: "list_views",
                target: self.storage_path.display().to_string(),
                source,
            })?;
            let Some(entry) = entry else { break };

            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                tracing::warn!(path = %entry.path().display(), "skipping non-UTF-8 entry");
                continue;
            };
            if let Some(id) = name.strip_suffix(&format!(".{DOCUMENT_EXTENSION}")) {
                ids.push(id.to_string());
            }
        }
        Ok(ids)
    }

    async fn delete_view(&self, id: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.document_path(id)).await {
            Ok(()) => {
                tracing::debug!(id, "deleted view document");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io {
                operation: "delete_view",
                target: id.to_string(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use zopio_view_core::{FieldDefinition, FieldKind};

    use super::*;

    fn sample_schema(id: &str) -> ViewSchema {
        ViewSchema::new(id)
            .with_field("email", FieldDefinition::new(FieldKind::Text, "Email").required())
    }

    #[tokio::test]
    async fn save_creates_directory_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let provider = FileStorageProvider::new(dir.path().join("nested").join("views"));
        let schema = sample_schema("contact-form");

        provider.save_view("contact-form", &schema).await.unwrap();

        let path = dir.path().join("nested/views/contact-form.json");
        assert!(path.exists());
        assert_eq!(provider.get_view("contact-form").await.unwrap(), Some(schema));
    }

    #[tokio::test]
    async fn documents_are_pretty_printed() {
        let dir = tempfile::tempdir().unwrap();
        let provider = FileStorageProvider::new(dir.path());
        provider.save_view("form", &sample_schema("form")).await.unwrap();

        let text = std::fs::read_to_string(dir.path().join("form.json")).unwrap();
        assert!(text.contains("\n  \"id\""), "expected 2-space indentation: {text}");
    }

    #[tokio::test]
    async fn get_of_never_saved_id_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let provider = FileStorageProvider::new(dir.path());
        assert_eq!(provider.get_view("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn corrupt_file_is_a_parse_error_not_absence() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.json"), "{not json").unwrap();
        let provider = FileStorageProvider::new(dir.path());

        let err = provider.get_view("broken").await.unwrap_err();
        assert!(matches!(err, StoreError::Parse { ref id, .. } if id == "broken"));
    }

    #[tokio::test]
    async fn list_views_returns_saved_ids_as_a_set() {
        let dir = tempfile::tempdir().unwrap();
        let provider = FileStorageProvider::new(dir.path());
        provider.save_view("id1", &sample_schema("id1")).await.unwrap();
        provider.save_view("id2", &sample_schema("id2")).await.unwrap();
        // Non-document files are not view IDs.
        std::fs::write(dir.path().join("README.txt"), "notes").unwrap();

        let mut ids = provider.list_views().await.unwrap();
        ids.sort();
        assert_eq!(ids, vec!["id1", "id2"]);
    }

    #[tokio::test]
    async fn list_views_on_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let provider = FileStorageProvider::new(dir.path().join("never-created"));
        assert!(provider.list_views().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn overwrite_keeps_the_last_write() {
        let dir = tempfile::tempdir().unwrap();
        let provider = FileStorageProvider::new(dir.path());
        let first = sample_schema("form");
        let second = ViewSchema::new("form")
            .with_field("name", FieldDefinition::new(FieldKind::Text, "Name"));

        provider.save_view("form", &first).await.unwrap();
        provider.save_view("form", &second).await.unwrap();

        assert_eq!(provider.get_view("form").await.unwrap(), Some(second));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let provider = FileStorageProvider::new(dir.path());
        provider.save_view("doomed", &sample_schema("doomed")).await.unwrap();

        provider.delete_view("doomed").await.unwrap();
        provider.delete_view("doomed").await.unwrap();
        assert!(!dir.path().join("doomed.json").exists());
    }
}
