//! Per-user document storage.
//!
//! Each signed-in user owns a keyed namespace of documents. The owner can
//! read and write; nothing here offers compare-and-swap, so every write is a
//! blind overwrite.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{AppError, AppResult};

/// Document store trait.
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read a document. Returns `Ok(None)` when the key has never been written.
    async fn get_document(&self, key: &str) -> AppResult<Option<Vec<u8>>>;

    /// Write a document, replacing any previous content.
    async fn put_document(&self, key: &str, data: &[u8]) -> AppResult<()>;
}

/// Local filesystem document store.
///
/// Documents are stored as one file per key below `base_path`.
pub struct LocalDocumentStore {
    base_path: PathBuf,
}

impl LocalDocumentStore {
    /// Create a new local document store.
    #[must_use]
    pub const fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }
}

#[async_trait::async_trait]
impl DocumentStore for LocalDocumentStore {
    async fn get_document(&self, key: &str) -> AppResult<Option<Vec<u8>>> {
        let path = self.base_path.join(key);
        match tokio::fs::read(&path).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(key = %key, "Document not written yet");
                Ok(None)
            }
            Err(e) => Err(AppError::Storage(format!("Failed to read {key}: {e}"))),
        }
    }

    async fn put_document(&self, key: &str, data: &[u8]) -> AppResult<()> {
        let path = self.base_path.join(key);

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::Storage(format!("Failed to create directory: {e}")))?;
        }

        tokio::fs::write(&path, data)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to write {key}: {e}")))?;

        tracing::debug!(key = %key, size = data.len(), "Wrote document");
        Ok(())
    }
}

/// In-process document store.
#[derive(Clone, Default)]
pub struct MemoryDocumentStore {
    documents: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryDocumentStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get_document(&self, key: &str) -> AppResult<Option<Vec<u8>>> {
        Ok(self.documents.read().await.get(key).cloned())
    }

    async fn put_document(&self, key: &str, data: &[u8]) -> AppResult<()> {
        self.documents
            .write()
            .await
            .insert(key.to_string(), data.to_vec());
        Ok(())
    }
}
