//! Shopping list persistence
//!
//! Saved lists are schemaless JSON objects posted by the front-end. Each
//! store assigns an id, records it under `_id`, and keeps the document as-is.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// List store error
#[derive(Debug, Error)]
pub enum StoreError {
    /// File system error
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Document could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Store is not accepting requests
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence for saved shopping lists
#[async_trait]
pub trait ListStore: Send + Sync {
    /// Persist a document and return its id
    async fn insert(&self, document: Map<String, Value>) -> Result<String, StoreError>;

    /// Check the store can accept writes
    async fn ping(&self) -> Result<(), StoreError>;
}

fn assign_id(document: &mut Map<String, Value>) -> String {
    let id = Uuid::now_v7().to_string();
    document.insert("_id".to_string(), Value::String(id.clone()));
    id
}

/// Appends one JSON document per line to a file
#[derive(Debug)]
pub struct JsonlListStore {
    path: PathBuf,
    write_lock: tokio::sync::Mutex<()>,
}

impl JsonlListStore {
    /// Create a store writing to `path`; nothing is touched until first use
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// File the store appends to
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn open(&self) -> Result<tokio::fs::File, StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        Ok(file)
    }
}

#[async_trait]
impl ListStore for JsonlListStore {
    async fn insert(&self, mut document: Map<String, Value>) -> Result<String, StoreError> {
        let id = assign_id(&mut document);
        let mut line = serde_json::to_vec(&document)?;
        line.push(b'\n');

        let _guard = self.write_lock.lock().await;
        let mut file = self.open().await?;
        file.write_all(&line).await?;
        file.flush().await?;

        Ok(id)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.open().await.map(|_| ())
    }
}

/// In-process store, mainly for tests
#[derive(Debug, Default)]
pub struct MemoryListStore {
    documents: Mutex<Vec<Map<String, Value>>>,
    unavailable: AtomicBool,
}

impl MemoryListStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that rejects every request
    pub fn unavailable() -> Self {
        let store = Self::default();
        store.unavailable.store(true, Ordering::SeqCst);
        store
    }

    /// Snapshot of the stored documents, in insertion order
    pub fn documents(&self) -> Vec<Map<String, Value>> {
        self.documents
            .lock()
            .map(|docs| docs.clone())
            .unwrap_or_default()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ListStore for MemoryListStore {
    async fn insert(&self, mut document: Map<String, Value>) -> Result<String, StoreError> {
        self.check()?;
        let id = assign_id(&mut document);
        self.documents
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store poisoned".to_string()))?
            .push(document);
        Ok(id)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check()
    }
}
