//! InMemoryStorage - a shared byte buffer for testing and embedding.

use std::future::{ready, Future};
use std::sync::{Arc, RwLock};

use super::Storage;
use crate::error::StoreError;

/// In-memory storage. Clone-friendly via Arc: clones share one buffer.
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    content: Arc<RwLock<Option<Vec<u8>>>>,
}

impl InMemoryStorage {
    /// Create storage whose resource does not exist yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage pre-filled with `bytes`.
    pub fn with_content(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            content: Arc::new(RwLock::new(Some(bytes.into()))),
        }
    }

    /// Current raw content, or `None` if nothing has been written.
    pub fn snapshot(&self) -> Result<Option<Vec<u8>>, StoreError> {
        let content = self
            .content
            .read()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))?;
        Ok(content.clone())
    }
}

impl Storage for InMemoryStorage {
    fn read(&self) -> impl Future<Output = Result<Option<Vec<u8>>, StoreError>> + Send {
        ready(self.snapshot())
    }

    fn write(&self, bytes: Vec<u8>) -> impl Future<Output = Result<(), StoreError>> + Send {
        let result = self
            .content
            .write()
            .map(|mut content| *content = Some(bytes))
            .map_err(|_| StoreError::Storage("lock poisoned".into()));
        ready(result)
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
