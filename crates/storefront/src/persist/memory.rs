use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use super::{PersistAdapter, PersistError};

/// In-process storage. Clones share the same blobs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    blobs: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistAdapter for MemoryStorage {
    async fn load(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.blobs.lock().await.get(key).cloned())
    }

    async fn save(&self, key: &str, blob: &str) -> Result<(), PersistError> {
        self.blobs
            .lock()
            .await
            .insert(key.to_string(), blob.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), PersistError> {
        self.blobs.lock().await.remove(key);
        Ok(())
    }
}
