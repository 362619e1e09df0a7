use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::core::store::{DocumentStore, StoreError, UpdateFn};

// In-memory store for tests and demos. `update` holds the write lock across
// the closure, so the read-modify-write contract holds under contention.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.read().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.entries.write().insert(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.entries.write().remove(key);
        Ok(())
    }

    async fn update(&self, key: &str, apply: UpdateFn<'_>) -> Result<Vec<u8>, StoreError> {
        let mut entries = self.entries.write();
        let next = apply(entries.get(key).map(Vec::as_slice))?;
        entries.insert(key.to_string(), next.clone());
        Ok(next)
    }
}
