use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

use super::DocumentStore;
use crate::error::StoreError;

/// Process-local store used when no database is configured, and in tests.
#[derive(Default)]
pub struct MemoryStore {
    collections: DashMap<String, HashMap<Uuid, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn put(&self, collection: &str, id: Uuid, body: Value) -> Result<(), StoreError> {
        self.collections
            .entry(collection.to_string())
            .or_default()
            .insert(id, body);
        Ok(())
    }

    async fn get(&self, collection: &str, id: Uuid) -> Result<Option<Value>, StoreError> {
        Ok(self
            .collections
            .get(collection)
            .and_then(|docs| docs.get(&id).cloned()))
    }

    async fn delete(&self, collection: &str, id: Uuid) -> Result<bool, StoreError> {
        Ok(self
            .collections
            .get_mut(collection)
            .map(|mut docs| docs.remove(&id).is_some())
            .unwrap_or(false))
    }

    async fn list(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        Ok(self
            .collections
            .get(collection)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
