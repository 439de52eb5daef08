pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::Document;

pub use memory::MemoryStore;
pub use postgres::PgDocumentStore;

/// Schemaless storage for JSON documents, grouped by collection.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert or replace the document stored under `id`.
    async fn put(&self, collection: &str, id: Uuid, body: Value) -> Result<(), StoreError>;

    async fn get(&self, collection: &str, id: Uuid) -> Result<Option<Value>, StoreError>;

    /// Returns `false` when nothing was stored under `id`.
    async fn delete(&self, collection: &str, id: Uuid) -> Result<bool, StoreError>;

    async fn list(&self, collection: &str) -> Result<Vec<Value>, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

/// Typed access to one collection.
///
/// Every write goes through [`Repository::save`], which recomputes the
/// document's derived fields first.
pub struct Repository<T> {
    store: Arc<dyn DocumentStore>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _marker: PhantomData,
        }
    }
}

impl<T: Document> Repository<T> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, StoreError> {
        match self.store.get(T::COLLECTION, id).await? {
            Some(body) => Ok(Some(serde_json::from_value(body)?)),
            None => Ok(None),
        }
    }

    /// All documents, newest first.
    pub async fn list(&self) -> Result<Vec<T>, StoreError> {
        let mut docs = self
            .store
            .list(T::COLLECTION)
            .await?
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<T>, _>>()?;
        docs.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(docs)
    }

    pub async fn list_since(&self, since: DateTime<Utc>) -> Result<Vec<T>, StoreError> {
        let mut docs = self.list().await?;
        docs.retain(|d| d.created_at() >= since);
        Ok(docs)
    }

    pub async fn save(&self, doc: &mut T) -> Result<(), StoreError> {
        doc.refresh_derived();
        doc.touch();
        let body = serde_json::to_value(&*doc)?;
        self.store.put(T::COLLECTION, doc.id(), body).await?;
        tracing::debug!(collection = T::COLLECTION, id = %doc.id(), "document saved");
        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let deleted = self.store.delete(T::COLLECTION, id).await?;
        if deleted {
            tracing::info!(collection = T::COLLECTION, id = %id, "document deleted");
        }
        Ok(deleted)
    }
}
