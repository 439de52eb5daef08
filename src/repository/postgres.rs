use async_trait::async_trait;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use super::DocumentStore;
use crate::error::StoreError;

/// Documents kept as JSONB rows in a single `documents` table.
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn put(&self, collection: &str, id: Uuid, body: Value) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO documents (collection, id, body, created_at, updated_at) \
             VALUES ($1, $2, $3, NOW(), NOW()) \
             ON CONFLICT (collection, id) DO UPDATE SET body = EXCLUDED.body, updated_at = NOW()",
        )
        .bind(collection)
        .bind(id)
        .bind(Json(body))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get(&self, collection: &str, id: Uuid) -> Result<Option<Value>, StoreError> {
        let row: Option<(Json<Value>,)> =
            sqlx::query_as("SELECT body FROM documents WHERE collection = $1 AND id = $2")
                .bind(collection)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|(body,)| body.0))
    }

    async fn delete(&self, collection: &str, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        let rows: Vec<(Json<Value>,)> =
            sqlx::query_as("SELECT body FROM documents WHERE collection = $1 ORDER BY created_at DESC")
                .bind(collection)
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(|(body,)| body.0).collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
