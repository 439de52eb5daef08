use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use super::AppError;
use crate::services::AppState;

/// Liveness plus a round trip to the document store.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    state.store.ping().await?;
    Ok(Json(json!({ "status": "ok" })))
}
