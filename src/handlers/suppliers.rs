use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use super::AppError;
use crate::middleware::auth::{AuthUser, Role};
use crate::models::{Supplier, SupplierInput};
use crate::services::AppState;

async fn load(state: &AppState, id: Uuid) -> Result<Supplier, AppError> {
    state
        .suppliers
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("supplier"))
}

pub async fn list_suppliers(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Supplier>>, AppError> {
    Ok(Json(state.suppliers.list().await?))
}

pub async fn get_supplier(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Supplier>, AppError> {
    Ok(Json(load(&state, id).await?))
}

pub async fn create_supplier(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SupplierInput>,
) -> Result<(StatusCode, Json<Supplier>), AppError> {
    let mut supplier = Supplier::create(payload)?;
    state.suppliers.save(&mut supplier).await?;

    tracing::info!(supplier_id = %supplier.id, esg_score = supplier.esg_score, "supplier created");
    Ok((StatusCode::CREATED, Json(supplier)))
}

pub async fn update_supplier(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SupplierInput>,
) -> Result<Json<Supplier>, AppError> {
    let mut supplier = load(&state, id).await?;
    supplier.apply(payload)?;
    state.suppliers.save(&mut supplier).await?;
    Ok(Json(supplier))
}

pub async fn delete_supplier(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    user.require_role(Role::Manager)?;
    if state.suppliers.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("supplier"))
    }
}

#[derive(Deserialize)]
pub struct AddDocumentRequest {
    pub name: String,
}

pub async fn add_document(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddDocumentRequest>,
) -> Result<(StatusCode, Json<Supplier>), AppError> {
    let mut supplier = load(&state, id).await?;
    let doc_id = supplier.add_document(&payload.name)?;
    state.suppliers.save(&mut supplier).await?;

    tracing::info!(supplier_id = %id, doc_id = %doc_id, "audit document added");
    Ok((StatusCode::CREATED, Json(supplier)))
}

#[derive(Deserialize)]
pub struct VerifyDocumentRequest {
    #[serde(default = "default_verified")]
    pub verified: bool,
}

fn default_verified() -> bool {
    true
}

/// Managers verify audit documents; suppliers cannot verify their own.
pub async fn verify_document(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path((id, doc_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<VerifyDocumentRequest>,
) -> Result<Json<Supplier>, AppError> {
    user.require_role(Role::Manager)?;

    let mut supplier = load(&state, id).await?;
    if !supplier.set_verified(doc_id, payload.verified) {
        return Err(AppError::not_found("audit document"));
    }
    state.suppliers.save(&mut supplier).await?;

    tracing::info!(
        supplier_id = %id,
        doc_id = %doc_id,
        verified = payload.verified,
        esg_score = supplier.esg_score,
        "audit document verification changed"
    );
    Ok(Json(supplier))
}
