use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use super::AppError;
use crate::engine::SaleRecord;
use crate::middleware::auth::{AuthUser, Role};
use crate::models::{Product, ProductInput, WasteAlert};
use crate::services::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProductsQuery {
    pub supplier_id: Option<Uuid>,
    pub category: Option<String>,
}

pub async fn list_products(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListProductsQuery>,
) -> Result<Json<Vec<Product>>, AppError> {
    let mut products = state.products.list().await?;
    if let Some(supplier_id) = query.supplier_id {
        products.retain(|p| p.supplier_id == Some(supplier_id));
    }
    if let Some(category) = query.category {
        products.retain(|p| p.category.as_deref() == Some(category.as_str()));
    }
    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Product>, AppError> {
    state
        .products
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("product"))
}

pub async fn create_product(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ProductInput>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let mut product = Product::create(payload)?;
    state.products.save(&mut product).await?;

    tracing::info!(
        product_id = %product.id,
        green_score = product.sustainability_metrics.green_score,
        "product created"
    );
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProductInput>,
) -> Result<Json<Product>, AppError> {
    let mut product = state
        .products
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("product"))?;

    product.apply(payload)?;
    state.products.save(&mut product).await?;
    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    user.require_role(Role::Manager)?;
    if state.products.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("product"))
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRequest {
    #[serde(default)]
    pub sales: Vec<SaleRecord>,
    pub days_until_expiry: Option<u32>,
    /// Defaults to the current UTC date.
    pub as_of: Option<NaiveDate>,
}

pub async fn forecast_waste(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ForecastRequest>,
) -> Result<(StatusCode, Json<WasteAlert>), AppError> {
    let today = payload.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let alert = state
        .alert_service
        .forecast_for_product(id, &payload.sales, today, payload.days_until_expiry)
        .await?;
    Ok((StatusCode::CREATED, Json(alert)))
}
