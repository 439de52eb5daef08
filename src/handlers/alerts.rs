use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use super::AppError;
use crate::engine::RiskLevel;
use crate::middleware::auth::{AuthUser, Role};
use crate::models::{AlertStatus, WasteAlert, WasteAlertInput};
use crate::services::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAlertsQuery {
    pub status: Option<AlertStatus>,
    pub risk_level: Option<RiskLevel>,
    pub product_id: Option<Uuid>,
}

pub async fn list_alerts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListAlertsQuery>,
) -> Result<Json<Vec<WasteAlert>>, AppError> {
    let mut alerts = state.alerts.list().await?;
    if let Some(status) = query.status {
        alerts.retain(|a| a.status == status);
    }
    if let Some(risk_level) = query.risk_level {
        alerts.retain(|a| a.risk_level == risk_level);
    }
    if let Some(product_id) = query.product_id {
        alerts.retain(|a| a.product_id == Some(product_id));
    }
    Ok(Json(alerts))
}

pub async fn get_alert(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<WasteAlert>, AppError> {
    state
        .alerts
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("waste alert"))
}

pub async fn create_alert(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<WasteAlertInput>,
) -> Result<(StatusCode, Json<WasteAlert>), AppError> {
    let mut alert = WasteAlert::create(payload)?;
    state.alerts.save(&mut alert).await?;

    tracing::info!(alert_id = %alert.id, risk_level = ?alert.risk_level, "waste alert created");
    Ok((StatusCode::CREATED, Json(alert)))
}

pub async fn update_alert(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<WasteAlertInput>,
) -> Result<Json<WasteAlert>, AppError> {
    let mut alert = state
        .alerts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("waste alert"))?;

    alert.apply(payload)?;
    state.alerts.save(&mut alert).await?;
    Ok(Json(alert))
}

pub async fn delete_alert(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    user.require_role(Role::Manager)?;
    if state.alerts.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("waste alert"))
    }
}

pub async fn acknowledge_alert(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<WasteAlert>, AppError> {
    let alert = state
        .alert_service
        .transition(id, AlertStatus::Acknowledged)
        .await?;
    Ok(Json(alert))
}

pub async fn dismiss_alert(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<WasteAlert>, AppError> {
    let alert = state.alert_service.transition(id, AlertStatus::Dismissed).await?;
    Ok(Json(alert))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveRequest {
    pub actual_waste_qty: f64,
}

pub async fn resolve_alert(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ResolveRequest>,
) -> Result<Json<WasteAlert>, AppError> {
    let alert = state
        .alert_service
        .resolve(id, payload.actual_waste_qty)
        .await?;
    Ok(Json(alert))
}
