use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use super::AppError;
use crate::engine::{compare_routes, haversine_km, RouteOption, TransportMode};
use crate::error::ValidationError;
use crate::middleware::auth::{AuthUser, Role};
use crate::models::{Location, Shipment, ShipmentInput};
use crate::services::AppState;
use crate::utils;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListShipmentsQuery {
    pub supplier_id: Option<Uuid>,
    pub transport_mode: Option<TransportMode>,
}

pub async fn list_shipments(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListShipmentsQuery>,
) -> Result<Json<Vec<Shipment>>, AppError> {
    let mut shipments = state.shipments.list().await?;
    if let Some(supplier_id) = query.supplier_id {
        shipments.retain(|s| s.supplier_id == Some(supplier_id));
    }
    if let Some(mode) = query.transport_mode {
        shipments.retain(|s| s.transport_mode == mode);
    }
    Ok(Json(shipments))
}

pub async fn get_shipment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Shipment>, AppError> {
    state
        .shipments
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("shipment"))
}

pub async fn create_shipment(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ShipmentInput>,
) -> Result<(StatusCode, Json<Shipment>), AppError> {
    let mut shipment = Shipment::create(payload)?;
    state.shipments.save(&mut shipment).await?;

    tracing::info!(
        shipment_id = %shipment.id,
        mode = ?shipment.transport_mode,
        carbon_kg = shipment.carbon_kg,
        "shipment created"
    );
    Ok((StatusCode::CREATED, Json(shipment)))
}

pub async fn update_shipment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ShipmentInput>,
) -> Result<Json<Shipment>, AppError> {
    let mut shipment = state
        .shipments
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("shipment"))?;

    shipment.apply(payload)?;
    state.shipments.save(&mut shipment).await?;
    Ok(Json(shipment))
}

pub async fn delete_shipment(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    user.require_role(Role::Manager)?;
    if state.shipments.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("shipment"))
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteOptionsRequest {
    pub distance_km: Option<f64>,
    pub origin: Option<Location>,
    pub destination: Option<Location>,
    pub quantity: f64,
    pub packaging_weight: Option<f64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteOptionsResponse {
    pub distance_km: f64,
    pub recommended: Option<RouteOption>,
    pub options: Vec<RouteOption>,
}

pub async fn route_options(
    Json(payload): Json<RouteOptionsRequest>,
) -> Result<Json<RouteOptionsResponse>, AppError> {
    utils::require_positive("quantity", payload.quantity)?;
    let packaging_weight = payload.packaging_weight.unwrap_or(0.0);
    utils::require_non_negative("packagingWeight", packaging_weight)?;

    let distance_km = match (payload.distance_km, &payload.origin, &payload.destination) {
        (Some(distance), _, _) => {
            utils::require_non_negative("distanceKm", distance)?;
            distance
        }
        (None, Some(origin), Some(destination)) => {
            utils::require_coordinates(origin.lat, origin.lon)?;
            utils::require_coordinates(destination.lat, destination.lon)?;
            haversine_km(origin.point(), destination.point())
        }
        (None, _, _) => {
            return Err(ValidationError::new("distanceKm or origin and destination are required").into())
        }
    };

    let options = compare_routes(distance_km, payload.quantity, packaging_weight);
    Ok(Json(RouteOptionsResponse {
        distance_km,
        recommended: options.first().cloned(),
        options,
    }))
}
