use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use super::AppError;
use crate::engine::SustainabilityScore;
use crate::error::ValidationError;
use crate::services::analytics::{AnalyticsWindow, Dashboard};
use crate::services::AppState;

/// One hundred years.
pub const MAX_WINDOW_DAYS: i64 = 36_500;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowQuery {
    pub days: Option<i64>,
    pub supplier_id: Option<Uuid>,
}

impl WindowQuery {
    fn window(&self, default_days: i64) -> Result<AnalyticsWindow, ValidationError> {
        let days = self.days.unwrap_or(default_days);
        if !(1..=MAX_WINDOW_DAYS).contains(&days) {
            return Err(ValidationError::new(format!(
                "days must be between 1 and {}",
                MAX_WINDOW_DAYS
            )));
        }
        Ok(AnalyticsWindow {
            days,
            supplier_id: self.supplier_id,
        })
    }
}

pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<Dashboard>, AppError> {
    let window = query.window(state.config.default_window_days)?;
    Ok(Json(state.analytics.dashboard(window).await?))
}

pub async fn sustainability_score(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<SustainabilityScore>, AppError> {
    let window = query.window(state.config.default_window_days)?;
    Ok(Json(state.analytics.sustainability_score(window).await?))
}
