use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Document;
use crate::engine::{assess_waste_risk, prediction_accuracy, Recommendation, RiskLevel, WasteRiskInput};
use crate::error::ValidationError;
use crate::utils;

pub const DEFAULT_CONFIDENCE: f64 = 75.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Active,
    Acknowledged,
    Resolved,
    Dismissed,
}

impl AlertStatus {
    pub fn can_transition_to(self, next: AlertStatus) -> bool {
        matches!(
            (self, next),
            (AlertStatus::Active, AlertStatus::Acknowledged)
                | (AlertStatus::Active, AlertStatus::Resolved)
                | (AlertStatus::Active, AlertStatus::Dismissed)
                | (AlertStatus::Acknowledged, AlertStatus::Resolved)
        )
    }

    pub fn is_open(self) -> bool {
        matches!(self, AlertStatus::Active | AlertStatus::Acknowledged)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WasteAlert {
    pub id: Uuid,
    pub product_id: Option<Uuid>,
    pub product_name: String,
    pub supplier_id: Option<Uuid>,
    pub predicted_waste_qty: f64,
    pub current_stock: f64,
    pub predicted_waste_percentage: f64,
    pub confidence: f64,
    pub status: AlertStatus,
    pub risk_level: RiskLevel,
    pub recommendations: Vec<Recommendation>,
    pub actual_waste_qty: Option<f64>,
    pub accuracy: Option<f64>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WasteAlertInput {
    pub product_id: Option<Uuid>,
    pub product_name: String,
    pub supplier_id: Option<Uuid>,
    pub predicted_waste_qty: f64,
    pub current_stock: f64,
    pub predicted_waste_percentage: f64,
    pub confidence: Option<f64>,
}

impl WasteAlertInput {
    fn validate(&self) -> Result<(), ValidationError> {
        utils::require_non_empty("productName", &self.product_name)?;
        utils::require_non_negative("predictedWasteQty", self.predicted_waste_qty)?;
        utils::require_non_negative("currentStock", self.current_stock)?;
        utils::require_percentage("predictedWastePercentage", self.predicted_waste_percentage)?;
        if let Some(confidence) = self.confidence {
            utils::require_percentage("confidence", confidence)?;
        }
        Ok(())
    }
}

impl WasteAlert {
    pub fn create(input: WasteAlertInput) -> Result<Self, ValidationError> {
        let now = Utc::now();
        let mut alert = Self {
            id: Uuid::new_v4(),
            product_id: None,
            product_name: String::new(),
            supplier_id: None,
            predicted_waste_qty: 0.0,
            current_stock: 0.0,
            predicted_waste_percentage: 0.0,
            confidence: DEFAULT_CONFIDENCE,
            status: AlertStatus::Active,
            risk_level: RiskLevel::Low,
            recommendations: Vec::new(),
            actual_waste_qty: None,
            accuracy: None,
            resolved_at: None,
            created_at: now,
            updated_at: now,
        };
        alert.apply(input)?;
        Ok(alert)
    }

    /// Status and resolution fields are not part of the input; they move
    /// only through [`WasteAlert::transition`] and [`WasteAlert::resolve`].
    pub fn apply(&mut self, input: WasteAlertInput) -> Result<(), ValidationError> {
        input.validate()?;

        self.product_id = input.product_id;
        self.product_name = input.product_name.trim().to_string();
        self.supplier_id = input.supplier_id;
        self.predicted_waste_qty = input.predicted_waste_qty;
        self.current_stock = input.current_stock;
        self.predicted_waste_percentage = input.predicted_waste_percentage;
        self.confidence = input.confidence.unwrap_or(DEFAULT_CONFIDENCE);
        Ok(())
    }

    /// Move to `next`, or hand back the current status if that move is not allowed.
    pub fn transition(&mut self, next: AlertStatus) -> Result<(), AlertStatus> {
        if !self.status.can_transition_to(next) {
            return Err(self.status);
        }
        self.status = next;
        Ok(())
    }

    pub fn resolve(&mut self, actual_waste_qty: f64) -> Result<(), AlertStatus> {
        self.transition(AlertStatus::Resolved)?;
        self.actual_waste_qty = Some(actual_waste_qty);
        self.accuracy = Some(prediction_accuracy(self.predicted_waste_qty, actual_waste_qty));
        self.resolved_at = Some(Utc::now());
        Ok(())
    }

    pub fn risk_input(&self) -> WasteRiskInput {
        WasteRiskInput {
            predicted_waste_percentage: self.predicted_waste_percentage,
            confidence: self.confidence,
            current_stock: self.current_stock,
            predicted_waste_qty: self.predicted_waste_qty,
        }
    }
}

impl Document for WasteAlert {
    const COLLECTION: &'static str = "waste_alerts";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    fn refresh_derived(&mut self) {
        let assessment = assess_waste_risk(&self.risk_input());
        self.risk_level = assessment.risk_level;
        self.recommendations = assessment.recommendations;
    }
}
