use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn from_adjusted_risk(adjusted: f64) -> Self {
        if adjusted >= 30.0 {
            RiskLevel::Critical
        } else if adjusted >= 20.0 {
            RiskLevel::High
        } else if adjusted >= 10.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub action: String,
    pub impact: Impact,
    pub description: String,
    pub estimated_savings: f64,
}

impl Recommendation {
    fn new(action: &str, impact: Impact, description: &str, estimated_savings: f64) -> Self {
        Self {
            action: action.to_string(),
            impact,
            description: description.to_string(),
            estimated_savings,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct WasteRiskInput {
    pub predicted_waste_percentage: f64,
    pub confidence: f64,
    pub current_stock: f64,
    pub predicted_waste_qty: f64,
}

impl Default for WasteRiskInput {
    fn default() -> Self {
        Self {
            predicted_waste_percentage: 0.0,
            confidence: 75.0,
            current_stock: 0.0,
            predicted_waste_qty: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WasteAssessment {
    pub risk_level: RiskLevel,
    pub recommendations: Vec<Recommendation>,
}

pub fn adjusted_risk(input: &WasteRiskInput) -> f64 {
    input.predicted_waste_percentage * input.confidence / 100.0
}

/// Classify a waste prediction and list the actions worth taking.
///
/// The recommendation list is rebuilt from scratch on every call.
pub fn assess_waste_risk(input: &WasteRiskInput) -> WasteAssessment {
    let risk_level = RiskLevel::from_adjusted_risk(adjusted_risk(input));

    let pct = input.predicted_waste_percentage;
    let qty = input.predicted_waste_qty;
    let mut recommendations = Vec::with_capacity(3);

    if pct > 20.0 {
        recommendations.push(Recommendation::new(
            "Discount Pricing",
            Impact::High,
            "Apply a markdown to move stock before it expires",
            qty * 5.0,
        ));
    }
    if input.current_stock > qty * 2.0 {
        recommendations.push(Recommendation::new(
            "Transfer to Other Stores",
            Impact::Medium,
            "Redistribute surplus stock to locations with higher demand",
            qty * 3.0,
        ));
    }
    if pct > 15.0 {
        recommendations.push(Recommendation::new(
            "Promotional Campaign",
            Impact::Medium,
            "Feature the product in promotions to lift sell-through",
            qty * 4.0,
        ));
    }

    WasteAssessment { risk_level, recommendations }
}
