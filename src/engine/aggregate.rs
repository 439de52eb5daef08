use serde::{Deserialize, Serialize};

use super::round2;
use super::waste_risk::{Impact, RiskLevel};

const CARBON_WEIGHT: f64 = 0.30;
const SUPPLIER_WEIGHT: f64 = 0.25;
const PRODUCT_WEIGHT: f64 = 0.25;
const WASTE_WEIGHT: f64 = 0.20;

const RECOMMENDATION_THRESHOLD: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreCategory {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreCategory {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            ScoreCategory::Excellent
        } else if score >= 60.0 {
            ScoreCategory::Good
        } else if score >= 40.0 {
            ScoreCategory::Fair
        } else {
            ScoreCategory::Poor
        }
    }
}

/// What the scorer needs to know about one waste alert.
#[derive(Debug, Clone, Copy)]
pub struct AlertSample {
    pub risk_level: RiskLevel,
    pub active: bool,
    pub resolved: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub carbon_score: f64,
    pub supplier_score: f64,
    pub product_score: f64,
    pub waste_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecommendation {
    pub category: String,
    pub impact: Impact,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SustainabilityScore {
    pub overall: f64,
    pub category: ScoreCategory,
    pub breakdown: ScoreBreakdown,
    pub recommendations: Vec<ScoreRecommendation>,
}

fn mean(values: impl ExactSizeIterator<Item = f64>) -> Option<f64> {
    let count = values.len();
    if count == 0 {
        return None;
    }
    Some(values.sum::<f64>() / count as f64)
}

pub fn carbon_score(carbon_per_shipment: &[f64]) -> f64 {
    match mean(carbon_per_shipment.iter().copied()) {
        None => 0.0,
        Some(avg) if avg < 5.0 => 100.0,
        Some(avg) if avg < 10.0 => 80.0,
        Some(avg) if avg < 20.0 => 60.0,
        Some(avg) if avg < 50.0 => 40.0,
        Some(_) => 20.0,
    }
}

fn mean_score(scores: &[u8]) -> f64 {
    mean(scores.iter().map(|s| f64::from(*s)))
        .map(|avg| avg.min(100.0))
        .unwrap_or(0.0)
}

/// An empty alert population scores 100, unlike the other sub-scores.
pub fn waste_score(alerts: &[AlertSample]) -> f64 {
    if alerts.is_empty() {
        return 100.0;
    }

    let total = alerts.len() as f64;
    let resolved = alerts.iter().filter(|a| a.resolved).count() as f64;
    let active = alerts.iter().filter(|a| a.active).count();
    let critical_active = alerts
        .iter()
        .filter(|a| a.active && a.risk_level == RiskLevel::Critical)
        .count();

    let resolution_rate = resolved / total;
    let critical_rate = if active == 0 {
        0.0
    } else {
        critical_active as f64 / active as f64
    };

    (resolution_rate * 100.0 - critical_rate * 30.0).clamp(0.0, 100.0)
}

fn recommendations(breakdown: &ScoreBreakdown) -> Vec<ScoreRecommendation> {
    let candidates = [
        (
            breakdown.carbon_score,
            "carbon",
            Impact::High,
            "Shift volume to electric, rail or sea transport and consolidate loads",
        ),
        (
            breakdown.supplier_score,
            "supplier",
            Impact::Medium,
            "Work with suppliers on certifications and verified audit documentation",
        ),
        (
            breakdown.product_score,
            "product",
            Impact::Medium,
            "Move product lines to minimal or compostable packaging",
        ),
        (
            breakdown.waste_score,
            "waste",
            Impact::High,
            "Act on open waste alerts and resolve critical ones first",
        ),
    ];

    let mut out: Vec<ScoreRecommendation> = candidates
        .into_iter()
        .filter(|(score, ..)| *score < RECOMMENDATION_THRESHOLD)
        .map(|(_, category, impact, description)| ScoreRecommendation {
            category: category.to_string(),
            impact,
            description: description.to_string(),
        })
        .collect();

    out.sort_by(|a, b| b.impact.cmp(&a.impact));
    out
}

/// Combine a windowed population into one organisational score.
pub fn score_population(
    carbon_per_shipment: &[f64],
    esg_scores: &[u8],
    green_scores: &[u8],
    alerts: &[AlertSample],
) -> SustainabilityScore {
    let carbon = carbon_score(carbon_per_shipment);
    let supplier = mean_score(esg_scores);
    let product = mean_score(green_scores);
    let waste = waste_score(alerts);

    // Weighted from the unrounded sub-scores; only reported values are rounded.
    let overall = round2(
        CARBON_WEIGHT * carbon + SUPPLIER_WEIGHT * supplier + PRODUCT_WEIGHT * product + WASTE_WEIGHT * waste,
    );

    let breakdown = ScoreBreakdown {
        carbon_score: carbon,
        supplier_score: round2(supplier),
        product_score: round2(product),
        waste_score: round2(waste),
    };

    SustainabilityScore {
        overall,
        category: ScoreCategory::from_score(overall),
        recommendations: recommendations(&breakdown),
        breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert(risk_level: RiskLevel, active: bool, resolved: bool) -> AlertSample {
        AlertSample { risk_level, active, resolved }
    }

    #[test]
    fn test_empty_population_asymmetry() {
        let score = score_population(&[], &[], &[], &[]);
        assert_eq!(score.breakdown.carbon_score, 0.0);
        assert_eq!(score.breakdown.supplier_score, 0.0);
        assert_eq!(score.breakdown.product_score, 0.0);
        assert_eq!(score.breakdown.waste_score, 100.0);
        assert_eq!(score.overall, 20.0);
        assert_eq!(score.category, ScoreCategory::Poor);
    }

    #[test]
    fn test_carbon_bands() {
        assert_eq!(carbon_score(&[4.0, 5.9]), 100.0);
        assert_eq!(carbon_score(&[5.0]), 80.0);
        assert_eq!(carbon_score(&[10.0, 20.0]), 60.0);
        assert_eq!(carbon_score(&[49.99]), 40.0);
        assert_eq!(carbon_score(&[50.0, 500.0]), 20.0);
    }

    #[test]
    fn test_waste_score_rates() {
        let alerts = [
            alert(RiskLevel::Low, false, true),
            alert(RiskLevel::High, false, true),
            alert(RiskLevel::Critical, true, false),
            alert(RiskLevel::Medium, true, false),
        ];
        // 0.5 * 100 - 0.5 * 30
        assert_eq!(waste_score(&alerts), 35.0);
    }

    #[test]
    fn test_waste_score_clamps_at_zero() {
        let alerts = [alert(RiskLevel::Critical, true, false)];
        assert_eq!(waste_score(&alerts), 0.0);
    }

    #[test]
    fn test_waste_score_without_active_alerts() {
        let alerts = [alert(RiskLevel::Critical, false, true), alert(RiskLevel::Low, false, false)];
        assert_eq!(waste_score(&alerts), 50.0);
    }

    #[test]
    fn test_weighted_overall_and_category() {
        let score = score_population(&[2.0], &[90, 70], &[60], &[alert(RiskLevel::Low, false, true)]);
        // 0.3*100 + 0.25*80 + 0.25*60 + 0.2*100
        assert_eq!(score.overall, 85.0);
        assert_eq!(score.category, ScoreCategory::Excellent);
        assert!(score.recommendations.is_empty());
    }

    #[test]
    fn test_overall_uses_unrounded_sub_scores() {
        let scores = [82, 82, 82, 0, 0, 0, 0];
        let mut alerts = vec![alert(RiskLevel::Low, false, true); 2];
        alerts.extend(vec![alert(RiskLevel::Low, true, false); 5]);

        let score = score_population(&[], &scores, &scores, &alerts);
        assert_eq!(score.breakdown.supplier_score, 35.14);
        assert_eq!(score.breakdown.waste_score, 28.57);
        // 0.5 * 246/7 + 0.2 * 200/7 = 23.2857..., not 23.284 from the rounded parts
        assert_eq!(score.overall, 23.29);
    }

    #[test]
    fn test_recommendations_sorted_by_impact() {
        let score = score_population(&[100.0], &[10], &[20], &[alert(RiskLevel::Critical, true, false)]);
        let categories: Vec<&str> = score.recommendations.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(categories, vec!["carbon", "waste", "supplier", "product"]);
        assert_eq!(score.recommendations[0].impact, Impact::High);
        assert_eq!(score.recommendations[3].impact, Impact::Medium);
    }

    #[test]
    fn test_category_thresholds() {
        assert_eq!(ScoreCategory::from_score(80.0), ScoreCategory::Excellent);
        assert_eq!(ScoreCategory::from_score(79.99), ScoreCategory::Good);
        assert_eq!(ScoreCategory::from_score(40.0), ScoreCategory::Fair);
        assert_eq!(ScoreCategory::from_score(39.99), ScoreCategory::Poor);
    }
}
