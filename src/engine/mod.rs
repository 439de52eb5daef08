//! Derived metrics engine
//!
//! Pure functions that turn stored entity attributes into scores and risk
//! classifications. Nothing in here performs I/O or holds state; the
//! repositories call these right before a document is written.

pub mod aggregate;
pub mod carbon;
pub mod esg;
pub mod forecast;
pub mod green;
pub mod route;
pub mod waste_risk;

pub use aggregate::{score_population, AlertSample, ScoreCategory, SustainabilityScore};
pub use carbon::{carbon_footprint, emission_factor, CarbonInput, TransportMode, VehicleType};
pub use esg::{esg_score, CertificationLevel, EsgInput};
pub use forecast::{forecast_waste, prediction_accuracy, SaleRecord, WasteForecast};
pub use green::{green_score, GreenScoreInput, PackagingType};
pub use route::{compare_routes, haversine_km, GeoPoint, RouteOption};
pub use waste_risk::{assess_waste_risk, Impact, Recommendation, RiskLevel, WasteAssessment, WasteRiskInput};

/// Round to two decimal places, half away from zero.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
