use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::round2;

pub const DEMAND_WINDOW_DAYS: i64 = 30;

const MIN_CONFIDENCE: f64 = 50.0;
const MAX_CONFIDENCE: f64 = 90.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub date: NaiveDate,
    pub quantity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WasteForecast {
    pub average_daily_demand: f64,
    pub predicted_waste_qty: f64,
    pub predicted_waste_percentage: f64,
    pub confidence: f64,
}

/// Project how much of the current stock will still be on the shelf at expiry.
///
/// Demand is the mean over the trailing 30 days, counting days without sales
/// as zero. Confidence grows with the number of distinct days that had sales.
pub fn forecast_waste(
    sales: &[SaleRecord],
    today: NaiveDate,
    current_stock: f64,
    days_until_expiry: u32,
) -> WasteForecast {
    let window_start = today
        .checked_sub_signed(Duration::days(DEMAND_WINDOW_DAYS))
        .unwrap_or(NaiveDate::MIN);
    let in_window: Vec<&SaleRecord> = sales
        .iter()
        .filter(|s| s.date >= window_start && s.date <= today)
        .collect();

    let total: f64 = in_window.iter().map(|s| s.quantity.max(0.0)).sum();
    let average_daily_demand = total / DEMAND_WINDOW_DAYS as f64;

    let stock = current_stock.max(0.0);
    let expected_sales = average_daily_demand * f64::from(days_until_expiry);
    let predicted_waste_qty = round2((stock - expected_sales).max(0.0));
    let predicted_waste_percentage = if stock > 0.0 {
        round2((predicted_waste_qty / stock * 100.0).clamp(0.0, 100.0))
    } else {
        0.0
    };

    let sale_days = in_window.iter().map(|s| s.date).collect::<HashSet<_>>().len();
    let confidence = (MIN_CONFIDENCE + sale_days as f64 * (40.0 / DEMAND_WINDOW_DAYS as f64))
        .min(MAX_CONFIDENCE)
        .round();

    WasteForecast {
        average_daily_demand: round2(average_daily_demand),
        predicted_waste_qty,
        predicted_waste_percentage,
        confidence,
    }
}

/// How close a prediction came to the waste actually recorded, in percent.
pub fn prediction_accuracy(predicted_qty: f64, actual_qty: f64) -> f64 {
    let error = (predicted_qty - actual_qty).abs() / predicted_qty.max(1.0) * 100.0;
    round2((100.0 - error).max(0.0))
}
