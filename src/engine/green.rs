use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackagingType {
    Plastic,
    Recyclable,
    Compostable,
    Biodegradable,
    Minimal,
}

impl PackagingType {
    fn adjustment(self) -> f64 {
        match self {
            PackagingType::Minimal => 25.0,
            PackagingType::Compostable => 20.0,
            PackagingType::Biodegradable => 15.0,
            PackagingType::Recyclable => 10.0,
            PackagingType::Plastic => -10.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GreenScoreInput {
    pub packaging_type: Option<PackagingType>,
    pub carbon_footprint: f64,
    pub water_footprint: f64,
    pub certification_count: usize,
    pub base_spoilage_rate: f64,
}

impl Default for GreenScoreInput {
    fn default() -> Self {
        Self {
            packaging_type: None,
            carbon_footprint: 0.0,
            water_footprint: 0.0,
            certification_count: 0,
            base_spoilage_rate: 5.0,
        }
    }
}

const BASE_SCORE: f64 = 50.0;

fn carbon_adjustment(carbon: f64) -> f64 {
    if carbon < 1.0 {
        20.0
    } else if carbon < 5.0 {
        15.0
    } else if carbon < 10.0 {
        10.0
    } else if carbon > 20.0 {
        -15.0
    } else {
        0.0
    }
}

fn water_adjustment(water: f64) -> f64 {
    if water < 10.0 {
        15.0
    } else if water < 50.0 {
        10.0
    } else if water > 100.0 {
        -10.0
    } else {
        0.0
    }
}

fn spoilage_adjustment(rate: f64) -> f64 {
    if rate < 2.0 {
        10.0
    } else if rate < 5.0 {
        5.0
    } else if rate > 15.0 {
        -10.0
    } else {
        0.0
    }
}

/// Product sustainability score in `0..=100`.
///
/// Each metric contributes the first band it falls in; contributions across
/// metrics are summed on top of a base of 50.
pub fn green_score(input: &GreenScoreInput) -> u8 {
    let mut score = BASE_SCORE;

    if let Some(packaging) = input.packaging_type {
        score += packaging.adjustment();
    }
    score += carbon_adjustment(input.carbon_footprint);
    score += water_adjustment(input.water_footprint);
    score += input.certification_count as f64 * 5.0;
    score += spoilage_adjustment(input.base_spoilage_rate);

    score.clamp(0.0, 100.0).round() as u8
}
