use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CertificationLevel {
    #[default]
    None,
    Basic,
    FairTrade,
    Organic,
    #[serde(rename = "B Corp")]
    BCorp,
    #[serde(rename = "Carbon Neutral")]
    CarbonNeutral,
}

impl CertificationLevel {
    pub fn bonus(self) -> u32 {
        match self {
            CertificationLevel::None => 0,
            CertificationLevel::Basic => 10,
            CertificationLevel::FairTrade => 25,
            CertificationLevel::Organic => 30,
            CertificationLevel::BCorp => 40,
            CertificationLevel::CarbonNeutral => 35,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EsgInput {
    pub certification_level: CertificationLevel,
    pub carbon_footprint: f64,
    pub waste_reduction: f64,
    pub renewable_energy: f64,
    pub verified_documents: usize,
}

const MAX_DOCUMENT_BONUS: u32 = 20;

/// Supplier ESG score in `0..=100`.
pub fn esg_score(input: &EsgInput) -> u8 {
    let mut score = input.certification_level.bonus();

    score += if input.carbon_footprint < 10.0 {
        20
    } else if input.carbon_footprint < 25.0 {
        15
    } else if input.carbon_footprint < 50.0 {
        10
    } else {
        0
    };

    score += if input.waste_reduction > 50.0 {
        20
    } else if input.waste_reduction > 25.0 {
        15
    } else if input.waste_reduction > 10.0 {
        10
    } else {
        0
    };

    score += if input.renewable_energy > 80.0 {
        20
    } else if input.renewable_energy > 50.0 {
        15
    } else if input.renewable_energy > 20.0 {
        10
    } else {
        0
    };

    let documents = u32::try_from(input.verified_documents).unwrap_or(u32::MAX);
    score += documents.saturating_mul(5).min(MAX_DOCUMENT_BONUS);

    score.min(100) as u8
}
