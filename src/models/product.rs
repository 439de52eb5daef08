use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Document;
use crate::engine::{green_score, GreenScoreInput, PackagingType};
use crate::error::ValidationError;
use crate::utils;

pub const DEFAULT_SPOILAGE_RATE: f64 = 5.0;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductMetrics {
    pub carbon_footprint: f64,
    pub water_footprint: f64,
    pub green_score: u8,
}

/// Footprint figures as sent by clients; `greenScore` is not accepted.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductMetricsInput {
    #[serde(default)]
    pub carbon_footprint: f64,
    #[serde(default)]
    pub water_footprint: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub category: Option<String>,
    pub supplier_id: Option<Uuid>,
    pub packaging_type: PackagingType,
    pub sustainability_metrics: ProductMetrics,
    pub certifications: Vec<String>,
    pub base_spoilage_rate: f64,
    pub stock: f64,
    pub shelf_life_days: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    pub category: Option<String>,
    pub supplier_id: Option<Uuid>,
    pub packaging_type: PackagingType,
    #[serde(default)]
    pub sustainability_metrics: ProductMetricsInput,
    #[serde(default)]
    pub certifications: Vec<String>,
    pub base_spoilage_rate: Option<f64>,
    pub stock: Option<f64>,
    pub shelf_life_days: Option<u32>,
}

impl ProductInput {
    fn validate(&self) -> Result<(), ValidationError> {
        utils::require_non_empty("name", &self.name)?;
        utils::require_non_negative("carbonFootprint", self.sustainability_metrics.carbon_footprint)?;
        utils::require_non_negative("waterFootprint", self.sustainability_metrics.water_footprint)?;
        if let Some(rate) = self.base_spoilage_rate {
            utils::require_percentage("baseSpoilageRate", rate)?;
        }
        if let Some(stock) = self.stock {
            utils::require_non_negative("stock", stock)?;
        }
        Ok(())
    }
}

impl Product {
    pub fn create(input: ProductInput) -> Result<Self, ValidationError> {
        let now = Utc::now();
        let mut product = Self {
            id: Uuid::new_v4(),
            name: String::new(),
            category: None,
            supplier_id: None,
            packaging_type: input.packaging_type,
            sustainability_metrics: ProductMetrics::default(),
            certifications: Vec::new(),
            base_spoilage_rate: DEFAULT_SPOILAGE_RATE,
            stock: 0.0,
            shelf_life_days: None,
            created_at: now,
            updated_at: now,
        };
        product.apply(input)?;
        Ok(product)
    }

    pub fn apply(&mut self, input: ProductInput) -> Result<(), ValidationError> {
        input.validate()?;

        self.name = input.name.trim().to_string();
        self.category = input.category;
        self.supplier_id = input.supplier_id;
        self.packaging_type = input.packaging_type;
        self.sustainability_metrics.carbon_footprint = input.sustainability_metrics.carbon_footprint;
        self.sustainability_metrics.water_footprint = input.sustainability_metrics.water_footprint;
        self.certifications = utils::normalize_certifications(input.certifications);
        self.base_spoilage_rate = input.base_spoilage_rate.unwrap_or(DEFAULT_SPOILAGE_RATE);
        self.stock = input.stock.unwrap_or(0.0);
        self.shelf_life_days = input.shelf_life_days;
        Ok(())
    }

    pub fn green_score_input(&self) -> GreenScoreInput {
        GreenScoreInput {
            packaging_type: Some(self.packaging_type),
            carbon_footprint: self.sustainability_metrics.carbon_footprint,
            water_footprint: self.sustainability_metrics.water_footprint,
            certification_count: self.certifications.len(),
            base_spoilage_rate: self.base_spoilage_rate,
        }
    }
}

impl Document for Product {
    const COLLECTION: &'static str = "products";

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
        self.sustainability_metrics.green_score = green_score(&self.green_score_input());
    }
}
