use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Document;
use crate::engine::{esg_score, CertificationLevel, EsgInput};
use crate::error::ValidationError;
use crate::utils;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierMetrics {
    #[serde(default)]
    pub carbon_footprint: f64,
    #[serde(default)]
    pub waste_reduction: f64,
    #[serde(default)]
    pub renewable_energy: f64,
}

/// Metadata for an audit document. File contents are not stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditDoc {
    pub id: Uuid,
    pub name: String,
    pub uploaded_at: DateTime<Utc>,
    pub verified: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: Uuid,
    pub name: String,
    pub contact_email: Option<String>,
    pub certification_level: CertificationLevel,
    pub sustainability_metrics: SupplierMetrics,
    pub audit_docs: Vec<AuditDoc>,
    #[serde(rename = "ESGscore")]
    pub esg_score: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierInput {
    pub name: String,
    pub contact_email: Option<String>,
    #[serde(default)]
    pub certification_level: CertificationLevel,
    #[serde(default)]
    pub sustainability_metrics: SupplierMetrics,
}

impl SupplierInput {
    fn validate(&self) -> Result<(), ValidationError> {
        utils::require_non_empty("name", &self.name)?;
        let metrics = &self.sustainability_metrics;
        utils::require_non_negative("carbonFootprint", metrics.carbon_footprint)?;
        utils::require_percentage("wasteReduction", metrics.waste_reduction)?;
        utils::require_percentage("renewableEnergy", metrics.renewable_energy)?;
        if let Some(email) = &self.contact_email {
            if !email.contains('@') {
                return Err(ValidationError::new("contactEmail is not a valid address"));
            }
        }
        Ok(())
    }
}

impl Supplier {
    pub fn create(input: SupplierInput) -> Result<Self, ValidationError> {
        let now = Utc::now();
        let mut supplier = Self {
            id: Uuid::new_v4(),
            name: String::new(),
            contact_email: None,
            certification_level: CertificationLevel::None,
            sustainability_metrics: SupplierMetrics::default(),
            audit_docs: Vec::new(),
            esg_score: 0,
            created_at: now,
            updated_at: now,
        };
        supplier.apply(input)?;
        Ok(supplier)
    }

    /// Audit documents are left untouched; they change through
    /// [`Supplier::add_document`] and [`Supplier::set_verified`].
    pub fn apply(&mut self, input: SupplierInput) -> Result<(), ValidationError> {
        input.validate()?;

        self.name = input.name.trim().to_string();
        self.contact_email = input.contact_email;
        self.certification_level = input.certification_level;
        self.sustainability_metrics = input.sustainability_metrics;
        Ok(())
    }

    /// Append an unverified document and return its id.
    pub fn add_document(&mut self, name: &str) -> Result<Uuid, ValidationError> {
        utils::require_non_empty("name", name)?;
        let doc = AuditDoc {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            uploaded_at: Utc::now(),
            verified: false,
        };
        let id = doc.id;
        self.audit_docs.push(doc);
        Ok(id)
    }

    /// Returns `false` when no document has the given id.
    pub fn set_verified(&mut self, doc_id: Uuid, verified: bool) -> bool {
        match self.audit_docs.iter_mut().find(|d| d.id == doc_id) {
            Some(doc) => {
                doc.verified = verified;
                true
            }
            None => false,
        }
    }

    pub fn verified_documents(&self) -> usize {
        self.audit_docs.iter().filter(|d| d.verified).count()
    }

    pub fn esg_input(&self) -> EsgInput {
        EsgInput {
            certification_level: self.certification_level,
            carbon_footprint: self.sustainability_metrics.carbon_footprint,
            waste_reduction: self.sustainability_metrics.waste_reduction,
            renewable_energy: self.sustainability_metrics.renewable_energy,
            verified_documents: self.verified_documents(),
        }
    }
}

impl Document for Supplier {
    const COLLECTION: &'static str = "suppliers";

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
        self.esg_score = esg_score(&self.esg_input());
    }
}
