use chrono::NaiveDate;
use uuid::Uuid;

use crate::engine::{forecast_waste, SaleRecord};
use crate::error::{AppError, ValidationError};
use crate::models::{AlertStatus, Product, WasteAlert, WasteAlertInput};
use crate::repository::Repository;
use crate::utils;

/// Waste-alert lifecycle and forecast-driven alert creation.
pub struct AlertService {
    alerts: Repository<WasteAlert>,
    products: Repository<Product>,
}

impl AlertService {
    pub fn new(alerts: Repository<WasteAlert>, products: Repository<Product>) -> Self {
        Self { alerts, products }
    }

    async fn load(&self, id: Uuid) -> Result<WasteAlert, AppError> {
        self.alerts
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("waste alert"))
    }

    fn conflict(id: Uuid, from: AlertStatus, to: AlertStatus) -> AppError {
        AppError::Conflict(format!(
            "alert {} cannot move from {:?} to {:?}",
            id, from, to
        ))
    }

    pub async fn transition(&self, id: Uuid, next: AlertStatus) -> Result<WasteAlert, AppError> {
        let mut alert = self.load(id).await?;
        alert
            .transition(next)
            .map_err(|current| Self::conflict(id, current, next))?;
        self.alerts.save(&mut alert).await?;

        tracing::info!(alert_id = %id, status = ?alert.status, "waste alert status changed");
        Ok(alert)
    }

    pub async fn resolve(&self, id: Uuid, actual_waste_qty: f64) -> Result<WasteAlert, AppError> {
        utils::require_non_negative("actualWasteQty", actual_waste_qty)?;

        let mut alert = self.load(id).await?;
        alert
            .resolve(actual_waste_qty)
            .map_err(|current| Self::conflict(id, current, AlertStatus::Resolved))?;
        self.alerts.save(&mut alert).await?;

        tracing::info!(
            alert_id = %id,
            predicted = alert.predicted_waste_qty,
            actual = actual_waste_qty,
            accuracy = ?alert.accuracy,
            "waste alert resolved"
        );
        Ok(alert)
    }

    /// Forecast waste for a product from its sales history and open an alert.
    pub async fn forecast_for_product(
        &self,
        product_id: Uuid,
        sales: &[SaleRecord],
        today: NaiveDate,
        days_until_expiry: Option<u32>,
    ) -> Result<WasteAlert, AppError> {
        let product = self
            .products
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| AppError::not_found("product"))?;

        let days = days_until_expiry.or(product.shelf_life_days).ok_or_else(|| {
            ValidationError::new("daysUntilExpiry is required when the product has no shelfLifeDays")
        })?;

        let forecast = forecast_waste(sales, today, product.stock, days);

        let mut alert = WasteAlert::create(WasteAlertInput {
            product_id: Some(product.id),
            product_name: product.name.clone(),
            supplier_id: product.supplier_id,
            predicted_waste_qty: forecast.predicted_waste_qty,
            current_stock: product.stock,
            predicted_waste_percentage: forecast.predicted_waste_percentage,
            confidence: Some(forecast.confidence),
        })?;
        self.alerts.save(&mut alert).await?;

        tracing::info!(
            alert_id = %alert.id,
            product_id = %product.id,
            risk_level = ?alert.risk_level,
            average_daily_demand = forecast.average_daily_demand,
            "waste forecast recorded"
        );
        Ok(alert)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{PackagingType, RiskLevel};
    use crate::models::ProductInput;
    use crate::repository::MemoryStore;
    use std::sync::Arc;

    fn service() -> (AlertService, Repository<Product>, Repository<WasteAlert>) {
        let store = Arc::new(MemoryStore::new());
        let products = Repository::new(store.clone());
        let alerts = Repository::new(store);
        (AlertService::new(alerts.clone(), products.clone()), products, alerts)
    }

    async fn seed_product(products: &Repository<Product>, stock: f64, shelf_life: Option<u32>) -> Product {
        let mut product = Product::create(ProductInput {
            name: "Bananas".to_string(),
            category: None,
            supplier_id: Some(Uuid::new_v4()),
            packaging_type: PackagingType::Minimal,
            sustainability_metrics: Default::default(),
            certifications: vec![],
            base_spoilage_rate: None,
            stock: Some(stock),
            shelf_life_days: shelf_life,
        })
        .unwrap();
        products.save(&mut product).await.unwrap();
        product
    }

    #[tokio::test]
    async fn test_forecast_creates_alert() {
        let (service, products, alerts) = service();
        let product = seed_product(&products, 100.0, Some(10)).await;
        let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let sales: Vec<SaleRecord> = (1..=30)
            .map(|d| SaleRecord {
                date: today - chrono::Duration::days(d),
                quantity: 3.0,
            })
            .collect();

        let alert = service.forecast_for_product(product.id, &sales, today, None).await.unwrap();
        assert_eq!(alert.predicted_waste_qty, 70.0);
        assert_eq!(alert.predicted_waste_percentage, 70.0);
        assert_eq!(alert.confidence, 90.0);
        assert_eq!(alert.risk_level, RiskLevel::Critical);
        assert_eq!(alert.supplier_id, product.supplier_id);
        assert!(alerts.find_by_id(alert.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_forecast_needs_expiry() {
        let (service, products, _) = service();
        let product = seed_product(&products, 10.0, None).await;
        let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();

        let err = service.forecast_for_product(product.id, &[], today, None).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = service.forecast_for_product(Uuid::new_v4(), &[], today, Some(3)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_lifecycle_conflicts() {
        let (service, _, alerts) = service();
        let mut alert = WasteAlert::create(WasteAlertInput {
            product_id: None,
            product_name: "Milk".to_string(),
            supplier_id: None,
            predicted_waste_qty: 10.0,
            current_stock: 40.0,
            predicted_waste_percentage: 25.0,
            confidence: None,
        })
        .unwrap();
        alerts.save(&mut alert).await.unwrap();

        let dismissed = service.transition(alert.id, AlertStatus::Dismissed).await.unwrap();
        assert_eq!(dismissed.status, AlertStatus::Dismissed);

        let err = service.resolve(alert.id, 4.0).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let err = service.transition(Uuid::new_v4(), AlertStatus::Acknowledged).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_resolve_records_accuracy() {
        let (service, _, alerts) = service();
        let mut alert = WasteAlert::create(WasteAlertInput {
            product_id: None,
            product_name: "Milk".to_string(),
            supplier_id: None,
            predicted_waste_qty: 10.0,
            current_stock: 40.0,
            predicted_waste_percentage: 25.0,
            confidence: None,
        })
        .unwrap();
        alerts.save(&mut alert).await.unwrap();

        let resolved = service.resolve(alert.id, 8.0).await.unwrap();
        assert_eq!(resolved.status, AlertStatus::Resolved);
        assert_eq!(resolved.accuracy, Some(80.0));

        assert!(service.resolve(alert.id, -1.0).await.is_err());
    }
}
