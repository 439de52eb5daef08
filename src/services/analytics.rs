use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::engine::{round2, score_population, AlertSample, RiskLevel, SustainabilityScore, TransportMode};
use crate::error::StoreError;
use crate::models::{AlertStatus, Product, Shipment, Supplier, WasteAlert};
use crate::repository::Repository;

#[derive(Debug, Clone, Copy)]
pub struct AnalyticsWindow {
    pub days: i64,
    pub supplier_id: Option<Uuid>,
}

/// Entities created inside one analytics window.
#[derive(Debug, Default)]
pub struct Population {
    pub shipments: Vec<Shipment>,
    pub products: Vec<Product>,
    pub suppliers: Vec<Supplier>,
    pub alerts: Vec<WasteAlert>,
}

impl Population {
    pub fn alert_samples(&self) -> Vec<AlertSample> {
        self.alerts
            .iter()
            .map(|a| AlertSample {
                risk_level: a.risk_level,
                active: a.status == AlertStatus::Active,
                resolved: a.status == AlertStatus::Resolved,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RiskCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub critical: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeEmissions {
    pub transport_mode: TransportMode,
    pub shipments: usize,
    pub carbon_kg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub window_days: i64,
    pub shipment_count: usize,
    pub product_count: usize,
    pub supplier_count: usize,
    pub total_carbon_kg: f64,
    pub average_carbon_kg: f64,
    /// Percentage of shipments moved by a low-emission mode.
    pub eco_adoption_rate: f64,
    pub emissions_by_mode: Vec<ModeEmissions>,
    pub open_alerts: usize,
    /// Open alerts only.
    pub alerts_by_risk: RiskCounts,
    pub potential_savings: f64,
    pub average_esg_score: f64,
    pub average_green_score: f64,
}

fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        round2(values.iter().sum::<f64>() / values.len() as f64)
    }
}

pub fn eco_adoption_rate(shipments: &[Shipment]) -> f64 {
    if shipments.is_empty() {
        return 0.0;
    }
    let eco = shipments
        .iter()
        .filter(|s| s.transport_mode.is_low_emission())
        .count();
    round2(eco as f64 / shipments.len() as f64 * 100.0)
}

pub fn build_dashboard(window_days: i64, population: &Population) -> Dashboard {
    let carbon: Vec<f64> = population.shipments.iter().map(|s| s.carbon_kg).collect();

    let emissions_by_mode = TransportMode::ALL
        .into_iter()
        .filter_map(|mode| {
            let matching: Vec<&Shipment> = population
                .shipments
                .iter()
                .filter(|s| s.transport_mode == mode)
                .collect();
            if matching.is_empty() {
                return None;
            }
            Some(ModeEmissions {
                transport_mode: mode,
                shipments: matching.len(),
                carbon_kg: round2(matching.iter().map(|s| s.carbon_kg).sum()),
            })
        })
        .collect();

    let open: Vec<&WasteAlert> = population
        .alerts
        .iter()
        .filter(|a| a.status.is_open())
        .collect();
    let mut alerts_by_risk = RiskCounts::default();
    for alert in &open {
        match alert.risk_level {
            RiskLevel::Low => alerts_by_risk.low += 1,
            RiskLevel::Medium => alerts_by_risk.medium += 1,
            RiskLevel::High => alerts_by_risk.high += 1,
            RiskLevel::Critical => alerts_by_risk.critical += 1,
        }
    }
    // Recommendations are alternatives, so count only the best one per alert.
    let potential_savings: f64 = open
        .iter()
        .filter_map(|a| {
            a.recommendations
                .iter()
                .map(|r| r.estimated_savings)
                .max_by(|x, y| x.total_cmp(y))
        })
        .sum();

    let esg: Vec<f64> = population.suppliers.iter().map(|s| f64::from(s.esg_score)).collect();
    let green: Vec<f64> = population
        .products
        .iter()
        .map(|p| f64::from(p.sustainability_metrics.green_score))
        .collect();

    Dashboard {
        window_days,
        shipment_count: population.shipments.len(),
        product_count: population.products.len(),
        supplier_count: population.suppliers.len(),
        total_carbon_kg: round2(carbon.iter().sum()),
        average_carbon_kg: average(&carbon),
        eco_adoption_rate: eco_adoption_rate(&population.shipments),
        emissions_by_mode,
        open_alerts: open.len(),
        alerts_by_risk,
        potential_savings: round2(potential_savings),
        average_esg_score: average(&esg),
        average_green_score: average(&green),
    }
}

pub fn score(population: &Population) -> SustainabilityScore {
    let carbon: Vec<f64> = population.shipments.iter().map(|s| s.carbon_kg).collect();
    let esg: Vec<u8> = population.suppliers.iter().map(|s| s.esg_score).collect();
    let green: Vec<u8> = population
        .products
        .iter()
        .map(|p| p.sustainability_metrics.green_score)
        .collect();

    score_population(&carbon, &esg, &green, &population.alert_samples())
}

/// Read-side analytics over windowed entity populations. Nothing here is persisted.
pub struct AnalyticsService {
    shipments: Repository<Shipment>,
    products: Repository<Product>,
    suppliers: Repository<Supplier>,
    alerts: Repository<WasteAlert>,
}

impl AnalyticsService {
    pub fn new(
        shipments: Repository<Shipment>,
        products: Repository<Product>,
        suppliers: Repository<Supplier>,
        alerts: Repository<WasteAlert>,
    ) -> Self {
        Self {
            shipments,
            products,
            suppliers,
            alerts,
        }
    }

    pub async fn population(&self, window: AnalyticsWindow) -> Result<Population, StoreError> {
        let since = Duration::try_days(window.days)
            .and_then(|span| Utc::now().checked_sub_signed(span))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);

        let mut population = Population {
            shipments: self.shipments.list_since(since).await?,
            products: self.products.list_since(since).await?,
            suppliers: self.suppliers.list_since(since).await?,
            alerts: self.alerts.list_since(since).await?,
        };

        if let Some(supplier_id) = window.supplier_id {
            let owned_products: Vec<Uuid> = self
                .products
                .list()
                .await?
                .into_iter()
                .filter(|p| p.supplier_id == Some(supplier_id))
                .map(|p| p.id)
                .collect();

            population.shipments.retain(|s| s.supplier_id == Some(supplier_id));
            population.products.retain(|p| p.supplier_id == Some(supplier_id));
            population.suppliers.retain(|s| s.id == supplier_id);
            population.alerts.retain(|a| {
                a.supplier_id == Some(supplier_id)
                    || a.product_id.map_or(false, |id| owned_products.contains(&id))
            });
        }

        Ok(population)
    }

    pub async fn dashboard(&self, window: AnalyticsWindow) -> Result<Dashboard, StoreError> {
        let population = self.population(window).await?;
        Ok(build_dashboard(window.days, &population))
    }

    pub async fn sustainability_score(&self, window: AnalyticsWindow) -> Result<SustainabilityScore, StoreError> {
        let population = self.population(window).await?;
        let result = score(&population);
        tracing::debug!(
            days = window.days,
            supplier_id = ?window.supplier_id,
            overall = result.overall,
            "sustainability score computed"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{PackagingType, VehicleType};
    use crate::models::{ProductInput, ShipmentInput, SupplierInput, WasteAlertInput};
    use crate::repository::{DocumentStore, MemoryStore};
    use std::sync::Arc;

    struct Fixture {
        service: AnalyticsService,
        shipments: Repository<Shipment>,
        products: Repository<Product>,
        suppliers: Repository<Supplier>,
        alerts: Repository<WasteAlert>,
    }

    fn fixture() -> Fixture {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
        let shipments = Repository::new(store.clone());
        let products = Repository::new(store.clone());
        let suppliers = Repository::new(store.clone());
        let alerts = Repository::new(store);
        Fixture {
            service: AnalyticsService::new(shipments.clone(), products.clone(), suppliers.clone(), alerts.clone()),
            shipments,
            products,
            suppliers,
            alerts,
        }
    }

    fn shipment_input(mode: TransportMode, supplier_id: Option<Uuid>) -> ShipmentInput {
        ShipmentInput {
            supplier_id,
            product_name: None,
            quantity: 500.0,
            distance_km: Some(100.0),
            transport_mode: mode,
            vehicle_type: Some(VehicleType::Truck),
            packaging_weight: None,
            origin: None,
            destination: None,
        }
    }

    fn alert_input(pct: f64) -> WasteAlertInput {
        WasteAlertInput {
            product_id: None,
            product_name: "Lettuce".to_string(),
            supplier_id: None,
            predicted_waste_qty: 20.0,
            current_stock: 50.0,
            predicted_waste_percentage: pct,
            confidence: Some(100.0),
        }
    }

    fn window(days: i64) -> AnalyticsWindow {
        AnalyticsWindow { days, supplier_id: None }
    }

    #[tokio::test]
    async fn test_empty_dashboard_and_score() {
        let f = fixture();
        let dashboard = f.service.dashboard(window(30)).await.unwrap();
        assert_eq!(dashboard.shipment_count, 0);
        assert_eq!(dashboard.eco_adoption_rate, 0.0);
        assert!(dashboard.emissions_by_mode.is_empty());

        let score = f.service.sustainability_score(window(30)).await.unwrap();
        assert_eq!(score.breakdown.carbon_score, 0.0);
        assert_eq!(score.breakdown.waste_score, 100.0);
    }

    #[tokio::test]
    async fn test_dashboard_totals() {
        let f = fixture();
        for mode in [TransportMode::Diesel, TransportMode::Electric, TransportMode::Rail, TransportMode::Air] {
            let mut s = Shipment::create(shipment_input(mode, None)).unwrap();
            f.shipments.save(&mut s).await.unwrap();
        }
        let mut critical = WasteAlert::create(alert_input(40.0)).unwrap();
        f.alerts.save(&mut critical).await.unwrap();
        let mut resolved = WasteAlert::create(alert_input(12.0)).unwrap();
        resolved.transition(AlertStatus::Resolved).unwrap();
        f.alerts.save(&mut resolved).await.unwrap();

        let dashboard = f.service.dashboard(window(30)).await.unwrap();
        assert_eq!(dashboard.shipment_count, 4);
        // 7.5 + 2.5 + 1.5 + 25
        assert_eq!(dashboard.total_carbon_kg, 36.5);
        assert_eq!(dashboard.average_carbon_kg, 9.13);
        assert_eq!(dashboard.eco_adoption_rate, 50.0);
        assert_eq!(dashboard.emissions_by_mode.len(), 4);
        assert_eq!(dashboard.emissions_by_mode[0].transport_mode, TransportMode::Diesel);
        assert_eq!(dashboard.open_alerts, 1);
        assert_eq!(dashboard.alerts_by_risk.critical, 1);
        // best option for the open alert is discount pricing: 20 * 5
        assert_eq!(dashboard.potential_savings, 100.0);
    }

    #[tokio::test]
    async fn test_window_excludes_old_entities() {
        let f = fixture();
        let mut old = Shipment::create(shipment_input(TransportMode::Air, None)).unwrap();
        old.created_at = Utc::now() - Duration::days(60);
        f.shipments.save(&mut old).await.unwrap();
        let mut recent = Shipment::create(shipment_input(TransportMode::Rail, None)).unwrap();
        f.shipments.save(&mut recent).await.unwrap();

        let score = f.service.sustainability_score(window(30)).await.unwrap();
        assert_eq!(score.breakdown.carbon_score, 100.0);

        let score = f.service.sustainability_score(window(90)).await.unwrap();
        // mean of 25 and 1.5
        assert_eq!(score.breakdown.carbon_score, 60.0);
    }

    #[tokio::test]
    async fn test_supplier_filter() {
        let f = fixture();
        let mut supplier = Supplier::create(SupplierInput {
            name: "Acme".to_string(),
            contact_email: None,
            certification_level: Default::default(),
            sustainability_metrics: Default::default(),
        })
        .unwrap();
        f.suppliers.save(&mut supplier).await.unwrap();
        let mut other = supplier.clone();
        other.id = Uuid::new_v4();
        f.suppliers.save(&mut other).await.unwrap();

        let mut product = Product::create(ProductInput {
            name: "Kale".to_string(),
            category: None,
            supplier_id: Some(supplier.id),
            packaging_type: PackagingType::Compostable,
            sustainability_metrics: Default::default(),
            certifications: vec![],
            base_spoilage_rate: None,
            stock: None,
            shelf_life_days: None,
        })
        .unwrap();
        f.products.save(&mut product).await.unwrap();

        let mut mine = Shipment::create(shipment_input(TransportMode::Rail, Some(supplier.id))).unwrap();
        f.shipments.save(&mut mine).await.unwrap();
        let mut theirs = Shipment::create(shipment_input(TransportMode::Air, Some(other.id))).unwrap();
        f.shipments.save(&mut theirs).await.unwrap();

        let mut linked = alert_input(40.0);
        linked.product_id = Some(product.id);
        let mut linked = WasteAlert::create(linked).unwrap();
        f.alerts.save(&mut linked).await.unwrap();
        let mut unrelated = WasteAlert::create(alert_input(40.0)).unwrap();
        f.alerts.save(&mut unrelated).await.unwrap();

        let population = f
            .service
            .population(AnalyticsWindow { days: 30, supplier_id: Some(supplier.id) })
            .await
            .unwrap();
        assert_eq!(population.shipments.len(), 1);
        assert_eq!(population.shipments[0].id, mine.id);
        assert_eq!(population.suppliers.len(), 1);
        assert_eq!(population.products.len(), 1);
        assert_eq!(population.alerts.len(), 1);
        assert_eq!(population.alerts[0].id, linked.id);
    }
}
