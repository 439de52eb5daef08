pub mod alerts;
pub mod analytics;

use std::sync::Arc;

use crate::config::Config;
use crate::models::{Product, Shipment, Supplier, WasteAlert};
use crate::repository::{DocumentStore, Repository};

pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn DocumentStore>,
    pub shipments: Repository<Shipment>,
    pub products: Repository<Product>,
    pub suppliers: Repository<Supplier>,
    pub alerts: Repository<WasteAlert>,
    pub alert_service: alerts::AlertService,
    pub analytics: analytics::AnalyticsService,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn DocumentStore>) -> Self {
        let shipments = Repository::new(Arc::clone(&store));
        let products = Repository::new(Arc::clone(&store));
        let suppliers = Repository::new(Arc::clone(&store));
        let alerts = Repository::new(Arc::clone(&store));

        let alert_service = alerts::AlertService::new(alerts.clone(), products.clone());
        let analytics = analytics::AnalyticsService::new(
            shipments.clone(),
            products.clone(),
            suppliers.clone(),
            alerts.clone(),
        );

        Self {
            config,
            store,
            shipments,
            products,
            suppliers,
            alerts,
            alert_service,
            analytics,
        }
    }
}
