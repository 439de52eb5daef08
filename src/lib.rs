pub mod config;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod logger;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod services;
pub mod utils;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::services::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        // Shipments
        .route(
            "/api/shipments",
            get(handlers::shipments::list_shipments).post(handlers::shipments::create_shipment),
        )
        .route(
            "/api/shipments/:id",
            get(handlers::shipments::get_shipment)
                .put(handlers::shipments::update_shipment)
                .delete(handlers::shipments::delete_shipment),
        )
        .route("/api/routes/options", post(handlers::shipments::route_options))
        // Products
        .route(
            "/api/products",
            get(handlers::products::list_products).post(handlers::products::create_product),
        )
        .route(
            "/api/products/:id",
            get(handlers::products::get_product)
                .put(handlers::products::update_product)
                .delete(handlers::products::delete_product),
        )
        .route("/api/products/:id/forecast", post(handlers::products::forecast_waste))
        // Suppliers
        .route(
            "/api/suppliers",
            get(handlers::suppliers::list_suppliers).post(handlers::suppliers::create_supplier),
        )
        .route(
            "/api/suppliers/:id",
            get(handlers::suppliers::get_supplier)
                .put(handlers::suppliers::update_supplier)
                .delete(handlers::suppliers::delete_supplier),
        )
        .route("/api/suppliers/:id/documents", post(handlers::suppliers::add_document))
        .route(
            "/api/suppliers/:id/documents/:doc_id/verify",
            put(handlers::suppliers::verify_document),
        )
        // Waste alerts
        .route(
            "/api/alerts",
            get(handlers::alerts::list_alerts).post(handlers::alerts::create_alert),
        )
        .route(
            "/api/alerts/:id",
            get(handlers::alerts::get_alert)
                .put(handlers::alerts::update_alert)
                .delete(handlers::alerts::delete_alert),
        )
        .route("/api/alerts/:id/acknowledge", post(handlers::alerts::acknowledge_alert))
        .route("/api/alerts/:id/resolve", post(handlers::alerts::resolve_alert))
        .route("/api/alerts/:id/dismiss", post(handlers::alerts::dismiss_alert))
        // Analytics
        .route("/api/analytics/dashboard", get(handlers::analytics::dashboard))
        .route(
            "/api/analytics/sustainability-score",
            get(handlers::analytics::sustainability_score),
        )
        .route_layer(from_fn_with_state(state.clone(), middleware::auth::require_auth));

    Router::new()
        .merge(api)
        .route("/health", get(handlers::health::health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
