pub mod product;
pub mod shipment;
pub mod supplier;
pub mod waste_alert;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

pub use product::{Product, ProductInput};
pub use shipment::{Location, Shipment, ShipmentInput};
pub use supplier::{AuditDoc, Supplier, SupplierInput};
pub use waste_alert::{AlertStatus, WasteAlert, WasteAlertInput};

/// A JSON document kept in one collection of the store.
///
/// `refresh_derived` recomputes every engine-owned field; repositories call
/// it immediately before each write, so derived values never drift from
/// their inputs.
pub trait Document: Serialize + DeserializeOwned + Send + Sync + 'static {
    const COLLECTION: &'static str;

    fn id(&self) -> Uuid;
    fn created_at(&self) -> DateTime<Utc>;
    fn touch(&mut self);
    fn refresh_derived(&mut self);
}
