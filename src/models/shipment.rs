use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Document;
use crate::engine::{carbon_footprint, haversine_km, CarbonInput, GeoPoint, TransportMode, VehicleType};
use crate::error::ValidationError;
use crate::utils;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    pub fn point(&self) -> GeoPoint {
        GeoPoint { lat: self.lat, lon: self.lon }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    pub id: Uuid,
    pub supplier_id: Option<Uuid>,
    pub product_name: Option<String>,
    pub quantity: f64,
    pub distance_km: f64,
    pub transport_mode: TransportMode,
    pub vehicle_type: Option<VehicleType>,
    pub packaging_weight: f64,
    pub origin: Option<Location>,
    pub destination: Option<Location>,
    pub carbon_kg: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client-supplied shipment fields. Carries no derived values.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentInput {
    pub supplier_id: Option<Uuid>,
    pub product_name: Option<String>,
    pub quantity: f64,
    /// Computed from `origin` and `destination` when omitted.
    pub distance_km: Option<f64>,
    pub transport_mode: TransportMode,
    pub vehicle_type: Option<VehicleType>,
    pub packaging_weight: Option<f64>,
    pub origin: Option<Location>,
    pub destination: Option<Location>,
}

impl ShipmentInput {
    fn validate(&self) -> Result<f64, ValidationError> {
        utils::require_positive("quantity", self.quantity)?;
        if let Some(weight) = self.packaging_weight {
            utils::require_non_negative("packagingWeight", weight)?;
        }
        for location in [&self.origin, &self.destination].into_iter().flatten() {
            utils::require_coordinates(location.lat, location.lon)?;
        }

        match (self.distance_km, &self.origin, &self.destination) {
            (Some(distance), _, _) => {
                utils::require_non_negative("distanceKm", distance)?;
                Ok(distance)
            }
            (None, Some(origin), Some(destination)) => Ok(haversine_km(origin.point(), destination.point())),
            (None, _, _) => Err(ValidationError::new(
                "distanceKm is required unless origin and destination are given",
            )),
        }
    }
}

impl Shipment {
    pub fn create(input: ShipmentInput) -> Result<Self, ValidationError> {
        let now = Utc::now();
        let mut shipment = Self {
            id: Uuid::new_v4(),
            supplier_id: None,
            product_name: None,
            quantity: 0.0,
            distance_km: 0.0,
            transport_mode: input.transport_mode,
            vehicle_type: None,
            packaging_weight: 0.0,
            origin: None,
            destination: None,
            carbon_kg: 0.0,
            created_at: now,
            updated_at: now,
        };
        shipment.apply(input)?;
        Ok(shipment)
    }

    /// Replace every client-owned field with the values from `input`.
    pub fn apply(&mut self, input: ShipmentInput) -> Result<(), ValidationError> {
        let distance_km = input.validate()?;

        self.vehicle_type = match input.vehicle_type {
            None if input.transport_mode.requires_vehicle() => Some(VehicleType::Truck),
            other => other,
        };
        self.supplier_id = input.supplier_id;
        self.product_name = input.product_name;
        self.quantity = input.quantity;
        self.distance_km = distance_km;
        self.transport_mode = input.transport_mode;
        self.packaging_weight = input.packaging_weight.unwrap_or(0.0);
        self.origin = input.origin;
        self.destination = input.destination;
        Ok(())
    }

    pub fn carbon_input(&self) -> CarbonInput {
        CarbonInput {
            transport_mode: Some(self.transport_mode),
            vehicle_type: self.vehicle_type,
            distance_km: self.distance_km,
            quantity: self.quantity,
            packaging_weight: self.packaging_weight,
        }
    }
}

impl Document for Shipment {
    const COLLECTION: &'static str = "shipments";

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
        self.carbon_kg = carbon_footprint(&self.carbon_input());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> ShipmentInput {
        ShipmentInput {
            supplier_id: None,
            product_name: Some("Apples".to_string()),
            quantity: 500.0,
            distance_km: Some(100.0),
            transport_mode: TransportMode::Diesel,
            vehicle_type: None,
            packaging_weight: None,
            origin: None,
            destination: None,
        }
    }

    #[test]
    fn test_create_defaults_vehicle_to_truck() {
        let mut shipment = Shipment::create(input()).unwrap();
        assert_eq!(shipment.vehicle_type, Some(VehicleType::Truck));
        assert_eq!(shipment.packaging_weight, 0.0);

        shipment.refresh_derived();
        assert_eq!(shipment.carbon_kg, 7.5);
    }

    #[test]
    fn test_mode_level_transport_keeps_no_vehicle() {
        let mut data = input();
        data.transport_mode = TransportMode::Rail;
        let shipment = Shipment::create(data).unwrap();
        assert_eq!(shipment.vehicle_type, None);
    }

    #[test]
    fn test_distance_from_coordinates() {
        let mut data = input();
        data.distance_km = None;
        data.origin = Some(Location { name: None, lat: 0.0, lon: 0.0 });
        data.destination = Some(Location { name: None, lat: 0.0, lon: 1.0 });
        let shipment = Shipment::create(data).unwrap();
        assert!((shipment.distance_km - 111.19).abs() < 0.01);
    }

    #[test]
    fn test_missing_distance_is_rejected() {
        let mut data = input();
        data.distance_km = None;
        assert!(Shipment::create(data).is_err());
    }

    #[test]
    fn test_invalid_numbers_are_rejected() {
        let mut data = input();
        data.quantity = 0.0;
        assert!(Shipment::create(data).is_err());

        let mut data = input();
        data.packaging_weight = Some(-1.0);
        assert!(Shipment::create(data).is_err());
    }

    #[test]
    fn test_apply_then_refresh_recomputes_carbon() {
        let mut shipment = Shipment::create(input()).unwrap();
        shipment.refresh_derived();

        let mut data = input();
        data.distance_km = Some(200.0);
        shipment.apply(data).unwrap();
        shipment.refresh_derived();
        assert_eq!(shipment.carbon_kg, 15.0);
    }

    #[test]
    fn test_wire_format_ignores_client_carbon() {
        let body = r#"{"quantity": 500, "distanceKm": 100, "transportMode": "diesel", "carbonKg": 0.01}"#;
        let data: ShipmentInput = serde_json::from_str(body).unwrap();
        let mut shipment = Shipment::create(data).unwrap();
        shipment.refresh_derived();
        assert_eq!(shipment.carbon_kg, 7.5);

        let json = serde_json::to_value(&shipment).unwrap();
        assert_eq!(json["carbonKg"], 7.5);
        assert_eq!(json["vehicleType"], "truck");
    }
}
