use serde::{Deserialize, Serialize};

use super::round2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Diesel,
    Electric,
    Hybrid,
    Rail,
    Ship,
    Air,
}

impl TransportMode {
    pub const ALL: [TransportMode; 6] = [
        TransportMode::Diesel,
        TransportMode::Electric,
        TransportMode::Hybrid,
        TransportMode::Rail,
        TransportMode::Ship,
        TransportMode::Air,
    ];

    /// Road modes are broken down by vehicle; the others use one factor.
    pub fn requires_vehicle(self) -> bool {
        matches!(self, TransportMode::Diesel | TransportMode::Electric | TransportMode::Hybrid)
    }

    /// Modes counted toward the eco-adoption rate.
    pub fn is_low_emission(self) -> bool {
        matches!(
            self,
            TransportMode::Electric | TransportMode::Hybrid | TransportMode::Rail | TransportMode::Ship
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Truck,
    Van,
    Car,
    Train,
    Ship,
    Plane,
}

impl VehicleType {
    pub const ROAD: [VehicleType; 3] = [VehicleType::Truck, VehicleType::Van, VehicleType::Car];
}

const DIESEL_TRUCK: f64 = 0.15;

/// kg CO2 per km per metric ton.
///
/// A missing vehicle means a truck of the given mode. A vehicle that the
/// mode has no entry for falls back to the diesel truck factor.
pub fn emission_factor(mode: TransportMode, vehicle: Option<VehicleType>) -> f64 {
    let vehicle = vehicle.unwrap_or(VehicleType::Truck);
    match (mode, vehicle) {
        (TransportMode::Rail, _) => 0.03,
        (TransportMode::Ship, _) => 0.02,
        (TransportMode::Air, _) => 0.50,

        (TransportMode::Diesel, VehicleType::Truck) => DIESEL_TRUCK,
        (TransportMode::Diesel, VehicleType::Van) => 0.12,
        (TransportMode::Diesel, VehicleType::Car) => 0.08,

        (TransportMode::Electric, VehicleType::Truck) => 0.05,
        (TransportMode::Electric, VehicleType::Van) => 0.04,
        (TransportMode::Electric, VehicleType::Car) => 0.02,

        (TransportMode::Hybrid, VehicleType::Truck) => 0.10,
        (TransportMode::Hybrid, VehicleType::Van) => 0.08,
        (TransportMode::Hybrid, VehicleType::Car) => 0.05,

        _ => DIESEL_TRUCK,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CarbonInput {
    pub transport_mode: Option<TransportMode>,
    pub vehicle_type: Option<VehicleType>,
    pub distance_km: f64,
    pub quantity: f64,
    pub packaging_weight: f64,
}

/// Emitted carbon in kg, rounded to two decimals.
///
/// Returns 0 when the mode is missing or distance/quantity is not positive.
pub fn carbon_footprint(input: &CarbonInput) -> f64 {
    let Some(mode) = input.transport_mode else {
        return 0.0;
    };
    if !(input.distance_km > 0.0) || !(input.quantity > 0.0) {
        return 0.0;
    }

    let packaging = if input.packaging_weight > 0.0 { input.packaging_weight } else { 0.0 };
    let total_weight_tons = (input.quantity + packaging) / 1000.0;
    let factor = emission_factor(mode, input.vehicle_type);

    round2(input.distance_km * factor * total_weight_tons).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shipment(mode: TransportMode, vehicle: Option<VehicleType>, distance: f64, quantity: f64) -> CarbonInput {
        CarbonInput {
            transport_mode: Some(mode),
            vehicle_type: vehicle,
            distance_km: distance,
            quantity,
            packaging_weight: 0.0,
        }
    }

    #[test]
    fn test_diesel_truck_example() {
        let input = shipment(TransportMode::Diesel, Some(VehicleType::Truck), 100.0, 500.0);
        assert_eq!(carbon_footprint(&input), 7.5);
    }

    #[test]
    fn test_mode_level_factors_ignore_vehicle() {
        assert_eq!(emission_factor(TransportMode::Rail, Some(VehicleType::Van)), 0.03);
        assert_eq!(emission_factor(TransportMode::Ship, None), 0.02);
        assert_eq!(emission_factor(TransportMode::Air, Some(VehicleType::Plane)), 0.50);
    }

    #[test]
    fn test_missing_vehicle_defaults_to_truck_of_mode() {
        assert_eq!(emission_factor(TransportMode::Electric, None), 0.05);
        assert_eq!(emission_factor(TransportMode::Hybrid, None), 0.10);
    }

    #[test]
    fn test_unknown_vehicle_for_mode_falls_back_to_diesel_truck() {
        assert_eq!(emission_factor(TransportMode::Electric, Some(VehicleType::Train)), 0.15);
        assert_eq!(emission_factor(TransportMode::Hybrid, Some(VehicleType::Plane)), 0.15);
    }

    #[test]
    fn test_degenerate_inputs_yield_zero() {
        let mut input = shipment(TransportMode::Air, None, 0.0, 100.0);
        assert_eq!(carbon_footprint(&input), 0.0);

        input.distance_km = 100.0;
        input.quantity = 0.0;
        assert_eq!(carbon_footprint(&input), 0.0);

        input.quantity = 100.0;
        input.transport_mode = None;
        assert_eq!(carbon_footprint(&input), 0.0);

        input.transport_mode = Some(TransportMode::Air);
        input.distance_km = -50.0;
        assert_eq!(carbon_footprint(&input), 0.0);

        input.distance_km = f64::NAN;
        assert_eq!(carbon_footprint(&input), 0.0);
    }

    #[test]
    fn test_packaging_weight_is_added() {
        let mut input = shipment(TransportMode::Rail, None, 1000.0, 800.0);
        input.packaging_weight = 200.0;
        // 1000 km * 0.03 * 1 t
        assert_eq!(carbon_footprint(&input), 30.0);
    }

    #[test]
    fn test_monotonic_in_distance_and_weight() {
        for mode in TransportMode::ALL {
            for vehicle in VehicleType::ROAD {
                let mut last = 0.0;
                for step in 0..50 {
                    let input = shipment(mode, Some(vehicle), step as f64 * 37.5, 250.0);
                    let carbon = carbon_footprint(&input);
                    assert!(carbon >= last, "{:?}/{:?} decreased at step {}", mode, vehicle, step);
                    assert!(carbon >= 0.0);
                    last = carbon;
                }

                let mut last = 0.0;
                for step in 1..50 {
                    let mut input = shipment(mode, Some(vehicle), 420.0, step as f64 * 10.0);
                    input.packaging_weight = step as f64;
                    let carbon = carbon_footprint(&input);
                    assert!(carbon >= last);
                    last = carbon;
                }
            }
        }
    }

    #[test]
    fn test_low_emission_modes() {
        assert!(TransportMode::Rail.is_low_emission());
        assert!(TransportMode::Electric.is_low_emission());
        assert!(!TransportMode::Diesel.is_low_emission());
        assert!(!TransportMode::Air.is_low_emission());
    }

    #[test]
    fn test_wire_names() {
        let mode: TransportMode = serde_json::from_str("\"electric\"").unwrap();
        assert_eq!(mode, TransportMode::Electric);
        assert_eq!(serde_json::to_string(&VehicleType::Plane).unwrap(), "\"plane\"");
    }
}
