use serde::{Deserialize, Serialize};

use super::carbon::{carbon_footprint, CarbonInput, TransportMode, VehicleType};
use super::round2;

const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Great-circle distance in km, rounded to two decimals.
pub fn haversine_km(from: GeoPoint, to: GeoPoint) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lon = (to.lon - from.lon).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + from.lat.to_radians().cos() * to.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    round2(EARTH_RADIUS_KM * c)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteOption {
    pub transport_mode: TransportMode,
    pub vehicle_type: Option<VehicleType>,
    pub carbon_kg: f64,
    /// Carbon saved relative to a diesel truck over the same distance.
    pub savings_kg: f64,
}

fn candidates() -> Vec<(TransportMode, Option<VehicleType>)> {
    TransportMode::ALL
        .into_iter()
        .flat_map(|mode| {
            if mode.requires_vehicle() {
                VehicleType::ROAD.iter().map(|v| (mode, Some(*v))).collect::<Vec<_>>()
            } else {
                vec![(mode, None)]
            }
        })
        .collect()
}

/// Every mode/vehicle option for a haul, lowest carbon first.
pub fn compare_routes(distance_km: f64, quantity: f64, packaging_weight: f64) -> Vec<RouteOption> {
    let carbon_for = |mode, vehicle| {
        carbon_footprint(&CarbonInput {
            transport_mode: Some(mode),
            vehicle_type: vehicle,
            distance_km,
            quantity,
            packaging_weight,
        })
    };
    let baseline = carbon_for(TransportMode::Diesel, Some(VehicleType::Truck));

    let mut options: Vec<RouteOption> = candidates()
        .into_iter()
        .map(|(mode, vehicle)| {
            let carbon_kg = carbon_for(mode, vehicle);
            RouteOption {
                transport_mode: mode,
                vehicle_type: vehicle,
                carbon_kg,
                savings_kg: round2(baseline - carbon_kg),
            }
        })
        .collect();

    options.sort_by(|a, b| a.carbon_kg.total_cmp(&b.carbon_kg));
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_known_distance() {
        let london = GeoPoint { lat: 51.5074, lon: -0.1278 };
        let paris = GeoPoint { lat: 48.8566, lon: 2.3522 };
        let d = haversine_km(london, paris);
        assert!((d - 343.5).abs() < 1.0, "got {}", d);
    }

    #[test]
    fn test_haversine_same_point() {
        let p = GeoPoint { lat: 10.0, lon: 20.0 };
        assert_eq!(haversine_km(p, p), 0.0);
    }

    #[test]
    fn test_compare_routes_orders_by_carbon() {
        let options = compare_routes(1000.0, 1000.0, 0.0);
        assert_eq!(options.len(), 12);
        assert!(options.windows(2).all(|w| w[0].carbon_kg <= w[1].carbon_kg));

        let last = options.last().unwrap();
        assert_eq!(last.transport_mode, TransportMode::Air);
        assert_eq!(last.carbon_kg, 500.0);
        assert_eq!(last.savings_kg, -350.0);
    }

    #[test]
    fn test_compare_routes_best_option() {
        let options = compare_routes(1000.0, 1000.0, 0.0);
        // electric car and ship share the lowest factor
        assert_eq!(options[0].carbon_kg, 20.0);
        assert_eq!(options[0].savings_kg, 130.0);
    }

    #[test]
    fn test_compare_routes_zero_distance() {
        let options = compare_routes(0.0, 1000.0, 0.0);
        assert!(options.iter().all(|o| o.carbon_kg == 0.0 && o.savings_kg == 0.0));
    }
}
