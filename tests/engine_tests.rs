//! The four worked examples, end to end through the public engine API.

use ecotrack::engine::{
    assess_waste_risk, carbon_footprint, esg_score, green_score, score_population, AlertSample,
    CarbonInput, CertificationLevel, EsgInput, GreenScoreInput, Impact, PackagingType, RiskLevel,
    ScoreCategory, TransportMode, VehicleType, WasteRiskInput,
};

#[test]
fn test_diesel_truck_shipment() {
    let input = CarbonInput {
        transport_mode: Some(TransportMode::Diesel),
        vehicle_type: Some(VehicleType::Truck),
        distance_km: 100.0,
        quantity: 500.0,
        packaging_weight: 0.0,
    };
    assert_eq!(carbon_footprint(&input), 7.5);
}

#[test]
fn test_minimal_packaging_product() {
    let input = GreenScoreInput {
        packaging_type: Some(PackagingType::Minimal),
        carbon_footprint: 0.5,
        water_footprint: 5.0,
        certification_count: 1,
        base_spoilage_rate: 1.0,
    };
    assert_eq!(green_score(&input), 100);
}

#[test]
fn test_organic_supplier() {
    let input = EsgInput {
        certification_level: CertificationLevel::Organic,
        carbon_footprint: 8.0,
        waste_reduction: 60.0,
        renewable_energy: 85.0,
        verified_documents: 3,
    };
    assert_eq!(esg_score(&input), 100);
}

#[test]
fn test_high_risk_alert() {
    let input = WasteRiskInput {
        predicted_waste_percentage: 25.0,
        confidence: 80.0,
        current_stock: 50.0,
        predicted_waste_qty: 20.0,
    };
    let assessment = assess_waste_risk(&input);

    assert_eq!(assessment.risk_level, RiskLevel::High);
    let actions: Vec<&str> = assessment.recommendations.iter().map(|r| r.action.as_str()).collect();
    assert_eq!(actions, vec!["Discount Pricing", "Transfer to Other Stores", "Promotional Campaign"]);
    assert_eq!(assessment.recommendations[0].impact, Impact::High);
}

#[test]
fn test_population_of_worked_examples() {
    let carbon = [7.5];
    let alerts = [AlertSample {
        risk_level: RiskLevel::High,
        active: true,
        resolved: false,
    }];
    let score = score_population(&carbon, &[100], &[100], &alerts);

    assert_eq!(score.breakdown.carbon_score, 80.0);
    assert_eq!(score.breakdown.supplier_score, 100.0);
    assert_eq!(score.breakdown.product_score, 100.0);
    assert_eq!(score.breakdown.waste_score, 0.0);
    assert_eq!(score.overall, 74.0);
    assert_eq!(score.category, ScoreCategory::Good);

    let categories: Vec<&str> = score.recommendations.iter().map(|r| r.category.as_str()).collect();
    assert_eq!(categories, vec!["waste"]);
}
