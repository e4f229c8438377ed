// Unit tests for Donor Match

use donor_match::core::{
    compatibility::{acceptable_donors, can_donate, classify},
    distance::{
        calculate_bounding_box, distance_km, format_distance, haversine_distance,
        is_within_bounding_box, round_km,
    },
};
use donor_match::models::{BloodType, Compatibility, Coordinate};

fn coord(latitude: f64, longitude: f64) -> Coordinate {
    Coordinate { latitude, longitude }
}

#[test]
fn test_haversine_distance_zero() {
    let distance = haversine_distance(40.7128, -74.0060, 40.7128, -74.0060);
    assert_eq!(distance, 0.0);
}

#[test]
fn test_haversine_distance_manhattan_to_brooklyn() {
    // Manhattan to Brooklyn is approximately 5-10 km
    let distance = haversine_distance(40.7580, -73.9855, 40.6782, -73.9442);
    assert!(distance > 5.0 && distance < 15.0);
}

#[test]
fn test_distance_identity_for_many_points() {
    let points = [
        coord(0.0, 0.0),
        coord(90.0, 0.0),
        coord(-90.0, 180.0),
        coord(51.5074, -0.1278),
        coord(-33.8688, 151.2093),
        coord(1e-9, -1e-9),
    ];

    for p in points {
        assert_eq!(distance_km(p, p), 0.0, "distance to self should be 0 for {:?}", p);
    }
}

#[test]
fn test_distance_symmetry_and_non_negative() {
    let points = [
        coord(40.7128, -74.0060),
        coord(34.0522, -118.2437),
        coord(0.0, 180.0),
        coord(-45.0, 170.0),
        coord(89.999, 0.0),
        coord(-12.5, -77.0),
    ];

    for a in points {
        for b in points {
            let ab = distance_km(a, b);
            let ba = distance_km(b, a);
            assert!(ab.is_finite() && ab >= 0.0);
            assert!((ab - ba).abs() < 1e-9, "asymmetric: {} vs {}", ab, ba);
        }
    }
}

#[test]
fn test_antipodal_distance() {
    let distance = distance_km(coord(0.0, 0.0), coord(0.0, 180.0));
    assert!((distance - 20015.09).abs() < 0.5, "got {}", distance);

    // Pole to pole is antipodal too
    let distance = distance_km(coord(90.0, 0.0), coord(-90.0, 0.0));
    assert!((distance - 20015.09).abs() < 0.5, "got {}", distance);
}

#[test]
fn test_new_york_to_los_angeles() {
    let distance = distance_km(coord(40.7128, -74.0060), coord(34.0522, -118.2437));
    assert!(distance > 3935.0 && distance < 3945.0, "got {}", distance);
}

#[test]
fn test_out_of_range_coordinates_are_arithmetic_only() {
    let distance = distance_km(coord(120.0, 400.0), coord(-100.0, -500.0));
    assert!(distance.is_finite() && distance >= 0.0);
}

#[test]
fn test_rounding_for_display() {
    assert_eq!(round_km(1.23456), 1.23);
    assert_eq!(round_km(20015.0862), 20015.09);
}

#[test]
fn test_format_distance_boundaries() {
    assert_eq!(format_distance(0.9994), "999m away");
    assert_eq!(format_distance(1.04), "1.0km away");
}

#[test]
fn test_bounding_box_contains_radius() {
    let center = coord(40.7128, -74.0060);
    let bbox = calculate_bounding_box(center.latitude, center.longitude, 10.0);

    // Points within 10km along each axis should fall inside
    assert!(is_within_bounding_box(40.75, -74.0060, &bbox));
    assert!(is_within_bounding_box(40.7128, -73.9, &bbox));
    assert!(!is_within_bounding_box(bbox.max_lat + 0.01, -74.0, &bbox));
}

#[test]
fn test_compatibility_table() {
    assert_eq!(acceptable_donors(BloodType::ONegative), &[BloodType::ONegative]);
    assert_eq!(acceptable_donors(BloodType::AbPositive).len(), 8);

    assert!(can_donate(BloodType::ONegative, BloodType::AbNegative));
    assert!(!can_donate(BloodType::OPositive, BloodType::AbNegative));
    assert_eq!(
        classify(BloodType::BNegative, BloodType::BPositive),
        Compatibility::Compatible
    );
}

#[test]
fn test_compatibility_matches_rules() {
    // ABO: donor antigens must be a subset of the recipient's
    // Rh: a negative recipient only accepts negative donors
    fn antigens(t: BloodType) -> (bool, bool, bool) {
        match t {
            BloodType::APositive => (true, false, true),
            BloodType::ANegative => (true, false, false),
            BloodType::BPositive => (false, true, true),
            BloodType::BNegative => (false, true, false),
            BloodType::AbPositive => (true, true, true),
            BloodType::AbNegative => (true, true, false),
            BloodType::OPositive => (false, false, true),
            BloodType::ONegative => (false, false, false),
        }
    }

    for donor in BloodType::ALL {
        for recipient in BloodType::ALL {
            let (da, db, drh) = antigens(donor);
            let (ra, rb, rrh) = antigens(recipient);
            let expected = (!da || ra) && (!db || rb) && (!drh || rrh);
            assert_eq!(
                can_donate(donor, recipient),
                expected,
                "{} -> {}",
                donor,
                recipient
            );
        }
    }
}
