use crate::models::{BoundingBox, Coordinate, Distance};

/// Earth's radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Average courier speed inside a city, used for delivery estimates
pub const COURIER_SPEED_KMH: f64 = 30.0;

/// Calculate the Haversine distance between two points in kilometers
///
/// The intermediate term is clamped to `[0, 1]` so identical and antipodal
/// points never take a square root of a value nudged out of range by
/// round-off.
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Distance in kilometers, never negative
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = ((delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Great-circle distance between two coordinates in kilometers
#[inline]
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    haversine_distance(a.latitude, a.longitude, b.latitude, b.longitude)
}

/// Round to 2 decimals for display. Comparisons must use the raw value.
#[inline]
pub fn round_km(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}

/// Human readable distance: meters below 1 km, one decimal above
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{}m away", (km * 1000.0).round() as u64)
    } else {
        format!("{:.1}km away", km)
    }
}

/// Label for a possibly unknown distance
pub fn distance_label(distance: Distance) -> String {
    match distance {
        Distance::Known(km) => format_distance(km),
        Distance::Unknown => "Unknown distance".to_string(),
    }
}

/// Estimated delivery time in whole minutes at courier speed
#[inline]
pub fn estimate_eta_minutes(km: f64) -> u32 {
    (km / COURIER_SPEED_KMH * 60.0).round() as u32
}

/// Calculate a bounding box around a center point
///
/// Much cheaper than Haversine, so it is used to narrow backend queries
/// before exact filtering.
/// 1° latitude ≈ 111km, 1° longitude ≈ 111km * cos(latitude)
///
/// Near the poles, across the antimeridian, or for radii wider than the
/// longitude span, the box covers every longitude.
pub fn calculate_bounding_box(lat: f64, lon: f64, radius_km: f64) -> BoundingBox {
    let lat_delta = radius_km / 111.0;
    let min_lat = (lat - lat_delta).max(-90.0);
    let max_lat = (lat + lat_delta).min(90.0);

    let cos_lat = lat.to_radians().cos().abs();
    let lon_delta = if cos_lat > f64::EPSILON {
        radius_km / (111.0 * cos_lat)
    } else {
        f64::INFINITY
    };

    let touches_pole = min_lat <= -90.0 || max_lat >= 90.0;
    let crosses_antimeridian = lon - lon_delta < -180.0 || lon + lon_delta > 180.0;
    if touches_pole || crosses_antimeridian || lon_delta >= 180.0 {
        return BoundingBox {
            min_lat,
            max_lat,
            min_lon: -180.0,
            max_lon: 180.0,
        };
    }

    BoundingBox {
        min_lat,
        max_lat,
        min_lon: lon - lon_delta,
        max_lon: lon + lon_delta,
    }
}

/// Check if a point is within a bounding box
#[inline]
pub fn is_within_bounding_box(lat: f64, lon: f64, bbox: &BoundingBox) -> bool {
    lat >= bbox.min_lat && lat <= bbox.max_lat && lon >= bbox.min_lon && lon <= bbox.max_lon
}

/// Link that opens a coordinate in Google Maps
pub fn google_maps_link(at: &Coordinate) -> String {
    format!("https://www.google.com/maps?q={},{}", at.latitude, at.longitude)
}

/// Google Maps directions link between two coordinates
pub fn directions_link(from: &Coordinate, to: &Coordinate) -> String {
    format!(
        "https://www.google.com/maps/dir/?api=1&origin={},{}&destination={},{}",
        from.latitude, from.longitude, to.latitude, to.longitude
    )
}
