//! Great-circle distance

use telemetry::Position;

/// Spherical-earth radius used by the haversine approximation
const EARTH_RADIUS_MILES: f64 = 3959.0;

const FEET_PER_MILE: f64 = 5280.0;

/// Great-circle distance between two positions, in feet
///
/// Haversine formula on a spherical-earth approximation. Accurate to well
/// under a foot at the ranges the proximity checks care about.
pub fn distance_feet(a: &Position, b: &Position) -> f64 {
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();

    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_MILES * c * FEET_PER_MILE
}
