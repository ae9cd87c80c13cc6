//! Keep-out-zone registry
//!
//! Per-vehicle restricted-area polygons uploaded by the mission planner.
//! A vehicle is "near" a zone when any polygon vertex lies within the
//! distance threshold.

use crate::distance::distance_feet;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use telemetry::{Position, VehicleId};
use tracing::{info, warn};

/// Default proximity threshold for keep-out zones (1000 m)
pub const DEFAULT_ZONE_THRESHOLD_FT: f64 = 3281.0;

/// One uploaded keep-out polygon for a vehicle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneUpload {
    pub vehicle_id: VehicleId,
    /// Polygon vertices as (latitude, longitude) pairs
    pub polygon: Vec<(f64, f64)>,
}

/// Registry of keep-out zones, keyed by vehicle
#[derive(Debug, Default)]
pub struct ZoneRegistry {
    zones: HashMap<VehicleId, Vec<Vec<Position>>>,
}

impl ZoneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all stored zones with a fresh upload
    ///
    /// Polygons with fewer than 3 vertices are rejected. Returns the number
    /// of polygons stored.
    pub fn replace_all(&mut self, uploads: Vec<ZoneUpload>) -> usize {
        self.zones.clear();
        let mut stored = 0;

        for upload in uploads {
            if upload.polygon.len() < 3 {
                warn!(
                    vehicle = %upload.vehicle_id,
                    vertices = upload.polygon.len(),
                    "rejected keep-out polygon with too few vertices"
                );
                continue;
            }

            let polygon = upload
                .polygon
                .iter()
                .map(|&(latitude, longitude)| Position::new(latitude, longitude))
                .collect();
            self.zones.entry(upload.vehicle_id).or_default().push(polygon);
            stored += 1;
        }

        info!(polygons = stored, "keep-out zones replaced");
        stored
    }

    /// Whether a point lies within `threshold_ft` of any of the vehicle's
    /// zone vertices
    pub fn is_near_keep_out_zone(
        &self,
        vehicle: VehicleId,
        point: &Position,
        threshold_ft: f64,
    ) -> bool {
        let Some(polygons) = self.zones.get(&vehicle) else {
            return false;
        };

        polygons
            .iter()
            .flatten()
            .any(|vertex| distance_feet(point, vertex) <= threshold_ft)
    }

    /// Number of polygons stored for a vehicle
    pub fn polygon_count(&self, vehicle: VehicleId) -> usize {
        self.zones.get(&vehicle).map(Vec::len).unwrap_or(0)
    }

    /// Drop all stored zones
    pub fn clear(&mut self) {
        self.zones.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_around_origin() -> ZoneUpload {
        ZoneUpload {
            vehicle_id: VehicleId::Eru,
            polygon: vec![(0.01, 0.01), (0.01, -0.01), (-0.01, -0.01), (-0.01, 0.01)],
        }
    }

    #[test]
    fn test_replace_all_rejects_degenerate_polygons() {
        let mut registry = ZoneRegistry::new();
        let stored = registry.replace_all(vec![
            square_around_origin(),
            ZoneUpload {
                vehicle_id: VehicleId::Mea,
                polygon: vec![(1.0, 1.0), (2.0, 2.0)],
            },
        ]);

        assert_eq!(stored, 1);
        assert_eq!(registry.polygon_count(VehicleId::Eru), 1);
        assert_eq!(registry.polygon_count(VehicleId::Mea), 0);
    }

    #[test]
    fn test_near_zone_vertex() {
        let mut registry = ZoneRegistry::new();
        registry.replace_all(vec![square_around_origin()]);

        // ~0.0001 degrees off a vertex, well inside the default threshold
        let near = Position::new(0.0101, 0.01);
        assert!(registry.is_near_keep_out_zone(VehicleId::Eru, &near, DEFAULT_ZONE_THRESHOLD_FT));

        // A degree away is tens of miles out
        let far = Position::new(1.0, 1.0);
        assert!(!registry.is_near_keep_out_zone(VehicleId::Eru, &far, DEFAULT_ZONE_THRESHOLD_FT));
    }

    #[test]
    fn test_vehicle_without_zones() {
        let registry = ZoneRegistry::new();
        let point = Position::new(0.0, 0.0);
        assert!(!registry.is_near_keep_out_zone(VehicleId::Mra, &point, DEFAULT_ZONE_THRESHOLD_FT));
    }

    #[test]
    fn test_replace_all_drops_previous_zones() {
        let mut registry = ZoneRegistry::new();
        registry.replace_all(vec![square_around_origin()]);
        registry.replace_all(vec![ZoneUpload {
            vehicle_id: VehicleId::Mea,
            polygon: vec![(5.0, 5.0), (5.0, 5.01), (5.01, 5.0)],
        }]);

        assert_eq!(registry.polygon_count(VehicleId::Eru), 0);
        assert_eq!(registry.polygon_count(VehicleId::Mea), 1);
    }
}
