//! Geospatial Support
//!
//! Great-circle distance between vehicle positions and keep-out-zone
//! proximity checks.

mod distance;
mod zones;

pub use distance::distance_feet;
pub use zones::{ZoneRegistry, ZoneUpload, DEFAULT_ZONE_THRESHOLD_FT};
