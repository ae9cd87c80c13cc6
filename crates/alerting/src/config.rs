//! Alert threshold configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Thresholds driving the condition checkers and the debounce policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertThresholds {
    /// Signal strength floor in dBm (default: -70)
    pub signal_floor_dbm: f64,
    /// Battery life floor in percent (default: 20)
    pub battery_floor_pct: f64,
    /// Pairwise proximity ceiling in feet (default: 100)
    pub proximity_ceiling_ft: f64,
    /// Minimum gap between re-publishes of one alert key (default: 3000 ms)
    pub debounce_ms: u64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            signal_floor_dbm: -70.0,
            battery_floor_pct: 20.0,
            proximity_ceiling_ft: 100.0,
            debounce_ms: 3000,
        }
    }
}

impl AlertThresholds {
    /// Debounce window as a duration
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
