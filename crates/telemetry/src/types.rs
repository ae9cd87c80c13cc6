//! Core telemetry types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a monitored vehicle
///
/// The ground station tracks a fixed set of three vehicles. Wire ids are
/// lowercase (`eru`, `mea`, `mra`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleId {
    Eru,
    Mea,
    Mra,
}

impl VehicleId {
    /// All monitored vehicles, in evaluation order
    pub const ALL: [VehicleId; 3] = [VehicleId::Eru, VehicleId::Mea, VehicleId::Mra];

    /// Lowercase wire id
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleId::Eru => "eru",
            VehicleId::Mea => "mea",
            VehicleId::Mra => "mra",
        }
    }

    /// Uppercase callsign used in operator-facing text
    pub fn callsign(&self) -> &'static str {
        match self {
            VehicleId::Eru => "ERU",
            VehicleId::Mea => "MEA",
            VehicleId::Mra => "MRA",
        }
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reported vehicle status
///
/// Wire values match the legacy status strings. Unknown values deserialize
/// to `Standby`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum VehicleStatus {
    Connected,
    Disconnected,
    #[serde(rename = "Bad Connection")]
    BadConnection,
    #[serde(rename = "Approaching restricted area")]
    ApproachingRestrictedArea,
    #[default]
    Standby,
}

impl From<String> for VehicleStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "Connected" => VehicleStatus::Connected,
            "Disconnected" => VehicleStatus::Disconnected,
            "Bad Connection" => VehicleStatus::BadConnection,
            "Approaching restricted area" => VehicleStatus::ApproachingRestrictedArea,
            _ => VehicleStatus::Standby,
        }
    }
}

/// Geographic position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    /// Create a position from decimal degrees
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Latest telemetry reading for one vehicle
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TelemetryRecord {
    /// Signal strength in dBm
    pub signal_strength: f64,
    /// Reported status
    #[serde(default)]
    pub vehicle_status: VehicleStatus,
    /// Battery life in percent
    pub battery_life: f64,
    /// Current position, if a fix is available
    #[serde(default)]
    pub current_position: Option<Position>,
    /// Attitude (degrees)
    #[serde(default)]
    pub pitch: f64,
    #[serde(default)]
    pub yaw: f64,
    #[serde(default)]
    pub roll: f64,
    /// Ground speed (m/s)
    #[serde(default)]
    pub speed: f64,
    /// Altitude above ground (m)
    #[serde(default)]
    pub altitude: f64,
}

/// One inbound telemetry message as published by a vehicle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryFrame {
    pub vehicle_id: VehicleId,
    #[serde(flatten)]
    pub record: TelemetryRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_id_wire_format() {
        let json = serde_json::to_string(&VehicleId::Eru).unwrap();
        assert_eq!(json, "\"eru\"");

        let parsed: VehicleId = serde_json::from_str("\"mra\"").unwrap();
        assert_eq!(parsed, VehicleId::Mra);
    }

    #[test]
    fn test_status_wire_strings() {
        let json = serde_json::to_string(&VehicleStatus::BadConnection).unwrap();
        assert_eq!(json, "\"Bad Connection\"");

        let parsed: VehicleStatus =
            serde_json::from_str("\"Approaching restricted area\"").unwrap();
        assert_eq!(parsed, VehicleStatus::ApproachingRestrictedArea);
    }

    #[test]
    fn test_unknown_status_maps_to_standby() {
        let parsed: VehicleStatus = serde_json::from_str("\"In Use\"").unwrap();
        assert_eq!(parsed, VehicleStatus::Standby);
    }

    #[test]
    fn test_frame_decode() {
        let payload = r#"{
            "vehicle_id": "eru",
            "signal_strength": -55.0,
            "vehicle_status": "Connected",
            "battery_life": 87.5,
            "current_position": { "latitude": 33.9326, "longitude": -117.6306 }
        }"#;

        let frame: TelemetryFrame = serde_json::from_str(payload).unwrap();
        assert_eq!(frame.vehicle_id, VehicleId::Eru);
        assert_eq!(frame.record.vehicle_status, VehicleStatus::Connected);
        assert_eq!(frame.record.battery_life, 87.5);
        assert!(frame.record.current_position.is_some());
        // Fields absent from the payload default to zero
        assert_eq!(frame.record.speed, 0.0);
    }
}
