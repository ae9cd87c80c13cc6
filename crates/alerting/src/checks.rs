//! Condition checkers
//!
//! Pure decision functions mapping one vehicle's latest record (or a pair
//! of positions) to an alert-or-clear intent per alert type. The monitor
//! routes each result through the dispatcher.

use crate::config::AlertThresholds;
use crate::types::{AlertType, Severity};
use geo::distance_feet;
use telemetry::{Position, TelemetryRecord, VehicleId, VehicleStatus};

/// What the dispatcher should do for one alert type
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Raise {
        severity: Severity,
        title: String,
        description: String,
    },
    Clear,
}

/// One checker decision
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    pub alert_type: AlertType,
    pub verdict: Verdict,
}

/// Signal strength below the floor raises a warning; anything at or above
/// the floor clears it (strict `<` comparison)
pub fn check_signal_strength(
    vehicle: VehicleId,
    record: &TelemetryRecord,
    thresholds: &AlertThresholds,
) -> CheckResult {
    let verdict = if record.signal_strength < thresholds.signal_floor_dbm {
        Verdict::Raise {
            severity: Severity::Warning,
            title: format!("{} weak signal", vehicle.callsign()),
            description: format!(
                "Signal strength {:.1} dBm is below the {:.0} dBm floor",
                record.signal_strength, thresholds.signal_floor_dbm
            ),
        }
    } else {
        Verdict::Clear
    };

    CheckResult {
        alert_type: AlertType::SignalStrength,
        verdict,
    }
}

/// Connection status checker
///
/// Disconnected raises `heartbeat_timeout`; Connected clears it. A Bad
/// Connection status raises `signal_strength` independently of the
/// dedicated signal checker and no status clears it here, so within one
/// pass the later writer of that type wins.
pub fn check_connection(vehicle: VehicleId, record: &TelemetryRecord) -> Vec<CheckResult> {
    match record.vehicle_status {
        VehicleStatus::Disconnected => vec![CheckResult {
            alert_type: AlertType::HeartbeatTimeout,
            verdict: Verdict::Raise {
                severity: Severity::Error,
                title: format!("{} disconnected", vehicle.callsign()),
                description: "No heartbeat received from the vehicle".to_string(),
            },
        }],
        VehicleStatus::Connected => vec![CheckResult {
            alert_type: AlertType::HeartbeatTimeout,
            verdict: Verdict::Clear,
        }],
        VehicleStatus::BadConnection => vec![CheckResult {
            alert_type: AlertType::SignalStrength,
            verdict: Verdict::Raise {
                severity: Severity::Warning,
                title: format!("{} bad connection", vehicle.callsign()),
                description: "Vehicle reports a degraded link".to_string(),
            },
        }],
        _ => Vec::new(),
    }
}

/// Battery below the floor raises an error; anything at or above clears it
pub fn check_battery(
    vehicle: VehicleId,
    record: &TelemetryRecord,
    thresholds: &AlertThresholds,
) -> CheckResult {
    let verdict = if record.battery_life < thresholds.battery_floor_pct {
        Verdict::Raise {
            severity: Severity::Error,
            title: format!("{} low battery", vehicle.callsign()),
            description: format!(
                "Battery at {:.0}%, below the {:.0}% floor",
                record.battery_life, thresholds.battery_floor_pct
            ),
        }
    } else {
        Verdict::Clear
    };

    CheckResult {
        alert_type: AlertType::AbnormalStatus,
        verdict,
    }
}

/// A restricted-area status raises a warning; any other status clears it
pub fn check_geo_fence(vehicle: VehicleId, record: &TelemetryRecord) -> CheckResult {
    let verdict = if record.vehicle_status == VehicleStatus::ApproachingRestrictedArea {
        Verdict::Raise {
            severity: Severity::Warning,
            title: format!("{} approaching restricted area", vehicle.callsign()),
            description: "Vehicle is near a keep-out zone boundary".to_string(),
        }
    } else {
        Verdict::Clear
    };

    CheckResult {
        alert_type: AlertType::GeoFence,
        verdict,
    }
}

/// Pairwise proximity below the ceiling raises a warning on the first
/// vehicle of the pair; at or above it clears (strict `<` comparison)
pub fn check_proximity(
    vehicle: VehicleId,
    other: VehicleId,
    position: &Position,
    other_position: &Position,
    thresholds: &AlertThresholds,
) -> CheckResult {
    let distance = distance_feet(position, other_position);
    let verdict = if distance < thresholds.proximity_ceiling_ft {
        Verdict::Raise {
            severity: Severity::Warning,
            title: format!("{} near {}", vehicle.callsign(), other.callsign()),
            description: format!(
                "Vehicles are {:.0} ft apart, inside the {:.0} ft ceiling",
                distance, thresholds.proximity_ceiling_ft
            ),
        }
    } else {
        Verdict::Clear
    };

    CheckResult {
        alert_type: AlertType::Proximity(other),
        verdict,
    }
}
