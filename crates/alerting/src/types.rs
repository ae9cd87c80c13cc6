//! Alert identity and severity

use serde::{Deserialize, Serialize};
use std::fmt;
use telemetry::VehicleId;

/// Notification severity, as rendered by the display layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        f.write_str(s)
    }
}

/// The kind of condition an alert reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AlertType {
    SignalStrength,
    HeartbeatTimeout,
    AbnormalStatus,
    GeoFence,
    /// Too close to another vehicle
    Proximity(VehicleId),
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertType::SignalStrength => f.write_str("signal_strength"),
            AlertType::HeartbeatTimeout => f.write_str("heartbeat_timeout"),
            AlertType::AbnormalStatus => f.write_str("abnormal_status"),
            AlertType::GeoFence => f.write_str("geo_fence"),
            AlertType::Proximity(other) => write!(f, "proximity_{other}"),
        }
    }
}

/// Identity of one logical alert and its notification
///
/// Rendered as `<vehicle>:<type>`; the display layer treats a repeated
/// publish with the same id as an in-place update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AlertKey {
    pub vehicle: VehicleId,
    pub alert_type: AlertType,
}

impl AlertKey {
    pub fn new(vehicle: VehicleId, alert_type: AlertType) -> Self {
        Self {
            vehicle,
            alert_type,
        }
    }
}

impl fmt::Display for AlertKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.vehicle, self.alert_type)
    }
}
