//! Vehicle Telemetry Model
//!
//! Vehicle identifiers, status variants, telemetry records and snapshots,
//! range validation, and heartbeat tracking for the ground station.

mod heartbeat;
mod snapshot;
mod types;
mod validator;

pub use heartbeat::{Heartbeat, HeartbeatRegistry};
pub use snapshot::TelemetrySnapshot;
pub use types::{Position, TelemetryFrame, TelemetryRecord, VehicleId, VehicleStatus};
pub use validator::{TelemetryValidator, ValidationConfig, ValidationError, ValidationResult};
