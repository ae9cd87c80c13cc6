//! Telemetry Intake Pipeline
//!
//! Consumes raw frames from the transport bridge, derives vehicle status
//! from link quality, keep-out zones, and heartbeat liveness, updates the
//! shared snapshot, and runs one alert evaluation pass per update tick.

mod processor;
mod store;

pub use processor::{ConnectionStatus, IngestConfig, IngestError, TelemetryPipeline};
pub use store::SnapshotStore;
