//! Shared snapshot store

use telemetry::{TelemetryRecord, TelemetrySnapshot, VehicleId, VehicleStatus};
use tokio::sync::RwLock;

/// Latest-state store for all monitored vehicles
///
/// Written by the ingest pipeline, read by the query surface. Resets empty
/// on restart; nothing is persisted.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    inner: RwLock<TelemetrySnapshot>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone of the current snapshot
    pub async fn snapshot(&self) -> TelemetrySnapshot {
        self.inner.read().await.clone()
    }

    /// Store the latest record for a vehicle
    pub async fn insert(&self, vehicle: VehicleId, record: TelemetryRecord) {
        self.inner.write().await.insert(vehicle, record);
    }

    /// Rewrite a vehicle's status in place
    ///
    /// Returns false when the vehicle has no record yet.
    pub async fn set_status(&self, vehicle: VehicleId, status: VehicleStatus) -> bool {
        let mut snapshot = self.inner.write().await;
        match snapshot.record_mut(vehicle) {
            Some(record) => {
                record.vehicle_status = status;
                true
            }
            None => false,
        }
    }
}
