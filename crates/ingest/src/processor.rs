//! Telemetry processing pipeline

use crate::store::SnapshotStore;
use alerting::{AlertKey, AlertMonitor, AlertThresholds, NotificationSink};
use geo::{ZoneRegistry, ZoneUpload, DEFAULT_ZONE_THRESHOLD_FT};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use telemetry::{
    HeartbeatRegistry, TelemetryFrame, TelemetryRecord, TelemetrySnapshot, TelemetryValidator,
    VehicleId, VehicleStatus,
};
use thiserror::Error;
use tokio::sync::{mpsc, Mutex, RwLock};
use tokio::time::interval;
use tracing::{error, info, warn};

/// Ingest configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Silence tolerated before a vehicle is marked disconnected (ms)
    pub heartbeat_timeout_ms: u64,
    /// Interval between heartbeat sweeps (ms)
    pub heartbeat_check_interval_ms: u64,
    /// Keep-out-zone proximity threshold (ft)
    pub zone_threshold_ft: f64,
    /// Consecutive undecodable frames tolerated before the intake closes
    pub max_decode_failures: u32,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            heartbeat_timeout_ms: 10_000,
            heartbeat_check_interval_ms: 1_000,
            zone_threshold_ft: DEFAULT_ZONE_THRESHOLD_FT,
            max_decode_failures: 3,
        }
    }
}

/// Errors during telemetry intake
#[derive(Debug, Error)]
pub enum IngestError {
    /// Payload was not a valid telemetry frame
    #[error("failed to decode telemetry frame: {0}")]
    Decode(#[from] serde_json::Error),

    /// The intake gave up after repeated undecodable frames
    #[error("{count} consecutive undecodable frames, closing the intake")]
    TooManyFailures { count: u32 },
}

/// Connection summary for one vehicle, as reported by the query surface
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionStatus {
    pub vehicle_id: VehicleId,
    pub is_connected: bool,
    pub consecutive_failures: u32,
    /// Milliseconds since the last frame from this vehicle
    pub last_seen_ms: u64,
}

/// The ingest pipeline: frame intake, status derivation, snapshot updates,
/// heartbeat sweeps, and alert evaluation ticks
///
/// One task owns the run loop, so evaluation passes are serialized even
/// though queries read the shared state concurrently.
pub struct TelemetryPipeline {
    config: IngestConfig,
    thresholds: AlertThresholds,
    store: SnapshotStore,
    zones: RwLock<ZoneRegistry>,
    heartbeats: Mutex<HeartbeatRegistry>,
    validator: TelemetryValidator,
    monitor: Mutex<AlertMonitor>,
}

impl TelemetryPipeline {
    pub fn new(
        config: IngestConfig,
        thresholds: AlertThresholds,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        let heartbeats =
            HeartbeatRegistry::new(Duration::from_millis(config.heartbeat_timeout_ms));
        let monitor = AlertMonitor::new(thresholds.clone(), sink);
        Self {
            config,
            thresholds,
            store: SnapshotStore::new(),
            zones: RwLock::new(ZoneRegistry::new()),
            heartbeats: Mutex::new(heartbeats),
            validator: TelemetryValidator::default(),
            monitor: Mutex::new(monitor),
        }
    }

    /// Clone of the current telemetry snapshot
    pub async fn snapshot(&self) -> TelemetrySnapshot {
        self.store.snapshot().await
    }

    /// Replace the keep-out zones; returns the number of polygons stored
    pub async fn update_zones(&self, uploads: Vec<ZoneUpload>) -> usize {
        self.zones.write().await.replace_all(uploads)
    }

    /// Currently active alert keys
    pub async fn active_alerts(&self) -> Vec<AlertKey> {
        self.monitor.lock().await.active_alerts()
    }

    /// Dismiss every active alert; used on session reset
    pub async fn clear_all_alerts(&self) {
        self.monitor.lock().await.clear_all_alerts();
    }

    /// Per-vehicle connection summaries
    pub async fn connection_status(&self) -> Vec<ConnectionStatus> {
        let heartbeats = self.heartbeats.lock().await;
        let mut summaries: Vec<ConnectionStatus> = heartbeats
            .iter()
            .map(|(vehicle, heartbeat)| ConnectionStatus {
                vehicle_id: vehicle,
                is_connected: heartbeat.is_connected
                    && heartbeat.last_seen.elapsed() <= heartbeats.timeout(),
                consecutive_failures: heartbeat.consecutive_failures,
                last_seen_ms: heartbeat.last_seen.elapsed().as_millis() as u64,
            })
            .collect();
        summaries.sort_by_key(|s| s.vehicle_id);
        summaries
    }

    /// Decode one raw payload and apply it
    pub async fn handle_frame(&self, payload: &[u8]) -> Result<(), IngestError> {
        let frame: TelemetryFrame = serde_json::from_slice(payload)?;
        self.apply_frame(frame).await;
        Ok(())
    }

    /// Apply one decoded frame: validate, derive status, store, evaluate
    pub async fn apply_frame(&self, frame: TelemetryFrame) {
        let TelemetryFrame {
            vehicle_id,
            mut record,
        } = frame;

        let result = self.validator.validate(&record);
        if !result.valid {
            warn!(
                vehicle = %vehicle_id,
                errors = ?result.errors,
                "dropped out-of-range telemetry frame"
            );
            return;
        }

        let alive = {
            let mut heartbeats = self.heartbeats.lock().await;
            heartbeats.touch(vehicle_id);
            heartbeats.is_connected(vehicle_id)
        };

        record.vehicle_status = self.derive_status(vehicle_id, &record, alive).await;

        self.store.insert(vehicle_id, record).await;
        self.tick().await;
    }

    /// Rewrite the reported status from link quality, keep-out zones, and
    /// heartbeat liveness
    async fn derive_status(
        &self,
        vehicle: VehicleId,
        record: &TelemetryRecord,
        alive: bool,
    ) -> VehicleStatus {
        let mut status = record.vehicle_status;

        if record.signal_strength < self.thresholds.signal_floor_dbm {
            status = VehicleStatus::BadConnection;
        }

        if let Some(position) = record.current_position {
            let zones = self.zones.read().await;
            if zones.is_near_keep_out_zone(vehicle, &position, self.config.zone_threshold_ft) {
                status = VehicleStatus::ApproachingRestrictedArea;
            }
        }

        // A vehicle that is actually sending frames is connected unless a
        // more specific status took over above
        if matches!(status, VehicleStatus::Standby | VehicleStatus::Disconnected) && alive {
            status = VehicleStatus::Connected;
        }

        status
    }

    /// Mark silent vehicles disconnected and re-evaluate alerts
    pub async fn sweep_heartbeats(&self) {
        let silent = self.heartbeats.lock().await.sweep();
        if silent.is_empty() {
            return;
        }

        for vehicle in silent {
            self.store
                .set_status(vehicle, VehicleStatus::Disconnected)
                .await;
        }
        self.tick().await;
    }

    /// One alert evaluation pass over the current snapshot
    async fn tick(&self) {
        let snapshot = self.store.snapshot().await;
        self.monitor.lock().await.check_alerts(Some(&snapshot));
    }

    /// Consume frames until the channel closes
    ///
    /// The heartbeat sweep shares this loop, so evaluation passes never
    /// overlap.
    pub async fn run(
        self: Arc<Self>,
        mut frames: mpsc::Receiver<Vec<u8>>,
    ) -> Result<(), IngestError> {
        let mut sweep = interval(Duration::from_millis(self.config.heartbeat_check_interval_ms));
        let mut failures = 0u32;

        loop {
            tokio::select! {
                maybe = frames.recv() => {
                    let Some(payload) = maybe else {
                        info!("telemetry intake closed");
                        return Ok(());
                    };
                    match self.handle_frame(&payload).await {
                        Ok(()) => failures = 0,
                        Err(e) => {
                            failures += 1;
                            warn!(attempt = failures, error = %e, "undecodable telemetry frame");
                            if failures >= self.config.max_decode_failures {
                                error!(count = failures, "closing telemetry intake");
                                return Err(IngestError::TooManyFailures { count: failures });
                            }
                        }
                    }
                }
                _ = sweep.tick() => {
                    self.sweep_heartbeats().await;
                }
            }
        }
    }
}
