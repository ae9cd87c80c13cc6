//! Monitoring entry point
//!
//! One evaluation pass over a telemetry snapshot: the four single-vehicle
//! checkers in fixed order for each tracked vehicle, then directional
//! pairwise proximity. Invoked once per telemetry tick; the caller
//! serializes passes.

use crate::checks::{self, CheckResult, Verdict};
use crate::config::AlertThresholds;
use crate::dispatcher::AlertDispatcher;
use crate::notify::NotificationSink;
use crate::types::AlertKey;
use std::sync::Arc;
use std::time::Instant;
use telemetry::{TelemetrySnapshot, VehicleId};

/// Ordered vehicle pairs checked for proximity
///
/// Each pair is evaluated in one direction only; the reverse key is never
/// populated. Distance is symmetric, so the direction is arbitrary but must
/// stay fixed.
const PROXIMITY_PAIRS: [(VehicleId, VehicleId); 3] = [
    (VehicleId::Eru, VehicleId::Mea),
    (VehicleId::Eru, VehicleId::Mra),
    (VehicleId::Mea, VehicleId::Mra),
];

/// Evaluates telemetry snapshots and drives the dispatcher
pub struct AlertMonitor {
    thresholds: AlertThresholds,
    dispatcher: AlertDispatcher,
}

impl AlertMonitor {
    pub fn new(thresholds: AlertThresholds, sink: Arc<dyn NotificationSink>) -> Self {
        let dispatcher = AlertDispatcher::new(thresholds.debounce(), sink);
        Self {
            thresholds,
            dispatcher,
        }
    }

    /// Run one evaluation pass; an absent snapshot returns immediately with
    /// no side effects, preserving prior alert state
    pub fn check_alerts(&mut self, snapshot: Option<&TelemetrySnapshot>) {
        self.check_alerts_at(snapshot, Instant::now());
    }

    /// Evaluation pass with an explicit clock, for deterministic tests
    pub fn check_alerts_at(&mut self, snapshot: Option<&TelemetrySnapshot>, now: Instant) {
        let Some(snapshot) = snapshot else {
            return;
        };

        for (vehicle, record) in snapshot.iter() {
            // Fixed order: signal, connection, battery, geo-fence. Signal
            // and connection both write the signal_strength type; the later
            // verdict wins within one pass.
            self.route(vehicle, checks::check_signal_strength(vehicle, record, &self.thresholds), now);
            for result in checks::check_connection(vehicle, record) {
                self.route(vehicle, result, now);
            }
            self.route(vehicle, checks::check_battery(vehicle, record, &self.thresholds), now);
            self.route(vehicle, checks::check_geo_fence(vehicle, record), now);
        }

        for (vehicle, other) in PROXIMITY_PAIRS {
            // A missing fix on either side skips the pair entirely; no
            // implicit clear.
            let (Some(position), Some(other_position)) =
                (snapshot.position_of(vehicle), snapshot.position_of(other))
            else {
                continue;
            };
            self.route(
                vehicle,
                checks::check_proximity(vehicle, other, &position, &other_position, &self.thresholds),
                now,
            );
        }
    }

    fn route(&mut self, vehicle: VehicleId, result: CheckResult, now: Instant) {
        match result.verdict {
            Verdict::Raise {
                severity,
                title,
                description,
            } => {
                self.dispatcher
                    .emit(vehicle, result.alert_type, severity, title, description, now);
            }
            Verdict::Clear => self.dispatcher.clear(vehicle, result.alert_type),
        }
    }

    /// Currently active alert keys
    pub fn active_alerts(&self) -> Vec<AlertKey> {
        self.dispatcher.active_keys()
    }

    /// Dismiss every active alert and empty the store; used on session reset
    pub fn clear_all_alerts(&mut self) {
        self.dispatcher.clear_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{Notification, RecordingSink};
    use crate::types::{AlertType, Severity};
    use std::time::Duration;
    use telemetry::{Position, TelemetryRecord, VehicleStatus};

    fn monitor_with_sink() -> (AlertMonitor, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::new());
        let monitor = AlertMonitor::new(AlertThresholds::default(), sink.clone());
        (monitor, sink)
    }

    fn nominal(position: Option<Position>) -> TelemetryRecord {
        TelemetryRecord {
            signal_strength: -50.0,
            vehicle_status: VehicleStatus::Connected,
            battery_life: 90.0,
            current_position: position,
            ..Default::default()
        }
    }

    fn publishes(events: &[Notification]) -> Vec<&Notification> {
        events
            .iter()
            .filter(|e| matches!(e, Notification::Publish { .. }))
            .collect()
    }

    #[test]
    fn test_absent_snapshot_preserves_state() {
        let (mut monitor, sink) = monitor_with_sink();

        let mut snapshot = TelemetrySnapshot::default();
        let mut record = nominal(None);
        record.battery_life = 10.0;
        snapshot.insert(VehicleId::Eru, record);
        monitor.check_alerts(Some(&snapshot));

        let active_before = monitor.active_alerts();
        let events_before = sink.events().len();

        monitor.check_alerts(None);

        assert_eq!(monitor.active_alerts(), active_before);
        assert_eq!(sink.events().len(), events_before);
    }

    #[test]
    fn test_low_battery_scenario() {
        // ERU at 15% battery, MEA healthy ~364 ft away: exactly one error
        // publish for the battery, no proximity warning, nothing else.
        let (mut monitor, sink) = monitor_with_sink();

        let mut snapshot = TelemetrySnapshot::default();
        let mut eru = nominal(Some(Position::new(0.0, 0.0)));
        eru.battery_life = 15.0;
        snapshot.insert(VehicleId::Eru, eru);
        snapshot.insert(VehicleId::Mea, nominal(Some(Position::new(0.0, 0.001))));

        monitor.check_alerts(Some(&snapshot));

        let events = sink.events();
        let published = publishes(&events);
        assert_eq!(published.len(), 1);
        match published[0] {
            Notification::Publish { id, severity, .. } => {
                assert_eq!(id, "eru:abnormal_status");
                assert_eq!(*severity, Severity::Error);
            }
            _ => unreachable!(),
        }
        assert_eq!(
            monitor.active_alerts(),
            vec![AlertKey::new(VehicleId::Eru, AlertType::AbnormalStatus)]
        );
    }

    #[test]
    fn test_debounce_across_passes() {
        let (mut monitor, sink) = monitor_with_sink();
        let base = Instant::now();

        let mut snapshot = TelemetrySnapshot::default();
        let mut record = nominal(None);
        record.battery_life = 10.0;
        snapshot.insert(VehicleId::Eru, record);

        monitor.check_alerts_at(Some(&snapshot), base);
        monitor.check_alerts_at(Some(&snapshot), base + Duration::from_millis(1500));
        assert_eq!(publishes(&sink.events()).len(), 1);

        monitor.check_alerts_at(Some(&snapshot), base + Duration::from_millis(3100));
        assert_eq!(publishes(&sink.events()).len(), 2);
    }

    #[test]
    fn test_recovery_dismisses_alert() {
        let (mut monitor, sink) = monitor_with_sink();

        let mut snapshot = TelemetrySnapshot::default();
        let mut record = nominal(None);
        record.battery_life = 10.0;
        snapshot.insert(VehicleId::Eru, record);
        monitor.check_alerts(Some(&snapshot));
        assert_eq!(monitor.active_alerts().len(), 1);

        snapshot.insert(VehicleId::Eru, nominal(None));
        monitor.check_alerts(Some(&snapshot));
        assert!(monitor.active_alerts().is_empty());

        let dismissals: Vec<_> = sink
            .events()
            .into_iter()
            .filter(|e| matches!(e, Notification::Dismiss { .. }))
            .collect();
        assert_eq!(
            dismissals,
            vec![Notification::Dismiss {
                id: "eru:abnormal_status".into()
            }]
        );

        // A further healthy pass publishes nothing new
        monitor.check_alerts(Some(&snapshot));
        assert_eq!(
            sink.events()
                .iter()
                .filter(|e| matches!(e, Notification::Dismiss { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn test_proximity_is_directional() {
        let (mut monitor, sink) = monitor_with_sink();

        let mut snapshot = TelemetrySnapshot::default();
        snapshot.insert(VehicleId::Eru, nominal(Some(Position::new(0.0, 0.0))));
        // ~73 ft apart
        snapshot.insert(VehicleId::Mea, nominal(Some(Position::new(0.0, 0.0002))));

        monitor.check_alerts(Some(&snapshot));

        assert_eq!(
            monitor.active_alerts(),
            vec![AlertKey::new(
                VehicleId::Eru,
                AlertType::Proximity(VehicleId::Mea)
            )]
        );
        let events = sink.events();
        let published = publishes(&events);
        assert_eq!(published.len(), 1);
        match published[0] {
            Notification::Publish { id, .. } => assert_eq!(id, "eru:proximity_mea"),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_missing_position_skips_pair() {
        let (mut monitor, _sink) = monitor_with_sink();

        let mut snapshot = TelemetrySnapshot::default();
        snapshot.insert(VehicleId::Eru, nominal(Some(Position::new(0.0, 0.0))));
        snapshot.insert(VehicleId::Mea, nominal(Some(Position::new(0.0, 0.0002))));
        monitor.check_alerts(Some(&snapshot));
        assert_eq!(monitor.active_alerts().len(), 1);

        // MEA loses its fix: the pair is skipped, the alert stays active
        snapshot.insert(VehicleId::Mea, nominal(None));
        monitor.check_alerts(Some(&snapshot));
        assert_eq!(
            monitor.active_alerts(),
            vec![AlertKey::new(
                VehicleId::Eru,
                AlertType::Proximity(VehicleId::Mea)
            )]
        );
    }

    #[test]
    fn test_bad_connection_raises_signal_alert() {
        // The connection checker runs after the signal checker and wins the
        // signal_strength type for this pass.
        let (mut monitor, _sink) = monitor_with_sink();

        let mut snapshot = TelemetrySnapshot::default();
        let mut record = nominal(None);
        record.vehicle_status = VehicleStatus::BadConnection;
        snapshot.insert(VehicleId::Eru, record);

        monitor.check_alerts(Some(&snapshot));
        assert_eq!(
            monitor.active_alerts(),
            vec![AlertKey::new(VehicleId::Eru, AlertType::SignalStrength)]
        );
    }

    #[test]
    fn test_disconnected_raises_heartbeat_timeout() {
        let (mut monitor, _sink) = monitor_with_sink();

        let mut snapshot = TelemetrySnapshot::default();
        let mut record = nominal(None);
        record.vehicle_status = VehicleStatus::Disconnected;
        snapshot.insert(VehicleId::Mra, record);

        monitor.check_alerts(Some(&snapshot));
        assert_eq!(
            monitor.active_alerts(),
            vec![AlertKey::new(VehicleId::Mra, AlertType::HeartbeatTimeout)]
        );

        // Reconnection clears it
        snapshot.insert(VehicleId::Mra, nominal(None));
        monitor.check_alerts(Some(&snapshot));
        assert!(monitor.active_alerts().is_empty());
    }

    #[test]
    fn test_clear_all_dismisses_every_key() {
        let (mut monitor, sink) = monitor_with_sink();

        let mut snapshot = TelemetrySnapshot::default();
        let mut eru = nominal(Some(Position::new(0.0, 0.0)));
        eru.battery_life = 10.0;
        snapshot.insert(VehicleId::Eru, eru);
        snapshot.insert(VehicleId::Mea, nominal(Some(Position::new(0.0, 0.0002))));
        monitor.check_alerts(Some(&snapshot));

        let active = monitor.active_alerts();
        assert_eq!(active.len(), 2);
        sink.take();

        monitor.clear_all_alerts();

        let events = sink.events();
        let dismissed: Vec<String> = events
            .iter()
            .filter_map(|e| match e {
                Notification::Dismiss { id } => Some(id.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(dismissed.len(), active.len());
        for key in &active {
            assert!(dismissed.contains(&key.to_string()));
        }
        assert_eq!(events.last(), Some(&Notification::DismissAll));
        assert!(monitor.active_alerts().is_empty());
    }
}
