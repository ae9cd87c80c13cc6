//! Alert dispatcher
//!
//! Applies the debounce policy and publishes notification events keyed by
//! alert identity, so a repeated publish updates the same toast in place.

use crate::dedup::DedupStore;
use crate::notify::{Notification, NotificationSink};
use crate::types::{AlertKey, AlertType, Severity};
use std::sync::Arc;
use std::time::{Duration, Instant};
use telemetry::VehicleId;
use tracing::{debug, info};

/// Emits and clears alerts through the notification sink
pub struct AlertDispatcher {
    store: DedupStore,
    sink: Arc<dyn NotificationSink>,
}

impl AlertDispatcher {
    pub fn new(debounce: Duration, sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            store: DedupStore::new(debounce),
            sink,
        }
    }

    /// Emit or refresh an alert
    ///
    /// Inside the debounce window the call is silently suppressed; this is
    /// the anti-spam policy, not a failure.
    pub fn emit(
        &mut self,
        vehicle: VehicleId,
        alert_type: AlertType,
        severity: Severity,
        title: String,
        description: String,
        now: Instant,
    ) {
        let key = AlertKey::new(vehicle, alert_type);
        if !self.store.should_emit(&key, now) {
            debug!(key = %key, "alert suppressed by debounce");
            return;
        }

        self.store.record_emit(key, now);
        info!(key = %key, severity = %severity, "alert published");
        self.sink.publish(Notification::Publish {
            id: key.to_string(),
            severity,
            title,
            description,
        });
    }

    /// Clear an alert if active; absent keys are a no-op
    pub fn clear(&mut self, vehicle: VehicleId, alert_type: AlertType) {
        let key = AlertKey::new(vehicle, alert_type);
        if self.store.clear(&key) {
            info!(key = %key, "alert cleared");
            self.sink.publish(Notification::Dismiss {
                id: key.to_string(),
            });
        }
    }

    /// Dismiss every active alert and empty the store
    ///
    /// Publishes one dismiss per active key, then a dismiss-all broadcast
    /// for the display layer's session reset.
    pub fn clear_all(&mut self) {
        for key in self.store.keys() {
            self.sink.publish(Notification::Dismiss {
                id: key.to_string(),
            });
        }
        self.store.clear_all();
        self.sink.publish(Notification::DismissAll);
    }

    /// Currently active alert keys
    pub fn active_keys(&self) -> Vec<AlertKey> {
        self.store.keys()
    }
}
