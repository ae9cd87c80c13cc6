//! Telemetry Alerting
//!
//! The alert-monitoring core: evaluates telemetry snapshots against
//! thresholds, deduplicates alerts with a debounce window, and publishes
//! create/dismiss notifications consumed by the display layer.

mod checks;
mod config;
mod dedup;
mod dispatcher;
mod monitor;
mod notify;
mod types;

pub use checks::{
    check_battery, check_connection, check_geo_fence, check_proximity, check_signal_strength,
    CheckResult, Verdict,
};
pub use config::AlertThresholds;
pub use dedup::DedupStore;
pub use dispatcher::AlertDispatcher;
pub use monitor::AlertMonitor;
pub use notify::{ChannelSink, Notification, NotificationSink, RecordingSink};
pub use types::{AlertKey, AlertType, Severity};
