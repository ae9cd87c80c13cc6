//! Notification channel
//!
//! Outbound alert events consumed by the display layer. Publishing is
//! fire-and-forget: the pipeline never waits for acknowledgment and a
//! closed channel drops events without surfacing a failure.

use crate::types::Severity;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use tokio::sync::mpsc;
use tracing::debug;

/// One event on the notification channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Notification {
    /// Create the toast identified by `id`, or update it in place if the
    /// display layer already shows one with that id
    Publish {
        id: String,
        #[serde(rename = "type")]
        severity: Severity,
        title: String,
        description: String,
    },
    /// Dismiss the toast identified by `id`
    Dismiss { id: String },
    /// Dismiss every active toast
    DismissAll,
}

/// Outbound sink for notification events
pub trait NotificationSink: Send + Sync {
    /// Publish one event; best-effort, never blocks
    fn publish(&self, event: Notification);
}

/// Sink backed by an unbounded channel to the display bridge
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelSink {
    /// Create a sink and the receiver the display bridge drains
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl NotificationSink for ChannelSink {
    fn publish(&self, event: Notification) {
        if self.tx.send(event).is_err() {
            debug!("notification channel closed, event dropped");
        }
    }
}

/// Sink that records events in memory, for tests
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<Notification>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything published so far
    pub fn events(&self) -> Vec<Notification> {
        self.events.lock().unwrap().clone()
    }

    /// Drain recorded events
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }
}

impl NotificationSink for RecordingSink {
    fn publish(&self, event: Notification) {
        self.events.lock().unwrap().push(event);
    }
}
