//! Alert deduplication store

use crate::types::AlertKey;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Debounce map from alert key to last-emit time
///
/// A key's presence means the alert is currently active and was last pushed
/// to the notification channel at the stored instant. The store is owned by
/// one dispatcher; evaluation passes are serialized by the caller.
#[derive(Debug)]
pub struct DedupStore {
    debounce: Duration,
    entries: HashMap<AlertKey, Instant>,
}

impl DedupStore {
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            entries: HashMap::new(),
        }
    }

    /// True when the key was never emitted, or the debounce window has
    /// elapsed since the last emit
    pub fn should_emit(&self, key: &AlertKey, now: Instant) -> bool {
        match self.entries.get(key) {
            None => true,
            Some(&last) => now.duration_since(last) >= self.debounce,
        }
    }

    /// Record an emit. Call only immediately after a positive `should_emit`
    /// check; recording on every tick would re-debounce the key forever.
    pub fn record_emit(&mut self, key: AlertKey, now: Instant) {
        self.entries.insert(key, now);
    }

    /// Whether the key is currently active
    pub fn contains(&self, key: &AlertKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove a key; returns whether it was present. Absent keys are a no-op.
    pub fn clear(&mut self, key: &AlertKey) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Drop every entry
    pub fn clear_all(&mut self) {
        self.entries.clear();
    }

    /// Active alert keys, sorted for stable output
    pub fn keys(&self) -> Vec<AlertKey> {
        let mut keys: Vec<AlertKey> = self.entries.keys().copied().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
