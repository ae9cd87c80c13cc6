//! Vehicle heartbeat tracking
//!
//! Tracks when each vehicle was last heard from, so the pipeline can mark
//! silent vehicles as disconnected and flip them back on reconnection.

use crate::types::VehicleId;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::info;

/// Liveness state for one vehicle
#[derive(Debug, Clone)]
pub struct Heartbeat {
    /// When the last frame arrived
    pub last_seen: Instant,
    /// Whether the vehicle is currently considered connected
    pub is_connected: bool,
    /// Timeouts observed since the last successful frame
    pub consecutive_failures: u32,
}

impl Heartbeat {
    fn new() -> Self {
        Self {
            last_seen: Instant::now(),
            is_connected: true,
            consecutive_failures: 0,
        }
    }

    fn update(&mut self) {
        self.last_seen = Instant::now();
        self.is_connected = true;
        self.consecutive_failures = 0;
    }

    fn is_timeout(&self, timeout: Duration) -> bool {
        self.last_seen.elapsed() > timeout
    }

    fn mark_disconnected(&mut self) {
        self.is_connected = false;
        self.consecutive_failures += 1;
    }
}

/// Heartbeat registry for all monitored vehicles
#[derive(Debug)]
pub struct HeartbeatRegistry {
    timeout: Duration,
    vehicles: HashMap<VehicleId, Heartbeat>,
}

impl HeartbeatRegistry {
    /// Create a registry seeded with every monitored vehicle
    pub fn new(timeout: Duration) -> Self {
        let vehicles = VehicleId::ALL
            .iter()
            .map(|&vehicle| (vehicle, Heartbeat::new()))
            .collect();
        Self { timeout, vehicles }
    }

    /// Record a frame from a vehicle; returns true if it was reconnecting
    pub fn touch(&mut self, vehicle: VehicleId) -> bool {
        let heartbeat = self
            .vehicles
            .entry(vehicle)
            .or_insert_with(Heartbeat::new);
        let was_disconnected = !heartbeat.is_connected;
        heartbeat.update();
        if was_disconnected {
            info!(vehicle = %vehicle, "vehicle reconnected");
        }
        was_disconnected
    }

    /// Mark timed-out vehicles disconnected; returns the newly silent ones
    pub fn sweep(&mut self) -> Vec<VehicleId> {
        let timeout = self.timeout;
        let mut newly_silent = Vec::new();
        for (&vehicle, heartbeat) in self.vehicles.iter_mut() {
            if heartbeat.is_connected && heartbeat.is_timeout(timeout) {
                heartbeat.mark_disconnected();
                info!(
                    vehicle = %vehicle,
                    timeout_secs = timeout.as_secs(),
                    "vehicle heartbeat timeout"
                );
                newly_silent.push(vehicle);
            }
        }
        newly_silent.sort();
        newly_silent
    }

    /// Whether a vehicle is currently connected and within its timeout
    pub fn is_connected(&self, vehicle: VehicleId) -> bool {
        self.vehicles
            .get(&vehicle)
            .map(|h| h.is_connected && !h.is_timeout(self.timeout))
            .unwrap_or(false)
    }

    /// Iterate over per-vehicle heartbeat state
    pub fn iter(&self) -> impl Iterator<Item = (VehicleId, &Heartbeat)> {
        self.vehicles.iter().map(|(&vehicle, h)| (vehicle, h))
    }

    /// Configured heartbeat timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touch_resets_failures() {
        let mut registry = HeartbeatRegistry::new(Duration::ZERO);

        let silent = registry.sweep();
        assert_eq!(silent.len(), 3);
        assert!(!registry.is_connected(VehicleId::Eru));

        let reconnected = registry.touch(VehicleId::Eru);
        assert!(reconnected);
        assert_eq!(
            registry
                .iter()
                .find(|(v, _)| *v == VehicleId::Eru)
                .unwrap()
                .1
                .consecutive_failures,
            0
        );
    }

    #[test]
    fn test_sweep_reports_each_timeout_once() {
        let mut registry = HeartbeatRegistry::new(Duration::ZERO);

        let first = registry.sweep();
        assert_eq!(first, vec![VehicleId::Eru, VehicleId::Mea, VehicleId::Mra]);

        // Already disconnected vehicles are not reported again
        let second = registry.sweep();
        assert!(second.is_empty());
    }

    #[test]
    fn test_connected_within_timeout() {
        let mut registry = HeartbeatRegistry::new(Duration::from_secs(60));
        registry.touch(VehicleId::Mea);
        assert!(registry.is_connected(VehicleId::Mea));
        assert!(registry.sweep().is_empty());
    }
}
