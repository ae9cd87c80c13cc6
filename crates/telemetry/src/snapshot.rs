//! Telemetry snapshot across all monitored vehicles

use crate::types::{Position, TelemetryRecord, VehicleId};
use serde::{Deserialize, Serialize};

/// Full current state of all monitored vehicles at one evaluation tick
///
/// A slot is `None` until the first frame for that vehicle arrives. Field
/// names match the legacy uppercase wire format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    #[serde(rename = "ERU", default)]
    pub eru: Option<TelemetryRecord>,
    #[serde(rename = "MEA", default)]
    pub mea: Option<TelemetryRecord>,
    #[serde(rename = "MRA", default)]
    pub mra: Option<TelemetryRecord>,
}

impl TelemetrySnapshot {
    /// Latest record for a vehicle, if any
    pub fn get(&self, vehicle: VehicleId) -> Option<&TelemetryRecord> {
        self.slot(vehicle).as_ref()
    }

    /// Mutable access to a vehicle's record, if any
    pub fn record_mut(&mut self, vehicle: VehicleId) -> Option<&mut TelemetryRecord> {
        self.slot_mut(vehicle).as_mut()
    }

    /// Store the latest record for a vehicle
    pub fn insert(&mut self, vehicle: VehicleId, record: TelemetryRecord) {
        *self.slot_mut(vehicle) = Some(record);
    }

    /// Iterate over vehicles with a present record, in evaluation order
    pub fn iter(&self) -> impl Iterator<Item = (VehicleId, &TelemetryRecord)> {
        VehicleId::ALL
            .iter()
            .filter_map(|&vehicle| self.get(vehicle).map(|record| (vehicle, record)))
    }

    /// Known position of a vehicle, if its record and fix are present
    pub fn position_of(&self, vehicle: VehicleId) -> Option<Position> {
        self.get(vehicle).and_then(|record| record.current_position)
    }

    fn slot(&self, vehicle: VehicleId) -> &Option<TelemetryRecord> {
        match vehicle {
            VehicleId::Eru => &self.eru,
            VehicleId::Mea => &self.mea,
            VehicleId::Mra => &self.mra,
        }
    }

    fn slot_mut(&mut self, vehicle: VehicleId) -> &mut Option<TelemetryRecord> {
        match vehicle {
            VehicleId::Eru => &mut self.eru,
            VehicleId::Mea => &mut self.mea,
            VehicleId::Mra => &mut self.mra,
        }
    }
}
