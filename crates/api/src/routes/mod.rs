//! Route handlers

pub mod alerts;
pub mod telemetry;
pub mod zones;
