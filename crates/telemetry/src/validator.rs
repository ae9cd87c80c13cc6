//! Telemetry range validation

use crate::types::TelemetryRecord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors during telemetry validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Value out of allowed range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Signal strength valid range (dBm)
    pub signal_range: (f64, f64),
    /// Battery life valid range (%)
    pub battery_range: (f64, f64),
    /// Latitude valid range (degrees)
    pub latitude_range: (f64, f64),
    /// Longitude valid range (degrees)
    pub longitude_range: (f64, f64),
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            signal_range: (-120.0, 0.0),
            battery_range: (0.0, 100.0),
            latitude_range: (-90.0, 90.0),
            longitude_range: (-180.0, 180.0),
        }
    }
}

/// Result of validating one record
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether all checked fields are valid
    pub valid: bool,
    /// List of validation errors
    pub errors: Vec<ValidationError>,
    /// Number of fields validated
    pub fields_checked: usize,
}

/// Range validator for inbound telemetry records
pub struct TelemetryValidator {
    config: ValidationConfig,
}

impl TelemetryValidator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a single value against a range
    fn validate_range(
        &self,
        field: &'static str,
        value: f64,
        range: (f64, f64),
    ) -> Result<(), ValidationError> {
        if value < range.0 || value > range.1 {
            Err(ValidationError::OutOfRange {
                field,
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(())
        }
    }

    /// Validate all checked fields of a record
    ///
    /// Position is only validated when a fix is present; an absent fix is
    /// not an error.
    pub fn validate(&self, record: &TelemetryRecord) -> ValidationResult {
        let mut errors = Vec::new();
        let mut fields_checked = 2;

        if let Err(e) =
            self.validate_range("signal_strength", record.signal_strength, self.config.signal_range)
        {
            errors.push(e);
        }
        if let Err(e) =
            self.validate_range("battery_life", record.battery_life, self.config.battery_range)
        {
            errors.push(e);
        }
        if let Some(position) = record.current_position {
            fields_checked += 2;
            if let Err(e) =
                self.validate_range("latitude", position.latitude, self.config.latitude_range)
            {
                errors.push(e);
            }
            if let Err(e) =
                self.validate_range("longitude", position.longitude, self.config.longitude_range)
            {
                errors.push(e);
            }
        }

        ValidationResult {
            valid: errors.is_empty(),
            errors,
            fields_checked,
        }
    }
}

impl Default for TelemetryValidator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}
