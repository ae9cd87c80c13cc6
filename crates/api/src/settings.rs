//! Application settings
//!
//! Defaults layered under an optional `gcs-monitor` config file and
//! `GCS_*` environment variables.

use alerting::AlertThresholds;
use config::{Config, ConfigError, Environment, File};
use ingest::IngestConfig;
use serde::{Deserialize, Serialize};

/// Top-level settings for the pipeline binary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Address the query surface listens on
    pub listen_addr: String,
    /// Alert thresholds and debounce window
    pub thresholds: AlertThresholds,
    /// Ingest and heartbeat tuning
    pub ingest: IngestConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            thresholds: AlertThresholds::default(),
            ingest: IngestConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings, layering file and environment over the defaults
    ///
    /// `GCS_THRESHOLDS__BATTERY_FLOOR_PCT=25` style variables override
    /// nested fields.
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("gcs-monitor").required(false))
            .add_source(Environment::with_prefix("GCS").separator("__"))
            .build()?
            .try_deserialize()
    }
}
