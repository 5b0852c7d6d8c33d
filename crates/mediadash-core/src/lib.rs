//! Domain types and configuration shared by every `mediadash` crate.
//!
//! Holds the canonical engagement [`Record`] shape, the [`Dataset`] wrapper,
//! the immutable [`FilterSpec`] value object, YAML filter presets, and the
//! environment-driven [`AppConfig`].

pub mod app_config;
pub mod config;
pub mod filter_spec;
pub mod preset;
pub mod record;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use filter_spec::FilterSpec;
pub use preset::FilterPreset;
pub use record::{CanonicalField, Dataset, Record, Sentiment};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("unknown sentiment '{0}'; expected positive, negative, or neutral")]
    UnknownSentiment(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read filter preset {path}: {source}")]
    PresetIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse filter preset: {0}")]
    PresetParse(#[source] serde_yaml::Error),

    #[error("filter preset validation failed: {0}")]
    Validation(String),
}
