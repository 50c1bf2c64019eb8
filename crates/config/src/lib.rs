//! Configuration management for the conversational widget
//!
//! Supports loading configuration from:
//! - TOML files
//! - Environment variables (SHOPVOICE_ prefix)
//!
//! Three deploy-time values drive the gateway: endpoint URL, access key,
//! and shop identifier. Absence of the endpoint URL is the sole trigger
//! for mock mode.

pub mod personas;
pub mod settings;

pub use personas::PersonaCatalog;
pub use settings::{
    load_settings, GatewaySettings, Settings, SpeechSettings, WidgetSettings,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration file not found: {0}")]
    FileNotFound(String),

    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl From<ConfigError> for shopvoice_core::Error {
    fn from(err: ConfigError) -> Self {
        shopvoice_core::Error::Configuration(err.to_string())
    }
}
