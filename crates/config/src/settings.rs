//! Widget settings
//!
//! Layered loading: defaults, then an optional TOML file, then
//! SHOPVOICE_-prefixed environment variables (`SHOPVOICE_GATEWAY__SHOP`
//! maps to `gateway.shop`).

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Top-level settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Reply gateway configuration
    #[serde(default)]
    pub gateway: GatewaySettings,

    /// Speech input/output configuration
    #[serde(default)]
    pub speech: SpeechSettings,

    /// Widget defaults
    #[serde(default)]
    pub widget: WidgetSettings,
}

/// Reply gateway settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewaySettings {
    /// Live reply endpoint. Absent or empty selects mock mode; this is
    /// the sole trigger, fixed for the widget's lifetime.
    #[serde(default)]
    pub endpoint_url: Option<String>,

    /// Bearer key sent with live requests
    #[serde(default)]
    pub access_key: Option<String>,

    /// Shop identifier carried in every live request body
    #[serde(default = "default_shop")]
    pub shop: String,

    /// Live request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Artificial mock latency (milliseconds)
    #[serde(default = "default_mock_latency_ms")]
    pub mock_latency_ms: u64,
}

fn default_shop() -> String {
    "demo-shop".to_string()
}
fn default_timeout_secs() -> u64 {
    15
}
fn default_mock_latency_ms() -> u64 {
    400
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            endpoint_url: None,
            access_key: None,
            shop: default_shop(),
            request_timeout_secs: default_timeout_secs(),
            mock_latency_ms: default_mock_latency_ms(),
        }
    }
}

impl GatewaySettings {
    /// Whether the widget will run against the local simulated responder
    pub fn is_mock(&self) -> bool {
        match &self.endpoint_url {
            None => true,
            Some(url) => url.trim().is_empty(),
        }
    }
}

/// Speech settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechSettings {
    /// Voice replies at all; `false` keeps the widget text-only even on
    /// hosts with full speech capabilities
    #[serde(default = "default_true")]
    pub voice_replies: bool,
}

fn default_true() -> bool {
    true
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            voice_replies: true,
        }
    }
}

/// Widget defaults, applied when no preference has been persisted yet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetSettings {
    /// Panel open on first mount
    #[serde(default)]
    pub default_open: bool,

    /// Speech output muted on first mount
    #[serde(default)]
    pub default_muted: bool,

    /// Persona selected on first mount
    #[serde(default = "default_persona")]
    pub default_persona: String,
}

fn default_persona() -> String {
    "aria".to_string()
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            default_open: false,
            default_muted: false,
            default_persona: default_persona(),
        }
    }
}

/// Load settings from an optional TOML file plus environment overrides
pub fn load_settings(path: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    if let Some(path) = path {
        builder = builder.add_source(File::with_name(path));
    }

    let config = builder
        .add_source(
            Environment::with_prefix("SHOPVOICE")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let settings: Settings = config.try_deserialize()?;

    tracing::debug!(
        mock = settings.gateway.is_mock(),
        shop = %settings.gateway.shop,
        "settings loaded"
    );

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_select_mock_mode() {
        let settings = Settings::default();
        assert!(settings.gateway.is_mock());
        assert_eq!(settings.gateway.shop, "demo-shop");
        assert_eq!(settings.widget.default_persona, "aria");
        assert!(!settings.widget.default_open);
    }

    #[test]
    fn test_empty_endpoint_is_mock() {
        let settings = GatewaySettings {
            endpoint_url: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(settings.is_mock());

        let settings = GatewaySettings {
            endpoint_url: Some("https://replies.example.com/v1/chat".to_string()),
            ..Default::default()
        };
        assert!(!settings.is_mock());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            r#"
[gateway]
endpoint_url = "https://replies.example.com/v1/chat"
shop = "acme-audio"
mock_latency_ms = 50

[widget]
default_open = true
"#
        )
        .unwrap();

        let settings = load_settings(file.path().to_str()).unwrap();
        assert!(!settings.gateway.is_mock());
        assert_eq!(settings.gateway.shop, "acme-audio");
        assert_eq!(settings.gateway.mock_latency_ms, 50);
        assert!(settings.widget.default_open);
        // untouched sections keep their defaults
        assert!(settings.speech.voice_replies);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = load_settings(Some("/nonexistent/shopvoice.toml"));
        assert!(result.is_err());
    }
}
