//! Reply gateway strategies
//!
//! Two implementations of one `ReplyGateway` interface, selected once at
//! widget initialization and fixed for the widget's lifetime:
//! - `LiveGateway` - single HTTP POST per turn against a configured
//!   endpoint, degrading locally to a fixed apology reply on any failure
//! - `MockGateway` - deterministic keyword-driven simulation with
//!   artificial latency, used when no endpoint is configured

pub mod live;
pub mod mock;

pub use live::LiveGateway;
pub use mock::{MockGateway, FILLER_REPLIES};

use std::sync::Arc;
use std::time::Duration;

use shopvoice_core::ReplyGateway;
use thiserror::Error;

/// Gateway errors
///
/// These never escape the gateway: `send` converts every failure into the
/// apology reply. They exist for logging and for `LiveGateway`
/// construction.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("network error: {0}")]
    Network(String),

    #[error("endpoint returned status {0}")]
    Status(u16),

    #[error("invalid response body: {0}")]
    InvalidResponse(String),

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Network(err.to_string())
    }
}

impl From<GatewayError> for shopvoice_core::Error {
    fn from(err: GatewayError) -> Self {
        shopvoice_core::Error::GatewayUnreachable(err.to_string())
    }
}

/// Everything needed to pick and build a gateway
#[derive(Debug, Clone)]
pub struct GatewayOptions {
    /// Live reply endpoint; `None` or empty selects mock mode
    pub endpoint_url: Option<String>,
    /// Bearer key for live requests
    pub access_key: Option<String>,
    /// Shop identifier carried in every live request
    pub shop: String,
    /// Live request timeout
    pub request_timeout: Duration,
    /// Artificial mock latency
    pub mock_latency: Duration,
}

impl Default for GatewayOptions {
    fn default() -> Self {
        Self {
            endpoint_url: None,
            access_key: None,
            shop: "demo-shop".to_string(),
            request_timeout: Duration::from_secs(15),
            mock_latency: Duration::from_millis(400),
        }
    }
}

/// Build the gateway strategy for these options.
///
/// Absence of the endpoint URL is the sole trigger for mock mode. The
/// choice is made exactly once; callers hold the returned trait object
/// for the widget's lifetime.
pub fn build_gateway(options: &GatewayOptions) -> Result<Arc<dyn ReplyGateway>, GatewayError> {
    match options.endpoint_url.as_deref().map(str::trim) {
        Some(endpoint) if !endpoint.is_empty() => {
            tracing::info!(endpoint, shop = %options.shop, "reply gateway: live mode");
            Ok(Arc::new(LiveGateway::new(
                endpoint,
                options.shop.clone(),
                options.access_key.clone(),
                options.request_timeout,
            )?))
        }
        _ => {
            tracing::info!("reply gateway: mock mode (no endpoint configured)");
            Ok(Arc::new(MockGateway::new(options.mock_latency)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopvoice_core::GatewayMode;

    #[test]
    fn test_mock_mode_selection() {
        let gateway = build_gateway(&GatewayOptions::default()).unwrap();
        assert_eq!(gateway.mode(), GatewayMode::Mock);

        let gateway = build_gateway(&GatewayOptions {
            endpoint_url: Some("  ".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(gateway.mode(), GatewayMode::Mock);
    }

    #[test]
    fn test_live_mode_selection() {
        let gateway = build_gateway(&GatewayOptions {
            endpoint_url: Some("https://replies.example.com/v1/chat".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(gateway.mode(), GatewayMode::Live);
    }
}
