//! Widget orchestration core
//!
//! Features:
//! - Append-only conversation store, the single source of truth for
//!   transcript rendering and gateway history
//! - Top-level widget state machine (open, listening, typing, mute,
//!   persona) with durable preference flags
//! - Event stream for pluggable presentation layers: the core emits
//!   state and events, skins subscribe
//! - Headless demo binary (`shopvoice-demo`) driving mock mode

pub mod controller;
pub mod prefs;
pub mod state;
pub mod store;

pub use controller::{SubmitOutcome, WidgetController, WidgetEvent};
pub use prefs::{FilePreferenceStore, MemoryPreferenceStore};
pub use state::WidgetState;
pub use store::{Appended, ConversationStore};

use std::time::Duration;

use shopvoice_config::Settings;
use shopvoice_gateway::GatewayOptions;

/// Map loaded settings onto gateway options.
///
/// Lives here rather than in the config crate so the config crate stays
/// free of gateway types.
pub fn gateway_options(settings: &Settings) -> GatewayOptions {
    GatewayOptions {
        endpoint_url: settings.gateway.endpoint_url.clone(),
        access_key: settings.gateway.access_key.clone(),
        shop: settings.gateway.shop.clone(),
        request_timeout: Duration::from_secs(settings.gateway.request_timeout_secs),
        mock_latency: Duration::from_millis(settings.gateway.mock_latency_ms),
    }
}
