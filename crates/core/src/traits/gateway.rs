//! Reply gateway trait

use async_trait::async_trait;

use crate::{HistoryEntry, ReplyResult};

/// Which strategy a gateway instance implements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayMode {
    /// Real HTTP calls against a configured reply endpoint
    Live,
    /// Local deterministic simulation, used when no endpoint is configured
    Mock,
}

impl std::fmt::Display for GatewayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GatewayMode::Live => write!(f, "live"),
            GatewayMode::Mock => write!(f, "mock"),
        }
    }
}

/// The remote reply service, or its local simulation
///
/// One implementation is selected at widget initialization and fixed for
/// the widget's lifetime. `send` never fails from the caller's point of
/// view: live-mode transport and decode failures are converted internally
/// into the fixed apology reply, so the conversation always continues
/// with a visible assistant turn.
///
/// # Example
///
/// ```ignore
/// let gateway: Arc<dyn ReplyGateway> = build_gateway(&options)?;
/// let reply = gateway.send("do you sell headphones?", &history).await;
/// println!("{}", reply.text);
/// ```
#[async_trait]
pub trait ReplyGateway: Send + Sync + 'static {
    /// Send one user message plus the prior conversation history.
    ///
    /// `history` holds the turns exchanged before `message`, in insertion
    /// order. Calls are never retried and never aborted once issued.
    async fn send(&self, message: &str, history: &[HistoryEntry]) -> ReplyResult;

    /// Strategy label for logging
    fn mode(&self) -> GatewayMode;
}
