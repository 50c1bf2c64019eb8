//! Error types for the widget core
//!
//! No error in this taxonomy is fatal to the widget: every failure path
//! terminates in a visible, if degraded, assistant turn or in a silently
//! skipped side effect.

use thiserror::Error;

/// Widget core errors
#[derive(Error, Debug)]
pub enum Error {
    /// The host environment exposes no dictation or synthesis capability.
    /// Reported once, never retried; interaction degrades to text-only.
    #[error("speech capability unsupported: {0}")]
    UnsupportedCapability(String),

    /// Speech recognition failed (device, permission, network). Non-fatal;
    /// the adapter returns to idle without a transcript.
    #[error("speech recognition failed: {0}")]
    Recognition(String),

    /// Audio/video playback was rejected (autoplay policy, network,
    /// decode). The output chain falls through to the next step.
    #[error("playback failed: {0}")]
    PlaybackFailure(String),

    /// The reply endpoint could not be reached or returned garbage.
    /// Recovered locally into a fixed apology reply, never retried.
    #[error("gateway unreachable: {0}")]
    GatewayUnreachable(String),

    /// The conversation store rejects turns with no visible text.
    #[error("empty turn rejected")]
    EmptyTurn,

    /// A submission was attempted while a reply is already in flight.
    #[error("a reply is already in flight")]
    ReplyInFlight,

    /// Persona id not present in the catalog.
    #[error("unknown persona: {0}")]
    UnknownPersona(String),

    /// Preference store read/write failure.
    #[error("preference store error: {0}")]
    Preference(String),

    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Convenience result alias used across the workspace
pub type Result<T> = std::result::Result<T, Error>;
