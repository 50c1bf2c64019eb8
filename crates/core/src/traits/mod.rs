//! Capability traits for pluggable hosts
//!
//! The widget never reaches for ambient host globals. Every capability the
//! orchestration core needs is an injected trait object, resolved once at
//! construction time:
//!
//! - [`SpeechInputProvider`] / [`RecognitionSession`] - dictation capture
//! - [`SpeechOutputProvider`] - remote playback and on-device synthesis
//! - [`ReplyGateway`] - the remote reply service (or its local mock)
//! - [`PreferenceStore`] - durable user-preference flags
//!
//! Hosts lacking a capability hand in a no-op provider instead of being
//! probed ad hoc at each call site.

pub mod gateway;
pub mod prefs;
pub mod speech;

pub use gateway::{GatewayMode, ReplyGateway};
pub use prefs::PreferenceStore;
pub use speech::{RecognitionSession, SpeechInputProvider, SpeechOutputProvider};
