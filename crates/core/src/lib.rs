//! Core traits and types for the conversational widget
//!
//! This crate provides foundational types used across all other crates:
//! - Conversation types (turns, history entries)
//! - Reply types (gateway responses, products, cart actions)
//! - Persona and voice configuration
//! - Capability traits for pluggable hosts (speech input/output,
//!   reply gateway, preference storage)
//! - Error types

pub mod error;
pub mod persona;
pub mod reply;
pub mod traits;
pub mod turn;

pub use error::{Error, Result};
pub use persona::{Persona, VoiceProfile};
pub use reply::{CartAction, Product, ReplyResult, APOLOGY_REPLY};
pub use turn::{HistoryEntry, Sender, Turn, TurnCategory};

pub use traits::prefs::keys as pref_keys;
pub use traits::{
    // Gateway
    GatewayMode, ReplyGateway,
    // Preferences
    PreferenceStore,
    // Speech
    RecognitionSession, SpeechInputProvider, SpeechOutputProvider,
};
