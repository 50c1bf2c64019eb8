//! Speech input adapter and output fallback chain
//!
//! Features:
//! - Single-shot dictation adapter (`Idle -> Listening -> Idle`) over an
//!   injected [`SpeechInputProvider`](shopvoice_core::SpeechInputProvider)
//! - Ordered output fallback chain: remote audio clip, talking-head
//!   video, on-device synthesis
//! - Exclusive ownership of the recognition session and the playback
//!   handle: one of each per widget instance
//! - Null providers for hosts without speech capabilities

pub mod input;
pub mod null;
pub mod output;

pub use input::{SpeechInput, SpeechInputEvent};
pub use null::{NullSpeechInput, NullSpeechOutput};
pub use output::{OutputChain, Playback};
