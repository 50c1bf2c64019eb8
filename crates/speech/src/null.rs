//! No-op providers for hosts without speech capabilities
//!
//! Injected at construction time so the rest of the widget never probes
//! for capabilities ad hoc: input degrades to `UnsupportedCapability`,
//! output degrades to a silent text-only widget.

use async_trait::async_trait;

use shopvoice_core::{
    Error, RecognitionSession, Result, SpeechInputProvider, SpeechOutputProvider, VoiceProfile,
};

/// Dictation provider for hosts without speech recognition
pub struct NullSpeechInput;

#[async_trait]
impl SpeechInputProvider for NullSpeechInput {
    fn is_available(&self) -> bool {
        false
    }

    async fn open_session(&self) -> Result<Box<dyn RecognitionSession>> {
        Err(Error::UnsupportedCapability(
            "host exposes no dictation capability".to_string(),
        ))
    }

    fn provider_name(&self) -> &str {
        "null-input"
    }
}

/// Playback provider for hosts without audio output
///
/// Remote playback rejects so the chain falls through; synthesis reports
/// itself unavailable so the chain skips it silently.
pub struct NullSpeechOutput;

#[async_trait]
impl SpeechOutputProvider for NullSpeechOutput {
    fn can_synthesize(&self) -> bool {
        false
    }

    async fn play_audio(&self, _url: &str) -> Result<()> {
        Err(Error::PlaybackFailure("no playback surface".to_string()))
    }

    async fn play_video(&self, _url: &str) -> Result<()> {
        Err(Error::PlaybackFailure("no playback surface".to_string()))
    }

    async fn synthesize(&self, _text: &str, _voice: &VoiceProfile) -> Result<()> {
        Err(Error::UnsupportedCapability(
            "host exposes no speech synthesis".to_string(),
        ))
    }

    fn halt(&self) {}

    fn provider_name(&self) -> &str {
        "null-output"
    }
}
