//! Speech capability traits
//!
//! Implementations wrap whatever the host environment provides (a browser
//! dictation API, a desktop capture stack). Environments without the
//! capability use the stub providers in `shopvoice-speech`.

use async_trait::async_trait;

use crate::{Result, VoiceProfile};

/// Dictation capability of the host environment
///
/// # Example
///
/// ```ignore
/// let provider: Arc<dyn SpeechInputProvider> = Arc::new(HostDictation::new());
/// if provider.is_available() {
///     let mut session = provider.open_session().await?;
///     if let Some(text) = session.transcript().await? {
///         println!("heard: {text}");
///     }
/// }
/// ```
#[async_trait]
pub trait SpeechInputProvider: Send + Sync + 'static {
    /// Whether the host exposes a dictation capability at all.
    ///
    /// `false` means `open_session` will fail with
    /// [`Error::UnsupportedCapability`](crate::Error::UnsupportedCapability)
    /// and the widget degrades to text-only input.
    fn is_available(&self) -> bool;

    /// Begin a single-shot recognition session.
    ///
    /// At most one session is active per widget instance; the caller is
    /// responsible for tearing down any prior session first.
    async fn open_session(&self) -> Result<Box<dyn RecognitionSession>>;

    /// Provider name for logging
    fn provider_name(&self) -> &str;
}

/// One single-shot capture session
///
/// Sessions emit at most one transcript and are then spent. The
/// `transcript` future must be cancel-safe: the adapter drops it when the
/// user cancels, then calls `cancel` to release the device.
#[async_trait]
pub trait RecognitionSession: Send {
    /// Resolve with the recognized utterance.
    ///
    /// `Ok(None)` means the capture ended without speech (silence timeout
    /// or host-side cancellation). Errors are non-fatal recognition
    /// failures (device, permission, network).
    async fn transcript(&mut self) -> Result<Option<String>>;

    /// Tear down the capture session and release the device. Idempotent.
    async fn cancel(&mut self);
}

/// Playback and synthesis capability of the host environment
///
/// The output chain guarantees at most one utterance is audible at a time
/// by calling `halt` before starting new playback; implementations only
/// need to stop whatever they are currently playing.
#[async_trait]
pub trait SpeechOutputProvider: Send + Sync + 'static {
    /// Whether on-device speech synthesis is available.
    ///
    /// When `false`, the final step of the output chain is silently
    /// skipped; the transcript is the authoritative fallback channel.
    fn can_synthesize(&self) -> bool;

    /// Load and play a remote audio clip.
    ///
    /// Resolves once playback has been accepted by the host; rejects with
    /// [`Error::PlaybackFailure`](crate::Error::PlaybackFailure) on blocked
    /// autoplay, network or decode errors.
    async fn play_audio(&self, url: &str) -> Result<()>;

    /// Load and play a remote video clip (carries its own audio).
    async fn play_video(&self, url: &str) -> Result<()>;

    /// Dispatch on-device synthesis of `text` with the given voice.
    ///
    /// Fire-and-forget: resolves once the utterance has been queued, not
    /// when it finishes speaking.
    async fn synthesize(&self, text: &str, voice: &VoiceProfile) -> Result<()>;

    /// Immediately stop any in-flight playback or synthesis. Idempotent.
    fn halt(&self);

    /// Provider name for logging
    fn provider_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    // Minimal provider used to exercise the trait object surface
    struct Unavailable;

    #[async_trait]
    impl SpeechInputProvider for Unavailable {
        fn is_available(&self) -> bool {
            false
        }

        async fn open_session(&self) -> Result<Box<dyn RecognitionSession>> {
            Err(Error::UnsupportedCapability(
                "host exposes no dictation".to_string(),
            ))
        }

        fn provider_name(&self) -> &str {
            "unavailable"
        }
    }

    #[tokio::test]
    async fn test_unavailable_provider() {
        let provider: Box<dyn SpeechInputProvider> = Box::new(Unavailable);
        assert!(!provider.is_available());
        assert!(matches!(
            provider.open_session().await,
            Err(Error::UnsupportedCapability(_))
        ));
    }
}
