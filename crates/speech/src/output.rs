//! Speech output chain
//!
//! Given a reply, decides what gets voiced, in strict priority order:
//! remote audio clip, talking-head video, on-device synthesis. Each step
//! falls through to the next on playback failure; synthesis is the last
//! step and degrades silently when the host cannot speak. The transcript
//! remains the authoritative fallback channel.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use shopvoice_core::{ReplyResult, SpeechOutputProvider, VoiceProfile};

/// How a reply ended up being voiced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    /// The reply's remote audio clip played
    RemoteAudio,
    /// The reply's talking-head video played
    AvatarVideo,
    /// On-device synthesis of the reply text was dispatched
    Synthesis,
    /// Nothing was voiced (muted, superseded, or chain exhausted)
    Skipped,
}

/// Ordered playback fallback chain
///
/// Owns the single playback handle for a widget instance: starting a new
/// reply halts whatever the previous one was playing, and a reply whose
/// playback is superseded mid-chain stops advancing.
pub struct OutputChain {
    provider: Arc<dyn SpeechOutputProvider>,
    muted: AtomicBool,
    generation: AtomicU64,
}

impl OutputChain {
    pub fn new(provider: Arc<dyn SpeechOutputProvider>) -> Self {
        Self {
            provider,
            muted: AtomicBool::new(false),
            generation: AtomicU64::new(0),
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted.load(Ordering::Acquire)
    }

    /// Mute or unmute speech output.
    ///
    /// Muting stops any in-flight playback immediately; unmuting never
    /// resumes anything retroactively.
    pub fn set_muted(&self, muted: bool) {
        self.muted.store(muted, Ordering::Release);
        if muted {
            // also invalidate a chain currently between steps
            self.generation.fetch_add(1, Ordering::AcqRel);
            self.provider.halt();
        }
    }

    /// Voice one reply through the fallback chain.
    ///
    /// The mute flag is re-checked before every step, and a newer call
    /// supersedes this one between steps, so at most one utterance is
    /// ever audible.
    pub async fn speak(&self, reply: &ReplyResult, voice: &VoiceProfile) -> Playback {
        if self.is_muted() {
            return Playback::Skipped;
        }

        // claim the playback handle; anything older stops here
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        self.provider.halt();

        if let Some(url) = &reply.speech_url {
            match self.provider.play_audio(url).await {
                Ok(()) => return Playback::RemoteAudio,
                Err(e) => {
                    tracing::warn!(error = %e, url, "remote audio failed, falling through");
                }
            }
        }

        if self.superseded(generation) {
            return Playback::Skipped;
        }

        if let Some(url) = &reply.avatar_video_url {
            match self.provider.play_video(url).await {
                Ok(()) => return Playback::AvatarVideo,
                Err(e) => {
                    tracing::warn!(error = %e, url, "avatar video failed, falling through");
                }
            }
        }

        if self.superseded(generation) {
            return Playback::Skipped;
        }

        if !self.provider.can_synthesize() {
            tracing::debug!(
                provider = self.provider.provider_name(),
                "no synthesis capability, reply stays text-only"
            );
            return Playback::Skipped;
        }

        match self.provider.synthesize(&reply.text, voice).await {
            Ok(()) => Playback::Synthesis,
            Err(e) => {
                // end of the chain: no further fallback, no error surfaced
                tracing::debug!(error = %e, "synthesis failed, reply stays text-only");
                Playback::Skipped
            }
        }
    }

    fn superseded(&self, generation: u64) -> bool {
        self.is_muted() || self.generation.load(Ordering::Acquire) != generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use shopvoice_core::{Error, Result};

    /// Records every provider call; failures are scripted per step.
    #[derive(Default)]
    struct RecordingProvider {
        calls: Mutex<Vec<String>>,
        fail_audio: bool,
        fail_video: bool,
        no_synthesis: bool,
    }

    impl RecordingProvider {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().clone()
        }
    }

    #[async_trait]
    impl SpeechOutputProvider for RecordingProvider {
        fn can_synthesize(&self) -> bool {
            !self.no_synthesis
        }

        async fn play_audio(&self, url: &str) -> Result<()> {
            self.calls.lock().push(format!("audio:{url}"));
            if self.fail_audio {
                return Err(Error::PlaybackFailure("autoplay blocked".to_string()));
            }
            Ok(())
        }

        async fn play_video(&self, url: &str) -> Result<()> {
            self.calls.lock().push(format!("video:{url}"));
            if self.fail_video {
                return Err(Error::PlaybackFailure("decode error".to_string()));
            }
            Ok(())
        }

        async fn synthesize(&self, text: &str, _voice: &VoiceProfile) -> Result<()> {
            self.calls.lock().push(format!("synth:{text}"));
            Ok(())
        }

        fn halt(&self) {
            self.calls.lock().push("halt".to_string());
        }

        fn provider_name(&self) -> &str {
            "recording"
        }
    }

    fn full_reply() -> ReplyResult {
        ReplyResult::text("hello")
            .with_speech_url("https://cdn.example.com/a.mp3")
            .with_avatar_video_url("https://cdn.example.com/v.mp4")
    }

    #[tokio::test]
    async fn test_speech_url_wins_over_video() {
        let provider = Arc::new(RecordingProvider::default());
        let chain = OutputChain::new(provider.clone());

        let played = chain.speak(&full_reply(), &VoiceProfile::default()).await;

        assert_eq!(played, Playback::RemoteAudio);
        assert_eq!(
            provider.calls(),
            vec!["halt", "audio:https://cdn.example.com/a.mp3"]
        );
    }

    #[tokio::test]
    async fn test_failed_audio_falls_through_to_video_not_synthesis() {
        let provider = Arc::new(RecordingProvider {
            fail_audio: true,
            ..Default::default()
        });
        let chain = OutputChain::new(provider.clone());

        let played = chain.speak(&full_reply(), &VoiceProfile::default()).await;

        assert_eq!(played, Playback::AvatarVideo);
        assert_eq!(
            provider.calls(),
            vec![
                "halt",
                "audio:https://cdn.example.com/a.mp3",
                "video:https://cdn.example.com/v.mp4"
            ]
        );
    }

    #[tokio::test]
    async fn test_exhausted_urls_fall_through_to_synthesis() {
        let provider = Arc::new(RecordingProvider {
            fail_audio: true,
            fail_video: true,
            ..Default::default()
        });
        let chain = OutputChain::new(provider.clone());

        let played = chain.speak(&full_reply(), &VoiceProfile::default()).await;

        assert_eq!(played, Playback::Synthesis);
        assert_eq!(provider.calls().last().unwrap(), "synth:hello");
    }

    #[tokio::test]
    async fn test_text_only_reply_goes_straight_to_synthesis() {
        let provider = Arc::new(RecordingProvider::default());
        let chain = OutputChain::new(provider.clone());

        let played = chain
            .speak(&ReplyResult::text("just text"), &VoiceProfile::default())
            .await;

        assert_eq!(played, Playback::Synthesis);
        assert_eq!(provider.calls(), vec!["halt", "synth:just text"]);
    }

    #[tokio::test]
    async fn test_muted_skips_everything() {
        let provider = Arc::new(RecordingProvider::default());
        let chain = OutputChain::new(provider.clone());

        chain.set_muted(true);
        let played = chain.speak(&full_reply(), &VoiceProfile::default()).await;

        assert_eq!(played, Playback::Skipped);
        // only the halt from set_muted itself
        assert_eq!(provider.calls(), vec!["halt"]);
    }

    #[tokio::test]
    async fn test_mute_halts_current_playback() {
        let provider = Arc::new(RecordingProvider::default());
        let chain = OutputChain::new(provider.clone());

        let _ = chain.speak(&full_reply(), &VoiceProfile::default()).await;
        chain.set_muted(true);

        assert!(provider.calls().iter().filter(|c| *c == "halt").count() >= 2);

        // unmuting resumes nothing
        chain.set_muted(false);
        let calls_before = provider.calls().len();
        assert_eq!(provider.calls().len(), calls_before);
    }

    #[tokio::test]
    async fn test_no_synthesis_capability_degrades_silently() {
        let provider = Arc::new(RecordingProvider {
            no_synthesis: true,
            ..Default::default()
        });
        let chain = OutputChain::new(provider.clone());

        let played = chain
            .speak(&ReplyResult::text("quiet"), &VoiceProfile::default())
            .await;

        assert_eq!(played, Playback::Skipped);
        assert_eq!(provider.calls(), vec!["halt"]);
    }
}
