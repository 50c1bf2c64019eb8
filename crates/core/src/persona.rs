//! Persona and voice configuration types

use serde::{Deserialize, Serialize};

/// Voice parameters for on-device speech synthesis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceProfile {
    /// Host voice identifier
    pub voice_id: String,
    /// Speech rate (0.5 - 2.0, default 1.0)
    #[serde(default = "default_rate")]
    pub rate: f32,
    /// Pitch adjustment (-1.0 to 1.0, default 0.0)
    #[serde(default)]
    pub pitch: f32,
}

fn default_rate() -> f32 {
    1.0
}

impl Default for VoiceProfile {
    fn default() -> Self {
        Self {
            voice_id: "default".to_string(),
            rate: 1.0,
            pitch: 0.0,
        }
    }
}

impl VoiceProfile {
    pub fn new(voice_id: impl Into<String>) -> Self {
        Self {
            voice_id: voice_id.into(),
            ..Default::default()
        }
    }

    pub fn with_rate(mut self, rate: f32) -> Self {
        self.rate = rate.clamp(0.5, 2.0);
        self
    }

    pub fn with_pitch(mut self, pitch: f32) -> Self {
        self.pitch = pitch.clamp(-1.0, 1.0);
        self
    }
}

/// A selectable visual/voice identity
///
/// Carries no conversational logic: switching persona mid-conversation
/// changes only the presentation and the voice parameters of subsequent
/// output, never the history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    /// Stable identifier, persisted as a user preference
    pub id: String,
    /// Name shown in the widget header
    pub display_name: String,
    /// Voice used for synthesized output
    #[serde(default)]
    pub voice: VoiceProfile,
    /// Greeting shown when the widget opens with an empty transcript
    pub greeting: String,
}

impl Persona {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        greeting: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            voice: VoiceProfile::default(),
            greeting: greeting.into(),
        }
    }

    pub fn with_voice(mut self, voice: VoiceProfile) -> Self {
        self.voice = voice;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_profile_clamping() {
        let voice = VoiceProfile::new("en-US-1").with_rate(5.0).with_pitch(-3.0);
        assert_eq!(voice.rate, 2.0);
        assert_eq!(voice.pitch, -1.0);
    }

    #[test]
    fn test_persona_builder() {
        let persona = Persona::new("aria", "Aria", "Hi! How can I help?")
            .with_voice(VoiceProfile::new("en-US-aria").with_rate(1.1));
        assert_eq!(persona.id, "aria");
        assert_eq!(persona.voice.voice_id, "en-US-aria");
    }
}
