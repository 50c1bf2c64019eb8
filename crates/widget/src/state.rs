//! Widget state snapshot

use serde::{Deserialize, Serialize};

use shopvoice_core::ReplyResult;

/// Process-local widget state, emitted to presentation layers on every
/// change.
///
/// `is_muted`, `selected_persona` and `is_open` are durable across
/// reloads through the preference store; everything else resets on
/// remount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetState {
    /// Panel visibility, user-toggled, independent of conversation state
    pub is_open: bool,
    /// A recognition session is active
    pub is_listening: bool,
    /// A reply is in flight
    pub is_typing: bool,
    /// Speech output muted
    pub is_muted: bool,
    /// Persona id driving voice and presentation of subsequent output
    pub selected_persona: String,
    /// The most recent gateway reply; cleared on each new submission so
    /// stale recommendations never linger
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reply: Option<ReplyResult>,
}

impl WidgetState {
    pub fn new(selected_persona: impl Into<String>) -> Self {
        Self {
            is_open: false,
            is_listening: false,
            is_typing: false,
            is_muted: false,
            selected_persona: selected_persona.into(),
            last_reply: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = WidgetState::new("aria");
        assert!(!state.is_open);
        assert!(!state.is_typing);
        assert_eq!(state.selected_persona, "aria");
        assert!(state.last_reply.is_none());
    }
}
