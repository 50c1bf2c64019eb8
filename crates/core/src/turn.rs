//! Conversation turn types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    /// Typed or spoken user input
    User,
    /// Reply from the gateway
    Assistant,
}

impl Sender {
    /// Role string used on the wire and in gateway history
    pub fn as_role(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_role())
    }
}

/// Coarse turn classification, consumed only for UI emphasis
/// (e.g. whether product cards accompany the transcript entry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TurnCategory {
    #[default]
    General,
    Store,
}

/// A single message in the conversation
///
/// Turns are immutable once appended to the conversation store; the store
/// is append-only and insertion order is the only ordering ever used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    /// Unique turn id
    pub id: Uuid,
    /// Display text; never empty once stored
    pub text: String,
    /// Who produced the turn
    pub sender: Sender,
    /// Used only for display ordering/formatting, not for logic
    pub timestamp: DateTime<Utc>,
    /// Remote playable clip (assistant turns only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    /// UI emphasis hint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<TurnCategory>,
}

impl Turn {
    /// Create a new turn
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            sender,
            timestamp: Utc::now(),
            audio_url: None,
            category: None,
        }
    }

    /// Create a user turn
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    /// Create an assistant turn
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Sender::Assistant, text)
    }

    /// Attach a remote audio clip
    pub fn with_audio_url(mut self, url: impl Into<String>) -> Self {
        self.audio_url = Some(url.into());
        self
    }

    /// Tag the turn for UI emphasis
    pub fn with_category(mut self, category: TurnCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// History entry for submission to the reply gateway
    pub fn as_history_entry(&self) -> HistoryEntry {
        HistoryEntry {
            role: self.sender,
            content: self.text.clone(),
        }
    }
}

/// One `{role, content}` pair sent to the reply gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: Sender,
    pub content: String,
}

impl HistoryEntry {
    pub fn new(role: Sender, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_creation() {
        let turn = Turn::user("Do you have headphones?");
        assert_eq!(turn.sender, Sender::User);
        assert!(turn.audio_url.is_none());

        let turn = Turn::assistant("We do!")
            .with_audio_url("https://cdn.example.com/reply.mp3")
            .with_category(TurnCategory::Store);
        assert_eq!(turn.sender, Sender::Assistant);
        assert_eq!(turn.category, Some(TurnCategory::Store));
    }

    #[test]
    fn test_turn_ids_are_unique() {
        let a = Turn::user("hi");
        let b = Turn::user("hi");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_history_entry_role_serialization() {
        let entry = Turn::assistant("hello").as_history_entry();
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["role"], "assistant");
        assert_eq!(json["content"], "hello");
    }
}
