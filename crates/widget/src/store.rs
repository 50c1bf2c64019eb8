//! Conversation store
//!
//! Ordered append-only log of turns: the single source of truth for
//! transcript rendering and for the history sent to the reply gateway.
//! No edit or delete operation exists; ordering is insertion order and is
//! the only ordering ever used.

use parking_lot::RwLock;

use shopvoice_core::{Error, HistoryEntry, Result, Sender, Turn};

/// What happened to an appended turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Appended {
    /// The turn is now the last entry of the log
    Appended,
    /// An identical user turn is already awaiting its reply; the new one
    /// was dropped
    Deduplicated,
}

/// Append-only conversation log
#[derive(Default)]
pub struct ConversationStore {
    turns: RwLock<Vec<Turn>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn at the end of the log.
    ///
    /// Never rejects on capacity. Turns without visible text are rejected
    /// with [`Error::EmptyTurn`]. One dedup guard applies: a user turn
    /// whose text equals the last turn's, while that last turn is an
    /// unacknowledged user turn, is dropped rather than duplicated.
    pub fn append(&self, turn: Turn) -> Result<Appended> {
        if turn.text.trim().is_empty() {
            return Err(Error::EmptyTurn);
        }

        let mut turns = self.turns.write();

        if turn.sender == Sender::User {
            if let Some(last) = turns.last() {
                if last.sender == Sender::User && last.text == turn.text {
                    tracing::debug!("identical pending user turn, not duplicating");
                    return Ok(Appended::Deduplicated);
                }
            }
        }

        turns.push(turn);
        Ok(Appended::Appended)
    }

    /// The `{role, content}` sequence submitted to the reply gateway,
    /// in insertion order.
    pub fn snapshot_as_history(&self) -> Vec<HistoryEntry> {
        self.turns
            .read()
            .iter()
            .map(Turn::as_history_entry)
            .collect()
    }

    /// Snapshot of all turns for transcript rendering
    pub fn turns(&self) -> Vec<Turn> {
        self.turns.read().clone()
    }

    pub fn turn_count(&self) -> usize {
        self.turns.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order() {
        let store = ConversationStore::new();
        store.append(Turn::user("first")).unwrap();
        store.append(Turn::assistant("second")).unwrap();
        store.append(Turn::user("third")).unwrap();

        let texts: Vec<String> = store.turns().into_iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_empty_turn_rejected() {
        let store = ConversationStore::new();
        assert!(matches!(
            store.append(Turn::user("   ")),
            Err(Error::EmptyTurn)
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_pending_duplicate_user_turn_dropped() {
        let store = ConversationStore::new();
        assert_eq!(store.append(Turn::user("hello?")).unwrap(), Appended::Appended);
        assert_eq!(
            store.append(Turn::user("hello?")).unwrap(),
            Appended::Deduplicated
        );
        assert_eq!(store.turn_count(), 1);

        // once acknowledged, the same question may be asked again
        store.append(Turn::assistant("hi!")).unwrap();
        assert_eq!(store.append(Turn::user("hello?")).unwrap(), Appended::Appended);
        assert_eq!(store.turn_count(), 3);
    }

    #[test]
    fn test_identical_assistant_turns_are_kept() {
        let store = ConversationStore::new();
        store.append(Turn::user("q")).unwrap();
        store.append(Turn::assistant("same")).unwrap();
        store.append(Turn::user("q again")).unwrap();
        store.append(Turn::assistant("same")).unwrap();
        assert_eq!(store.turn_count(), 4);
    }

    #[test]
    fn test_history_snapshot_roles() {
        let store = ConversationStore::new();
        store.append(Turn::user("do you have speakers?")).unwrap();
        store.append(Turn::assistant("we do!")).unwrap();

        let history = store.snapshot_as_history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role.as_role(), "user");
        assert_eq!(history[0].content, "do you have speakers?");
        assert_eq!(history[1].role.as_role(), "assistant");
    }
}
