//! The conversation transcript
//!
//! Single source of truth for the ordered sequence of user/assistant
//! turns in the current session. Insertion order is chronological order
//! is display order. Nothing here persists: reload loses history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(test)]
mod proptests;

/// Author of a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// Inline image carried by a turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAttachment {
    /// Base64-encoded image bytes
    pub data: String,
    /// Declared MIME type, e.g. `image/png`
    pub media_type: String,
}

/// One message unit in the transcript
#[derive(Debug, Clone, Serialize)]
pub struct Turn {
    pub role: Role,
    /// Empty only for image-bearing user turns
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageAttachment>,
    pub created_at: DateTime<Utc>,
}

impl Turn {
    pub fn user(text: impl Into<String>, image: Option<ImageAttachment>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            image,
            created_at: Utc::now(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            image: None,
            created_at: Utc::now(),
        }
    }
}

/// Role/text-only projection of a turn, fed back to the inference client
/// as conversational context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub role: Role,
    pub text: String,
}

/// Ordered transcript of the current session
#[derive(Debug, Default)]
pub struct ConversationStore {
    turns: Vec<Turn>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn at the end of the transcript
    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Reset the transcript to empty
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Projection with image references stripped, order preserved
    pub fn as_history(&self) -> Vec<HistoryEntry> {
        self.turns
            .iter()
            .map(|turn| HistoryEntry {
                role: turn.role,
                text: turn.text.clone(),
            })
            .collect()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_preserves_insertion_order() {
        let mut store = ConversationStore::new();
        store.append(Turn::user("What is torque?", None));
        store.append(Turn::assistant("Torque is rotational force."));
        store.append(Turn::user("And angular momentum?", None));

        assert_eq!(store.len(), 3);
        assert_eq!(store.turns()[0].text, "What is torque?");
        assert_eq!(store.turns()[1].role, Role::Assistant);
        assert_eq!(store.turns()[2].text, "And angular momentum?");
    }

    #[test]
    fn as_history_strips_images_and_keeps_roles() {
        let image = ImageAttachment {
            data: "aGVsbG8=".to_string(),
            media_type: "image/png".to_string(),
        };
        let mut store = ConversationStore::new();
        store.append(Turn::user("", Some(image)));
        store.append(Turn::assistant("A free-body diagram."));

        let history = store.as_history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, Role::User);
        assert_eq!(history[0].text, "");
        assert_eq!(history[1].role, Role::Assistant);
        assert_eq!(history[1].text, "A free-body diagram.");
    }

    #[test]
    fn clear_resets_to_empty() {
        let mut store = ConversationStore::new();
        store.append(Turn::user("hello", None));
        assert!(!store.is_empty());

        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }
}
