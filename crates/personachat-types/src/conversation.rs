//! Conversation records: one user message and one character reply per
//! session.
//!
//! A conversation is written once and never revised. `session_id` is
//! freshly generated for every exchange, so the same user talking to the
//! same character twice produces two independent records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;

/// Author of a message inside a conversation.
///
/// Serialized as the `type` field of each stored message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    User,
    Character,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageKind::User => write!(f, "user"),
            MessageKind::Character => write!(f, "character"),
        }
    }
}

/// A single stored message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub content: String,
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
}

/// A persisted exchange between a user and a character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub session_id: Uuid,
    pub user_id: String,
    pub character_id: String,
    /// Always `[user, character]`, in that order.
    pub messages: Vec<ConversationMessage>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Conversation {
    /// Build the record for a single exchange.
    ///
    /// Both messages and both record timestamps carry the same `now`.
    pub fn exchange(
        session_id: Uuid,
        user_id: impl Into<String>,
        character_id: impl Into<String>,
        user_message: impl Into<String>,
        character_message: impl Into<String>,
        now: i64,
    ) -> Self {
        Self {
            session_id,
            user_id: user_id.into(),
            character_id: character_id.into(),
            messages: vec![
                ConversationMessage {
                    kind: MessageKind::User,
                    content: user_message.into(),
                    timestamp: now,
                },
                ConversationMessage {
                    kind: MessageKind::Character,
                    content: character_message.into(),
                    timestamp: now,
                },
            ],
            created_at: now,
            updated_at: now,
        }
    }

    /// `created_at` as a UTC datetime, if it is in chrono's range.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created_at, 0)
    }

    /// The user's message, if present.
    pub fn user_message(&self) -> Option<&ConversationMessage> {
        self.messages.iter().find(|m| m.kind == MessageKind::User)
    }

    /// The character's reply, if present.
    pub fn character_message(&self) -> Option<&ConversationMessage> {
        self.messages
            .iter()
            .find(|m| m.kind == MessageKind::Character)
    }
}
