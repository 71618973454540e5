//! Inbound chat request and outbound reply envelope.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ChatError;

/// Raw inbound request. Every field is optional at the wire level so that
/// absence is reported as a validation failure rather than a parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub character_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A request whose required fields are all present and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidChatRequest {
    pub user_id: String,
    pub character_id: String,
    pub message: String,
}

impl ChatRequest {
    pub fn new(
        user_id: impl Into<String>,
        character_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            user_id: Some(user_id.into()),
            character_id: Some(character_id.into()),
            message: Some(message.into()),
        }
    }

    /// Check that `user_id`, `character_id` and `message` are present and
    /// non-empty. Empty strings count as missing.
    pub fn validate(self) -> Result<ValidChatRequest, ChatError> {
        fn present(field: Option<String>) -> Option<String> {
            field.filter(|v| !v.is_empty())
        }

        let user_id = present(self.user_id);
        let character_id = present(self.character_id);
        let message = present(self.message);

        match (user_id, character_id, message) {
            (Some(user_id), Some(character_id), Some(message)) => Ok(ValidChatRequest {
                user_id,
                character_id,
                message,
            }),
            (user_id, character_id, message) => {
                let missing: Vec<&str> = [
                    ("user_id", user_id.is_none()),
                    ("character_id", character_id.is_none()),
                    ("message", message.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, is_missing)| is_missing.then_some(name))
                .collect();
                Err(ChatError::Validation(format!(
                    "missing required parameters: {}",
                    missing.join(", ")
                )))
            }
        }
    }
}

/// Status block of a successful reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyStatus {
    pub code: String,
    /// Wall-clock seconds spent handling the request.
    pub execution_time: f64,
}

/// Successful reply: the new session and the character's message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub session_id: Uuid,
    pub message: String,
    pub status: ReplyStatus,
}

impl ChatReply {
    pub fn success(session_id: Uuid, message: String, execution_time: f64) -> Self {
        Self {
            session_id,
            message,
            status: ReplyStatus {
                code: "success".to_string(),
                execution_time,
            },
        }
    }
}
