//! Character (persona) records.
//!
//! A character is owned by whoever seeds the store; the chat path only ever
//! reads it by `character_id`.

use serde::{Deserialize, Serialize};

/// A persona whose `prompt_template` becomes the system instruction of a
/// completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub character_id: String,
    /// Used verbatim as the system instruction.
    pub prompt_template: String,
    /// Display name (informational only).
    #[serde(default)]
    pub name: String,
    /// Seconds since the Unix epoch of the last upsert.
    #[serde(default)]
    pub updated_at: i64,
}

impl Character {
    pub fn new(character_id: impl Into<String>, prompt_template: impl Into<String>) -> Self {
        Self {
            character_id: character_id.into(),
            prompt_template: prompt_template.into(),
            name: String::new(),
            updated_at: 0,
        }
    }
}
