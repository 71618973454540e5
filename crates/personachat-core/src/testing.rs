//! In-memory doubles shared by the unit tests of this crate.

use std::collections::HashMap;
use std::sync::Mutex;

use personachat_types::character::Character;
use personachat_types::conversation::Conversation;
use personachat_types::error::RepositoryError;
use personachat_types::llm::{CompletionRequest, CompletionResponse, LlmError, Usage};
use uuid::Uuid;

use crate::llm::provider::LlmProvider;
use crate::repository::character::CharacterRepository;
use crate::repository::conversation::ConversationRepository;

// --- Characters ---

#[derive(Default)]
pub struct InMemoryCharacters {
    characters: HashMap<String, Character>,
    unavailable: bool,
}

impl InMemoryCharacters {
    pub fn with(characters: &[(&str, &str)]) -> Self {
        Self {
            characters: characters
                .iter()
                .map(|(id, prompt)| (id.to_string(), Character::new(*id, *prompt)))
                .collect(),
            unavailable: false,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            characters: HashMap::new(),
            unavailable: true,
        }
    }
}

impl CharacterRepository for InMemoryCharacters {
    async fn get_by_id(&self, character_id: &str) -> Result<Option<Character>, RepositoryError> {
        if self.unavailable {
            return Err(RepositoryError::Connection);
        }
        Ok(self.characters.get(character_id).cloned())
    }
}

// --- Conversations ---

#[derive(Default)]
pub struct InMemoryConversations {
    rows: Mutex<Vec<Conversation>>,
    reject_writes: bool,
}

impl InMemoryConversations {
    pub fn rejecting_writes() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            reject_writes: true,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

impl ConversationRepository for InMemoryConversations {
    async fn insert(&self, conversation: &Conversation) -> Result<(), RepositoryError> {
        if self.reject_writes {
            return Err(RepositoryError::Query("disk I/O error".to_string()));
        }
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|c| c.session_id == conversation.session_id) {
            return Err(RepositoryError::Conflict(conversation.session_id.to_string()));
        }
        rows.push(conversation.clone());
        Ok(())
    }

    async fn get_by_id(&self, session_id: &Uuid) -> Result<Option<Conversation>, RepositoryError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|c| &c.session_id == session_id).cloned())
    }

    async fn list_by_user(
        &self,
        user_id: &str,
        limit: Option<i64>,
    ) -> Result<Vec<Conversation>, RepositoryError> {
        let rows = self.rows.lock().unwrap();
        let limit = limit.unwrap_or(i64::MAX).max(0) as usize;
        Ok(rows
            .iter()
            .rev()
            .filter(|c| c.user_id == user_id)
            .take(limit)
            .cloned()
            .collect())
    }
}

// --- LLM ---

pub struct MockProvider {
    result: Result<String, String>,
    last_request: Mutex<Option<CompletionRequest>>,
}

impl MockProvider {
    pub fn replying(reply: &str) -> Self {
        Self {
            result: Ok(reply.to_string()),
            last_request: Mutex::new(None),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            last_request: Mutex::new(None),
        }
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        *self.last_request.lock().unwrap() = Some(request.clone());
        match &self.result {
            Ok(reply) => Ok(CompletionResponse {
                content: reply.clone(),
                model: "mock-model".to_string(),
                usage: Usage {
                    input_tokens: 10,
                    output_tokens: 20,
                },
            }),
            Err(message) => Err(LlmError::Provider {
                message: message.clone(),
            }),
        }
    }
}
