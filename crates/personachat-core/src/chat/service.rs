//! Chat service orchestrating a single persona exchange.
//!
//! ChatService coordinates the CharacterLookup, the LLM provider and the
//! ConversationRecorder: one point read, one completion call, one insert,
//! strictly in that order.

use std::time::Instant;

use personachat_types::chat::{ChatReply, ChatRequest};
use personachat_types::conversation::Conversation;
use personachat_types::error::{ChatError, RepositoryError};
use personachat_types::llm::CompletionRequest;
use tracing::{info, warn};
use uuid::Uuid;

use crate::llm::provider::LlmProvider;
use crate::repository::character::CharacterRepository;
use crate::repository::conversation::ConversationRepository;
use crate::service::character::CharacterLookup;
use crate::service::conversation::ConversationRecorder;

/// Parameters applied to every completion request.
#[derive(Debug, Clone)]
pub struct CompletionSettings {
    pub max_tokens: u32,
    pub temperature: Option<f64>,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            max_tokens: 150,
            temperature: None,
        }
    }
}

/// Handles chat requests end to end.
///
/// Generic over the repositories and the provider to maintain clean
/// architecture (personachat-core never depends on personachat-infra).
pub struct ChatService<C: CharacterRepository, V: ConversationRepository, L: LlmProvider> {
    characters: CharacterLookup<C>,
    recorder: ConversationRecorder<V>,
    llm: L,
    settings: CompletionSettings,
}

impl<C, V, L> ChatService<C, V, L>
where
    C: CharacterRepository,
    V: ConversationRepository,
    L: LlmProvider,
{
    pub fn new(character_repo: C, conversation_repo: V, llm: L, settings: CompletionSettings) -> Self {
        Self {
            characters: CharacterLookup::new(character_repo),
            recorder: ConversationRecorder::new(conversation_repo),
            llm,
            settings,
        }
    }

    pub fn recorder(&self) -> &ConversationRecorder<V> {
        &self.recorder
    }

    /// Handle one inbound request.
    ///
    /// Validation failures return before any store access. A missing
    /// character is `ChatError::CharacterNotFound`; store and provider
    /// failures propagate unchanged. The conversation is written only after
    /// the completion succeeds.
    pub async fn handle(&self, request: ChatRequest) -> Result<ChatReply, ChatError> {
        let request = request.validate()?;
        let start = Instant::now();

        let character = self
            .characters
            .get_character(&request.character_id)
            .await?
            .ok_or_else(|| ChatError::CharacterNotFound(request.character_id.clone()))?;

        let completion = CompletionRequest::persona(
            &character.prompt_template,
            &request.message,
            self.settings.max_tokens,
            self.settings.temperature,
        );

        let response = self.llm.complete(&completion).await.inspect_err(|e| {
            warn!(
                provider = self.llm.name(),
                character_id = %request.character_id,
                error = %e,
                "Completion failed"
            );
        })?;
        let reply = response.content.trim().to_string();

        let session_id = self
            .recorder
            .record_conversation(
                &request.user_id,
                &request.character_id,
                &request.message,
                &reply,
            )
            .await?;

        let execution_time = start.elapsed().as_secs_f64();
        info!(
            session_id = %session_id,
            provider = self.llm.name(),
            model = %response.model,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            execution_time,
            "Chat handled"
        );

        Ok(ChatReply::success(session_id, reply, execution_time))
    }

    /// Read back a recorded conversation.
    pub async fn conversation(
        &self,
        session_id: &Uuid,
    ) -> Result<Option<Conversation>, RepositoryError> {
        self.recorder.repo().get_by_id(session_id).await
    }

    /// List a user's conversations, newest first.
    pub async fn conversations_for_user(
        &self,
        user_id: &str,
        limit: Option<i64>,
    ) -> Result<Vec<Conversation>, RepositoryError> {
        self.recorder.repo().list_by_user(user_id, limit).await
    }
}
