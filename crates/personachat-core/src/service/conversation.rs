//! Conversation recorder.
//!
//! Every call writes a brand-new record under a freshly generated random
//! session ID. There is no append path: the same user talking to the same
//! character twice yields two independent records.

use chrono::Utc;
use personachat_types::conversation::Conversation;
use personachat_types::error::RepositoryError;
use tracing::info;
use uuid::Uuid;

use crate::repository::conversation::ConversationRepository;

/// Persists one user/character exchange per call.
pub struct ConversationRecorder<R: ConversationRepository> {
    repo: R,
}

impl<R: ConversationRepository> ConversationRecorder<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Access the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Record an exchange and return its new session ID.
    ///
    /// One `now` (seconds since the epoch) stamps both messages as well as
    /// `created_at` and `updated_at`. The record is written with a single
    /// insert; a failure leaves nothing behind.
    pub async fn record_conversation(
        &self,
        user_id: &str,
        character_id: &str,
        user_message: &str,
        character_message: &str,
    ) -> Result<Uuid, RepositoryError> {
        let session_id = Uuid::new_v4();
        let now = Utc::now().timestamp();

        let conversation = Conversation::exchange(
            session_id,
            user_id,
            character_id,
            user_message,
            character_message,
            now,
        );

        self.repo.insert(&conversation).await?;

        info!(
            session_id = %session_id,
            user_id,
            character_id,
            "Conversation recorded"
        );
        Ok(session_id)
    }
}
