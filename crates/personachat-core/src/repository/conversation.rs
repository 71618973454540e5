//! ConversationRepository trait definition.

use personachat_types::conversation::Conversation;
use personachat_types::error::RepositoryError;
use uuid::Uuid;

/// Repository trait for conversation persistence.
///
/// Records are insert-only: there is no update or delete path.
pub trait ConversationRepository: Send + Sync {
    /// Insert a new record in a single atomic write.
    ///
    /// Must never overwrite: an existing `session_id` yields
    /// `RepositoryError::Conflict`.
    fn insert(
        &self,
        conversation: &Conversation,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Get a conversation by session ID, messages in stored order.
    fn get_by_id(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<Conversation>, RepositoryError>> + Send;

    /// List a user's conversations, newest first.
    fn list_by_user(
        &self,
        user_id: &str,
        limit: Option<i64>,
    ) -> impl std::future::Future<Output = Result<Vec<Conversation>, RepositoryError>> + Send;
}
