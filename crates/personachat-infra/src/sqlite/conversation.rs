//! SQLite conversation repository implementation.
//!
//! Implements `ConversationRepository` from `personachat-core`. The message
//! pair is stored as a JSON array in the same row as the record, so one
//! INSERT writes everything or nothing.

use personachat_core::repository::conversation::ConversationRepository;
use personachat_types::conversation::{Conversation, ConversationMessage};
use personachat_types::error::RepositoryError;
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ConversationRepository`.
pub struct SqliteConversationRepository {
    pool: DatabasePool,
}

impl SqliteConversationRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row type for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct ConversationRow {
    session_id: String,
    user_id: String,
    character_id: String,
    messages: String,
    created_at: i64,
    updated_at: i64,
}

impl ConversationRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            session_id: row.try_get("session_id")?,
            user_id: row.try_get("user_id")?,
            character_id: row.try_get("character_id")?,
            messages: row.try_get("messages")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_conversation(self) -> Result<Conversation, RepositoryError> {
        let session_id = Uuid::parse_str(&self.session_id)
            .map_err(|e| RepositoryError::Query(format!("invalid session_id: {e}")))?;
        let messages: Vec<ConversationMessage> = serde_json::from_str(&self.messages)
            .map_err(|e| RepositoryError::Query(format!("invalid messages JSON: {e}")))?;

        Ok(Conversation {
            session_id,
            user_id: self.user_id,
            character_id: self.character_id,
            messages,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn rows_into_conversations(
    rows: &[sqlx::sqlite::SqliteRow],
) -> Result<Vec<Conversation>, RepositoryError> {
    let mut conversations = Vec::with_capacity(rows.len());
    for row in rows {
        let conversation_row =
            ConversationRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
        conversations.push(conversation_row.into_conversation()?);
    }
    Ok(conversations)
}

// ---------------------------------------------------------------------------
// ConversationRepository implementation
// ---------------------------------------------------------------------------

impl ConversationRepository for SqliteConversationRepository {
    async fn insert(&self, conversation: &Conversation) -> Result<(), RepositoryError> {
        let messages = serde_json::to_string(&conversation.messages)
            .map_err(|e| RepositoryError::Query(format!("failed to serialize messages: {e}")))?;

        let result = sqlx::query(
            r#"INSERT INTO conversations
                   (session_id, user_id, character_id, messages, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(conversation.session_id.to_string())
        .bind(&conversation.user_id)
        .bind(&conversation.character_id)
        .bind(&messages)
        .bind(conversation.created_at)
        .bind(conversation.updated_at)
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => {
                Err(RepositoryError::Conflict(format!(
                    "session '{}' already exists",
                    conversation.session_id
                )))
            }
            Err(e) => Err(RepositoryError::Query(e.to_string())),
        }
    }

    async fn get_by_id(&self, session_id: &Uuid) -> Result<Option<Conversation>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM conversations WHERE session_id = ?")
            .bind(session_id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let conversation_row = ConversationRow::from_row(&row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(conversation_row.into_conversation()?))
            }
            None => Ok(None),
        }
    }

    async fn list_by_user(
        &self,
        user_id: &str,
        limit: Option<i64>,
    ) -> Result<Vec<Conversation>, RepositoryError> {
        // rowid breaks ties between records created within the same second.
        let rows = sqlx::query(
            "SELECT * FROM conversations WHERE user_id = ? ORDER BY created_at DESC, rowid DESC LIMIT ?",
        )
        .bind(user_id)
        .bind(limit.unwrap_or(-1))
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows_into_conversations(&rows)
    }
}
