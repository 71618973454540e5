use thiserror::Error;

use crate::llm::LlmError;

/// Errors from repository operations (used by trait definitions in personachat-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors from handling a chat request.
///
/// `Validation` and `CharacterNotFound` are client-caused; the rest are
/// infrastructure failures surfaced with their message text.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("{0}")]
    Validation(String),

    #[error("character not found: {0}")]
    CharacterNotFound(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Llm(#[from] LlmError),
}

impl ChatError {
    /// True for failures caused by the store or the completion call.
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, ChatError::Repository(_) | ChatError::Llm(_))
    }
}
