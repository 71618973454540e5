//! Conversation read HTTP handlers.
//!
//! Endpoints:
//! - GET /api/v1/conversations/{session_id}        - Get a recorded exchange
//! - GET /api/v1/users/{user_id}/conversations     - List a user's exchanges

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use personachat_types::conversation::Conversation;

use crate::http::error::AppError;
use crate::state::AppState;

/// Query parameters for conversation listing.
#[derive(Debug, Deserialize)]
pub struct ConversationListQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    50
}

/// Parse a UUID from a path parameter, returning a 400 error on invalid format.
fn parse_uuid(s: &str) -> Result<Uuid, AppError> {
    s.parse::<Uuid>()
        .map_err(|_| AppError::Validation(format!("Invalid UUID: {s}")))
}

/// GET /api/v1/conversations/{session_id}
pub async fn get_conversation(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Conversation>, AppError> {
    let session_id = parse_uuid(&session_id)?;

    let conversation = state
        .chat_service
        .conversation(&session_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("conversation not found: {session_id}")))?;

    Ok(Json(conversation))
}

/// GET /api/v1/users/{user_id}/conversations
pub async fn list_user_conversations(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<ConversationListQuery>,
) -> Result<Json<Vec<Conversation>>, AppError> {
    if query.limit < 1 {
        return Err(AppError::Validation("limit must be at least 1".to_string()));
    }

    let conversations = state
        .chat_service
        .conversations_for_user(&user_id, Some(query.limit))
        .await?;

    Ok(Json(conversations))
}
