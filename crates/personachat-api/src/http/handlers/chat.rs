//! Chat HTTP handler.
//!
//! Endpoint:
//! - POST /api/v1/chat - Run one persona exchange and record it

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use personachat_types::chat::{ChatReply, ChatRequest};

use crate::http::error::AppError;
use crate::state::AppState;

/// POST /api/v1/chat
///
/// A body that is not valid JSON for `ChatRequest` is a 400 like any other
/// validation failure.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let reply = state.chat_service.handle(request).await?;
    Ok(Json(reply))
}
