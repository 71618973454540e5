//! LLM request/response types.
//!
//! These types model the data shapes for a single, non-streaming completion:
//! a system instruction plus one user message in, one text reply out.

use serde::{Deserialize, Serialize};

/// Request to an LLM provider for a completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Empty means "use the provider's configured model".
    pub model: String,
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

impl CompletionRequest {
    /// A persona turn: `system` as the instruction, `user` as the only message.
    pub fn persona(system: &str, user: &str, max_tokens: u32, temperature: Option<f64>) -> Self {
        Self {
            model: String::new(),
            system: system.to_string(),
            user: user.to_string(),
            max_tokens,
            temperature,
        }
    }
}

/// Response from an LLM provider for a non-streaming completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub content: String,
    /// Model that actually served the request.
    pub model: String,
    pub usage: Usage,
}

/// Token usage for a completion request/response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Errors from LLM provider operations.
///
/// Variants mapped from an upstream API error keep its message text.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("provider overloaded: {0}")]
    Overloaded(String),

    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("context length exceeded: {0}")]
    ContextLengthExceeded(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}
