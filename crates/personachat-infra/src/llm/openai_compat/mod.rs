//! OpenAI-compatible LLM provider implementation.
//!
//! Uses [`async_openai`] for type-safe request/response handling. The base
//! URL selects the backend, so OpenAI and any compatible gateway share this
//! code.

pub mod config;

use async_openai::config::OpenAIConfig;
use async_openai::error::OpenAIError;
use async_openai::types::chat::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest, FinishReason,
};
use async_openai::Client;
use secrecy::ExposeSecret;

use personachat_core::llm::provider::LlmProvider;
use personachat_types::llm::{CompletionRequest, CompletionResponse, LlmError, Usage};

use self::config::OpenAiCompatConfig;

/// Provider for any OpenAI-compatible chat completions API.
///
/// Does NOT derive Debug: the `async_openai::Client` holds the API key.
pub struct OpenAiCompatibleProvider {
    client: Client<OpenAIConfig>,
    provider_name: String,
    model: String,
}

impl OpenAiCompatibleProvider {
    pub fn new(config: OpenAiCompatConfig) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.api_key.expose_secret())
            .with_api_base(&config.base_url);

        Self {
            client: Client::with_config(openai_config),
            provider_name: config.provider_name,
            model: config.model,
        }
    }

    /// Persona prompt as the system message, the caller's text as the only
    /// user message.
    fn build_request(&self, request: &CompletionRequest) -> CreateChatCompletionRequest {
        let system = ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
            content: ChatCompletionRequestSystemMessageContent::Text(request.system.clone()),
            name: None,
        });
        let user = ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
            content: ChatCompletionRequestUserMessageContent::Text(request.user.clone()),
            name: None,
        });

        let model = if request.model.is_empty() {
            self.model.clone()
        } else {
            request.model.clone()
        };

        CreateChatCompletionRequest {
            model,
            messages: vec![system, user],
            max_completion_tokens: Some(request.max_tokens),
            temperature: request.temperature.map(|t| t as f32),
            ..Default::default()
        }
    }
}

impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.provider_name
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let response = self
            .client
            .chat()
            .create(self.build_request(request))
            .await
            .map_err(map_openai_error)?;

        let Some(choice) = response.choices.first() else {
            return Err(LlmError::Deserialization(
                "response contained no choices".to_string(),
            ));
        };

        if matches!(choice.finish_reason, Some(FinishReason::Length)) {
            tracing::debug!(
                provider = %self.provider_name,
                max_tokens = request.max_tokens,
                "Reply truncated at max_tokens"
            );
        }

        let usage = response
            .usage
            .as_ref()
            .map(|u| Usage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            })
            .unwrap_or_default();

        Ok(CompletionResponse {
            content: choice.message.content.clone().unwrap_or_default(),
            model: response.model.clone(),
            usage,
        })
    }
}

/// Map an `async_openai` error to an [`LlmError`], keeping the upstream
/// message text.
fn map_openai_error(err: OpenAIError) -> LlmError {
    match &err {
        OpenAIError::ApiError(api_err) => {
            let code = api_err.code.as_deref().unwrap_or("");
            let kind = api_err.r#type.as_deref().unwrap_or("");
            let message = api_err.message.clone();

            match (code, kind) {
                (_, "authentication_error") | ("invalid_api_key", _) => {
                    LlmError::AuthenticationFailed(message)
                }
                ("rate_limit_exceeded", _) | (_, "rate_limit_error") => {
                    LlmError::RateLimited(message)
                }
                ("context_length_exceeded", _) => LlmError::ContextLengthExceeded(message),
                ("server_error", _) | (_, "overloaded_error") => LlmError::Overloaded(message),
                _ => LlmError::Provider {
                    message: err.to_string(),
                },
            }
        }
        OpenAIError::Reqwest(reqwest_err) => match reqwest_err.status().map(|s| s.as_u16()) {
            Some(401) => LlmError::AuthenticationFailed(err.to_string()),
            Some(429) => LlmError::RateLimited(err.to_string()),
            Some(503) | Some(529) => LlmError::Overloaded(err.to_string()),
            _ => LlmError::Provider {
                message: err.to_string(),
            },
        },
        OpenAIError::JSONDeserialize(_, content) => {
            LlmError::Deserialization(format!("failed to parse response: {content}"))
        }
        OpenAIError::InvalidArgument(msg) => LlmError::InvalidRequest(msg.clone()),
        _ => LlmError::Provider {
            message: err.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_openai::error::ApiError;
    use personachat_types::config::LlmSettings;
    use secrecy::SecretString;

    fn provider() -> OpenAiCompatibleProvider {
        OpenAiCompatibleProvider::new(OpenAiCompatConfig::from_settings(
            &LlmSettings::default(),
            SecretString::from("sk-test".to_string()),
        ))
    }

    fn api_error(message: &str, kind: Option<&str>, code: Option<&str>) -> OpenAIError {
        OpenAIError::ApiError(ApiError {
            message: message.to_string(),
            r#type: kind.map(str::to_string),
            param: None,
            code: code.map(str::to_string),
        })
    }

    #[test]
    fn test_provider_name_and_model() {
        let provider = provider();
        assert_eq!(provider.name(), "openai");
        assert_eq!(provider.model, "gpt-3.5-turbo");
    }

    #[test]
    fn test_build_request_is_system_then_user() {
        let provider = provider();
        let request =
            CompletionRequest::persona("You are a helpful pirate.", "Hello", 150, Some(0.7));

        let oai_req = provider.build_request(&request);
        assert_eq!(oai_req.model, "gpt-3.5-turbo");
        assert_eq!(oai_req.messages.len(), 2);
        assert!(matches!(
            &oai_req.messages[0],
            ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
                content: ChatCompletionRequestSystemMessageContent::Text(text),
                ..
            }) if text == "You are a helpful pirate."
        ));
        assert!(matches!(
            &oai_req.messages[1],
            ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                content: ChatCompletionRequestUserMessageContent::Text(text),
                ..
            }) if text == "Hello"
        ));
        assert_eq!(oai_req.max_completion_tokens, Some(150));
        assert_eq!(oai_req.temperature, Some(0.7_f32));
        assert!(oai_req.stream.is_none());
    }

    #[test]
    fn test_build_request_explicit_model_wins() {
        let provider = provider();
        let mut request = CompletionRequest::persona("sys", "hi", 10, None);
        request.model = "gpt-4o-mini".to_string();

        let oai_req = provider.build_request(&request);
        assert_eq!(oai_req.model, "gpt-4o-mini");
        assert!(oai_req.temperature.is_none());
    }

    #[test]
    fn test_map_auth_error_keeps_message() {
        let err = map_openai_error(api_error(
            "Incorrect API key provided: sk-te**",
            Some("authentication_error"),
            None,
        ));
        assert!(matches!(err, LlmError::AuthenticationFailed(_)));
        assert_eq!(
            err.to_string(),
            "authentication failed: Incorrect API key provided: sk-te**"
        );
    }

    #[test]
    fn test_map_rate_limit_keeps_message() {
        let err = map_openai_error(api_error(
            "Rate limit reached for gpt-3.5-turbo",
            Some("requests"),
            Some("rate_limit_exceeded"),
        ));
        assert!(matches!(err, LlmError::RateLimited(ref m) if m == "Rate limit reached for gpt-3.5-turbo"));
    }

    #[test]
    fn test_map_context_length_keeps_message() {
        let err = map_openai_error(api_error(
            "This model's maximum context length is 4097 tokens",
            Some("invalid_request_error"),
            Some("context_length_exceeded"),
        ));
        assert!(err.to_string().contains("maximum context length is 4097"));
    }

    #[test]
    fn test_map_invalid_argument() {
        let err = map_openai_error(OpenAIError::InvalidArgument("bad arg".to_string()));
        assert!(matches!(err, LlmError::InvalidRequest(ref m) if m == "bad arg"));
    }
}
