//! Configuration for the OpenAI-compatible provider.

use personachat_types::config::LlmSettings;
use secrecy::SecretString;

/// Configuration for an OpenAI-compatible LLM provider.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`].
pub struct OpenAiCompatConfig {
    /// Human-readable provider name (e.g., "openai").
    pub provider_name: String,
    /// Base URL for the API (e.g., "https://api.openai.com/v1").
    pub base_url: String,
    pub api_key: SecretString,
    /// Default model when a request does not name one.
    pub model: String,
}

impl OpenAiCompatConfig {
    pub fn from_settings(settings: &LlmSettings, api_key: SecretString) -> Self {
        Self {
            provider_name: settings.provider_name.clone(),
            base_url: settings.base_url.clone(),
            api_key,
            model: settings.model.clone(),
        }
    }
}
