//! LLM provider implementations.
//!
//! A single OpenAI-compatible client covers OpenAI itself and any endpoint
//! speaking the same chat completions protocol (selected by base URL).

pub mod openai_compat;

use personachat_core::llm::box_provider::BoxLlmProvider;
use personachat_types::config::LlmSettings;

use crate::config::{resolve_api_key, ConfigError};
use self::openai_compat::config::OpenAiCompatConfig;
use self::openai_compat::OpenAiCompatibleProvider;

/// Build the configured provider, reading its API key from the environment.
pub fn build_provider(settings: &LlmSettings) -> Result<BoxLlmProvider, ConfigError> {
    let api_key = resolve_api_key(settings)?;
    let config = OpenAiCompatConfig::from_settings(settings, api_key);

    tracing::info!(
        provider = %config.provider_name,
        base_url = %config.base_url,
        model = %config.model,
        "LLM provider configured"
    );

    Ok(BoxLlmProvider::new(OpenAiCompatibleProvider::new(config)))
}
