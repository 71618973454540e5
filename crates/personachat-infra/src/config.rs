//! Service configuration loader.
//!
//! Reads `config.toml` from the data directory (`~/.personachat/` in
//! production) and deserializes it into [`ServiceConfig`]. Falls back to
//! defaults when the file is missing or malformed. The API key itself never
//! lives in the file: it is read from the environment variable the config
//! names.

use std::path::{Path, PathBuf};

use personachat_types::config::{LlmSettings, ServiceConfig};
use secrecy::SecretString;

/// Errors raised while assembling runtime configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("API key not set: export {var} before starting")]
    MissingApiKey { var: String },
}

/// Resolve the data directory.
///
/// `PERSONACHAT_DATA_DIR` wins; otherwise `~/.personachat`, falling back to
/// `./.personachat` when no home directory is known.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("PERSONACHAT_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".personachat");
    }

    PathBuf::from(".personachat")
}

/// SQLite URL for the database inside `data_dir`, created on first open.
pub fn database_url(data_dir: &Path) -> String {
    format!(
        "sqlite://{}?mode=rwc",
        data_dir.join("personachat.db").display()
    )
}

/// Load configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`ServiceConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - Otherwise returns the parsed config.
pub async fn load_service_config(data_dir: &Path) -> ServiceConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return ServiceConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ServiceConfig::default();
        }
    };

    match toml::from_str::<ServiceConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ServiceConfig::default()
        }
    }
}

/// Read the API key from the environment variable named by `api_key_env`.
pub fn resolve_api_key(settings: &LlmSettings) -> Result<SecretString, ConfigError> {
    resolve_api_key_with(settings, |var| std::env::var(var).ok())
}

fn resolve_api_key_with(
    settings: &LlmSettings,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<SecretString, ConfigError> {
    lookup(&settings.api_key_env)
        .filter(|key| !key.trim().is_empty())
        .map(SecretString::from)
        .ok_or_else(|| ConfigError::MissingApiKey {
            var: settings.api_key_env.clone(),
        })
}
