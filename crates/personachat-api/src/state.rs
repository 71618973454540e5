//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and REST API.
//! ChatService is generic over its repositories and provider; AppState pins it
//! to the SQLite repositories and the boxed provider built from config.

use std::path::Path;
use std::sync::Arc;

use personachat_core::chat::service::{ChatService, CompletionSettings};
use personachat_core::llm::box_provider::BoxLlmProvider;
use personachat_infra::config::database_url;
use personachat_infra::llm::build_provider;
use personachat_infra::sqlite::character::SqliteCharacterRepository;
use personachat_infra::sqlite::conversation::SqliteConversationRepository;
use personachat_infra::sqlite::pool::DatabasePool;
use personachat_types::config::ServiceConfig;

/// ChatService pinned to the infra implementations.
pub type ConcreteChatService =
    ChatService<SqliteCharacterRepository, SqliteConversationRepository, BoxLlmProvider>;

/// Shared application state.
///
/// Used by both the `chat` CLI command and the REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
}

impl AppState {
    /// Wire the chat service over an open pool and an already-built provider.
    pub fn new(db_pool: DatabasePool, llm: BoxLlmProvider, settings: CompletionSettings) -> Self {
        let chat_service = ChatService::new(
            SqliteCharacterRepository::new(db_pool.clone()),
            SqliteConversationRepository::new(db_pool),
            llm,
            settings,
        );

        Self {
            chat_service: Arc::new(chat_service),
        }
    }

    /// Initialize the application state: open the DB, build the provider.
    ///
    /// Fails when the API key environment variable is unset.
    pub async fn init(data_dir: &Path, config: &ServiceConfig) -> anyhow::Result<Self> {
        let db_pool = open_database(data_dir).await?;
        let llm = build_provider(&config.llm)?;

        let settings = CompletionSettings {
            max_tokens: config.llm.max_tokens,
            temperature: config.llm.temperature,
        };

        Ok(Self::new(db_pool, llm, settings))
    }
}

/// Create the data directory if needed and open the database.
///
/// Admin commands use this directly since they need no provider.
pub async fn open_database(data_dir: &Path) -> anyhow::Result<DatabasePool> {
    tokio::fs::create_dir_all(data_dir).await?;
    let db_pool = DatabasePool::new(&database_url(data_dir)).await?;
    Ok(db_pool)
}
