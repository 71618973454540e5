//! Character repository trait definition.

use personachat_types::character::Character;
use personachat_types::error::RepositoryError;

/// Read-only access to persona records.
///
/// Implementations live in personachat-infra (e.g., SqliteCharacterRepository).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait CharacterRepository: Send + Sync {
    /// Point read by primary key. Absence is `Ok(None)`.
    fn get_by_id(
        &self,
        character_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Character>, RepositoryError>> + Send;
}
