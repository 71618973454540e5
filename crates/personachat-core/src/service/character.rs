//! Character lookup service.

use personachat_types::character::Character;
use personachat_types::error::RepositoryError;
use tracing::debug;

use crate::repository::character::CharacterRepository;

/// Resolves persona records by identifier.
pub struct CharacterLookup<R: CharacterRepository> {
    repo: R,
}

impl<R: CharacterRepository> CharacterLookup<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Access the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Fetch a character by ID.
    ///
    /// Returns `Ok(None)` when no record exists; an empty ID can never match
    /// a record and short-circuits without touching the store. Only store
    /// failures are errors.
    pub async fn get_character(
        &self,
        character_id: &str,
    ) -> Result<Option<Character>, RepositoryError> {
        if character_id.is_empty() {
            return Ok(None);
        }

        let character = self.repo.get_by_id(character_id).await?;
        debug!(
            character_id,
            found = character.is_some(),
            "Character lookup"
        );
        Ok(character)
    }
}
