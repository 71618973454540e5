//! SQLite character repository implementation.
//!
//! Implements `CharacterRepository` from `personachat-core`. The chat path
//! only reads; `upsert` exists for operators seeding personas.

use chrono::Utc;
use personachat_core::repository::character::CharacterRepository;
use personachat_types::character::Character;
use personachat_types::error::RepositoryError;
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `CharacterRepository`.
pub struct SqliteCharacterRepository {
    pool: DatabasePool,
}

impl SqliteCharacterRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Insert or replace a character, stamping `updated_at` with the
    /// current time. Returns the stored record.
    pub async fn upsert(
        &self,
        character_id: &str,
        prompt_template: &str,
        name: &str,
    ) -> Result<Character, RepositoryError> {
        if character_id.is_empty() {
            return Err(RepositoryError::Query("character_id must not be empty".to_string()));
        }

        let now = Utc::now().timestamp();

        sqlx::query(
            r#"INSERT INTO characters (character_id, prompt_template, name, updated_at)
               VALUES (?, ?, ?, ?)
               ON CONFLICT (character_id) DO UPDATE SET
                   prompt_template = excluded.prompt_template,
                   name = excluded.name,
                   updated_at = excluded.updated_at"#,
        )
        .bind(character_id)
        .bind(prompt_template)
        .bind(name)
        .bind(now)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(Character {
            character_id: character_id.to_string(),
            prompt_template: prompt_template.to_string(),
            name: name.to_string(),
            updated_at: now,
        })
    }
}

/// Internal row type for mapping SQLite rows to domain Character.
struct CharacterRow {
    character_id: String,
    prompt_template: String,
    name: String,
    updated_at: i64,
}

impl CharacterRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            character_id: row.try_get("character_id")?,
            prompt_template: row.try_get("prompt_template")?,
            name: row.try_get("name")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_character(self) -> Character {
        Character {
            character_id: self.character_id,
            prompt_template: self.prompt_template,
            name: self.name,
            updated_at: self.updated_at,
        }
    }
}

impl CharacterRepository for SqliteCharacterRepository {
    async fn get_by_id(&self, character_id: &str) -> Result<Option<Character>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM characters WHERE character_id = ?")
            .bind(character_id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let character_row = CharacterRow::from_row(&row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(character_row.into_character()))
            }
            None => Ok(None),
        }
    }
}
