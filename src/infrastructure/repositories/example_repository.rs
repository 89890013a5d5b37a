use crate::infrastructure::db::DbPool;
use crate::{domain::examples::AudioExample, error::AppResult};
use std::sync::Arc;

pub struct ExampleRepository {
    pool: Arc<DbPool>,
}

impl ExampleRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Get all examples, oldest first
    pub async fn find_all(&self) -> AppResult<Vec<AudioExample>> {
        let pool = self.pool.as_ref();
        let examples = sqlx::query_as::<_, AudioExample>(
            r#"
            SELECT id, description, filename, language
            FROM audio_examples
            ORDER BY id ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(examples)
    }

    /// Get an example by ID
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<AudioExample>> {
        let pool = self.pool.as_ref();
        let example = sqlx::query_as::<_, AudioExample>(
            r#"
            SELECT id, description, filename, language
            FROM audio_examples
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(example)
    }

    /// Insert a row and return it with its assigned ID
    pub async fn create(
        &self,
        description: &str,
        filename: &str,
        language: &str,
    ) -> AppResult<AudioExample> {
        let pool = self.pool.as_ref();
        let result = sqlx::query(
            r#"
            INSERT INTO audio_examples (description, filename, language)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(description)
        .bind(filename)
        .bind(language)
        .execute(pool)
        .await?;

        Ok(AudioExample {
            id: result.last_insert_rowid(),
            description: description.to_string(),
            filename: filename.to_string(),
            language: language.to_string(),
        })
    }

    /// Delete an example
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let pool = self.pool.as_ref();
        let result = sqlx::query(
            r#"
            DELETE FROM audio_examples
            WHERE id = ?
            "#,
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
