//! Repository for the `article_files` table.

use folio_core::types::DbId;
use sqlx::PgPool;

/// Provides CRUD operations for stored file metadata.
pub struct ArticleFileRepo;

impl ArticleFileRepo {
    /// Register a stored file, returning the generated ID.
    pub async fn create(
        pool: &PgPool,
        article_id: DbId,
        file_name: &str,
        content_type: &str,
        size: i64,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO article_files (article_id, file_name, content_type, size) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id",
        )
        .bind(article_id)
        .bind(file_name)
        .bind(content_type)
        .bind(size)
        .fetch_one(pool)
        .await
    }

    /// Remove a file record. Returns `false` when no row matched.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM article_files WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
