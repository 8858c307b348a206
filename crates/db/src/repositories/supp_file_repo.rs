//! Repository for the `supp_files` table.
//!
//! Every method is scoped by `article_id`: a supplementary file is only
//! ever visible through the article it belongs to, so cross-article access
//! fails closed at the query level.

use folio_core::types::{DbId, LocalizedText};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::supp_file::{SuppFile, SuppFileFields};

/// Column list shared across `supp_files` queries.
const COLUMNS: &str = "id, article_id, file_id, title, creator, description, \
     type_tag, language, created_at, updated_at";

/// Provides CRUD operations for supplementary files.
pub struct SuppFileRepo;

impl SuppFileRepo {
    /// Find a supplementary file scoped to its owning article.
    pub async fn find_for_article(
        pool: &PgPool,
        id: DbId,
        article_id: DbId,
    ) -> Result<Option<SuppFile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM supp_files WHERE id = $1 AND article_id = $2");
        sqlx::query_as::<_, SuppFile>(&query)
            .bind(id)
            .bind(article_id)
            .fetch_optional(pool)
            .await
    }

    /// List an article's supplementary files, oldest first.
    pub async fn list_for_article(
        pool: &PgPool,
        article_id: DbId,
    ) -> Result<Vec<SuppFile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM supp_files WHERE article_id = $1 ORDER BY id ASC");
        sqlx::query_as::<_, SuppFile>(&query)
            .bind(article_id)
            .fetch_all(pool)
            .await
    }

    /// Create a new record with the given title, returning the generated ID.
    pub async fn create(
        pool: &PgPool,
        article_id: DbId,
        title: &LocalizedText,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO supp_files (article_id, title) VALUES ($1, $2) RETURNING id",
        )
        .bind(article_id)
        .bind(Json(title))
        .fetch_one(pool)
        .await
    }

    /// Update the editable fields of a record scoped to its article.
    ///
    /// Returns `false` if no such record exists for the article.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        article_id: DbId,
        fields: &SuppFileFields,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE supp_files SET title = $3, creator = $4, description = $5, \
             type_tag = $6, language = $7, updated_at = NOW() \
             WHERE id = $1 AND article_id = $2",
        )
        .bind(id)
        .bind(article_id)
        .bind(Json(&fields.title))
        .bind(Json(&fields.creator))
        .bind(Json(&fields.description))
        .bind(&fields.type_tag)
        .bind(&fields.language)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Attach an uploaded binary to a record.
    pub async fn set_file(
        pool: &PgPool,
        id: DbId,
        article_id: DbId,
        file_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE supp_files SET file_id = $3, updated_at = NOW() \
             WHERE id = $1 AND article_id = $2",
        )
        .bind(id)
        .bind(article_id)
        .bind(file_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a record scoped to its article.
    ///
    /// Returns the deleted row's `file_id` (outer `None` when no row
    /// matched) so the caller can remove the stored binary afterwards.
    pub async fn delete(
        pool: &PgPool,
        id: DbId,
        article_id: DbId,
    ) -> Result<Option<Option<DbId>>, sqlx::Error> {
        sqlx::query_scalar(
            "DELETE FROM supp_files WHERE id = $1 AND article_id = $2 RETURNING file_id",
        )
        .bind(id)
        .bind(article_id)
        .fetch_optional(pool)
        .await
    }
}
