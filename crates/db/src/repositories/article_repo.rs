//! Repository for the `articles`, `authors`, and `galleys` tables.

use folio_core::authors::AuthorEntry;
use folio_core::submission::SubmissionStatus;
use folio_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::article::{Article, ArticleMetadata, Author, Galley};

/// Column list shared across `articles` queries.
const COLUMNS: &str = "id, journal_id, user_id, section_id, issue_id, status, \
     submission_progress, submission_file_id, primary_contact, title, abstract_text, \
     subject, sponsor, coverage, article_type, language, pages, comments_to_editor, \
     created_at, updated_at";

/// Provides CRUD operations for articles and their author sequence.
pub struct ArticleRepo;

impl ArticleRepo {
    /// Find an article by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Article>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM articles WHERE id = $1");
        sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Create a new article at wizard step 1, owned by `user_id`.
    ///
    /// The new row starts with `submission_progress = 1` and status
    /// `in_progress`.
    pub async fn create(
        pool: &PgPool,
        journal_id: DbId,
        user_id: DbId,
        metadata: &ArticleMetadata,
    ) -> Result<Article, sqlx::Error> {
        let query = format!(
            "INSERT INTO articles \
             (journal_id, user_id, section_id, submission_progress, title, abstract_text, \
              subject, sponsor, coverage, article_type, language, pages) \
             VALUES ($1, $2, $3, 1, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(journal_id)
            .bind(user_id)
            .bind(metadata.section_id)
            .bind(Json(&metadata.title))
            .bind(Json(&metadata.abstract_text))
            .bind(Json(&metadata.subject))
            .bind(Json(&metadata.sponsor))
            .bind(Json(&metadata.coverage))
            .bind(Json(&metadata.article_type))
            .bind(&metadata.language)
            .bind(&metadata.pages)
            .fetch_one(pool)
            .await
    }

    /// Overwrite the step-1 metadata fields of an existing article.
    pub async fn update_metadata(
        pool: &PgPool,
        id: DbId,
        metadata: &ArticleMetadata,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE articles SET section_id = $2, title = $3, abstract_text = $4, \
             subject = $5, sponsor = $6, coverage = $7, article_type = $8, \
             language = $9, pages = $10, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(metadata.section_id)
        .bind(Json(&metadata.title))
        .bind(Json(&metadata.abstract_text))
        .bind(Json(&metadata.subject))
        .bind(Json(&metadata.sponsor))
        .bind(Json(&metadata.coverage))
        .bind(Json(&metadata.article_type))
        .bind(&metadata.language)
        .bind(&metadata.pages)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Raise the progress high-water mark after a successful step save.
    ///
    /// `GREATEST` keeps re-saves of earlier steps from losing progress.
    pub async fn bump_progress(pool: &PgPool, id: DbId, step: i32) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE articles \
             SET submission_progress = GREATEST(submission_progress, $2), updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(step)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Set the lifecycle status.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: SubmissionStatus,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE articles SET status = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Attach the primary manuscript file.
    pub async fn set_submission_file(
        pool: &PgPool,
        id: DbId,
        file_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE articles SET submission_file_id = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(file_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Store the author's confirmation-step comments to the editor.
    pub async fn set_comments_to_editor(
        pool: &PgPool,
        id: DbId,
        comments: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE articles SET comments_to_editor = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(comments)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// The article's author sequence, ordered by `seq`.
    pub async fn list_authors(pool: &PgPool, article_id: DbId) -> Result<Vec<Author>, sqlx::Error> {
        sqlx::query_as::<_, Author>(
            "SELECT id, article_id, seq, first_name, last_name, affiliation, email \
             FROM authors WHERE article_id = $1 ORDER BY seq ASC",
        )
        .bind(article_id)
        .fetch_all(pool)
        .await
    }

    /// Persist the edited author sequence from wizard step 3.
    ///
    /// Entries carrying an `author_id` are updated in place, new entries
    /// inserted, and ids in `deleted` purged -- all in one transaction.
    /// The primary-contact index is stored on the article row.
    pub async fn replace_authors(
        pool: &PgPool,
        article_id: DbId,
        entries: &[AuthorEntry],
        primary_contact: usize,
        deleted: &[DbId],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        for id in deleted {
            sqlx::query("DELETE FROM authors WHERE id = $1 AND article_id = $2")
                .bind(id)
                .bind(article_id)
                .execute(&mut *tx)
                .await?;
        }

        for (seq, entry) in entries.iter().enumerate() {
            match entry.author_id {
                Some(id) => {
                    sqlx::query(
                        "UPDATE authors SET seq = $3, first_name = $4, last_name = $5, \
                         affiliation = $6, email = $7 \
                         WHERE id = $1 AND article_id = $2",
                    )
                    .bind(id)
                    .bind(article_id)
                    .bind(seq as i32)
                    .bind(&entry.first_name)
                    .bind(&entry.last_name)
                    .bind(&entry.affiliation)
                    .bind(&entry.email)
                    .execute(&mut *tx)
                    .await?;
                }
                None => {
                    sqlx::query(
                        "INSERT INTO authors \
                         (article_id, seq, first_name, last_name, affiliation, email) \
                         VALUES ($1, $2, $3, $4, $5, $6)",
                    )
                    .bind(article_id)
                    .bind(seq as i32)
                    .bind(&entry.first_name)
                    .bind(&entry.last_name)
                    .bind(&entry.affiliation)
                    .bind(&entry.email)
                    .execute(&mut *tx)
                    .await?;
                }
            }
        }

        sqlx::query("UPDATE articles SET primary_contact = $2, updated_at = NOW() WHERE id = $1")
            .bind(article_id)
            .bind(primary_contact as i32)
            .execute(&mut *tx)
            .await?;

        tx.commit().await
    }

    /// The article's galleys (published renditions), for OAI export.
    pub async fn list_galleys(pool: &PgPool, article_id: DbId) -> Result<Vec<Galley>, sqlx::Error> {
        sqlx::query_as::<_, Galley>(
            "SELECT id, article_id, file_id, file_type FROM galleys \
             WHERE article_id = $1 ORDER BY id ASC",
        )
        .bind(article_id)
        .fetch_all(pool)
        .await
    }
}
