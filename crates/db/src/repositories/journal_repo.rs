//! Repository for the `journals`, `sections`, and `issues` tables.

use folio_core::types::DbId;
use sqlx::PgPool;

use crate::models::journal::{Issue, Journal, Section};

const JOURNAL_COLUMNS: &str =
    "id, path, primary_locale, title, publisher_institution, copyright_notice, created_at";

/// Provides read operations for the journal context.
pub struct JournalRepo;

impl JournalRepo {
    /// Find a journal by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Journal>, sqlx::Error> {
        let query = format!("SELECT {JOURNAL_COLUMNS} FROM journals WHERE id = $1");
        sqlx::query_as::<_, Journal>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Resolve the journal addressed by a URL path segment.
    pub async fn find_by_path(pool: &PgPool, path: &str) -> Result<Option<Journal>, sqlx::Error> {
        let query = format!("SELECT {JOURNAL_COLUMNS} FROM journals WHERE path = $1");
        sqlx::query_as::<_, Journal>(&query)
            .bind(path)
            .fetch_optional(pool)
            .await
    }

    /// Find a section by ID, scoped to its journal.
    pub async fn find_section(
        pool: &PgPool,
        id: DbId,
        journal_id: DbId,
    ) -> Result<Option<Section>, sqlx::Error> {
        sqlx::query_as::<_, Section>(
            "SELECT id, journal_id, title, identify_type FROM sections \
             WHERE id = $1 AND journal_id = $2",
        )
        .bind(id)
        .bind(journal_id)
        .fetch_optional(pool)
        .await
    }

    /// Find an issue by ID, scoped to its journal.
    pub async fn find_issue(
        pool: &PgPool,
        id: DbId,
        journal_id: DbId,
    ) -> Result<Option<Issue>, sqlx::Error> {
        sqlx::query_as::<_, Issue>(
            "SELECT id, journal_id, identification, date_published FROM issues \
             WHERE id = $1 AND journal_id = $2",
        )
        .bind(id)
        .bind(journal_id)
        .fetch_optional(pool)
        .await
    }
}
