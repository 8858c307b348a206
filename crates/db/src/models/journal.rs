//! Journal context models: journals, sections, issues.

use chrono::NaiveDate;
use folio_core::types::{DbId, LocalizedText, Timestamp};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `journals` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Journal {
    pub id: DbId,
    /// URL path segment identifying the journal.
    pub path: String,
    pub primary_locale: String,
    pub title: Json<LocalizedText>,
    pub publisher_institution: Option<String>,
    pub copyright_notice: Json<LocalizedText>,
    pub created_at: Timestamp,
}

/// A row from the `sections` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Section {
    pub id: DbId,
    pub journal_id: DbId,
    pub title: Json<LocalizedText>,
    /// What this section publishes, per locale (e.g. "Peer-reviewed Article").
    pub identify_type: Json<LocalizedText>,
}

/// A row from the `issues` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Issue {
    pub id: DbId,
    pub journal_id: DbId,
    /// Human-readable issue identification, e.g. "Vol. 3 No. 1 (2009)".
    pub identification: String,
    pub date_published: Option<NaiveDate>,
}
