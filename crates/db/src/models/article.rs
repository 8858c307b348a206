//! Article entity models and DTOs.

use folio_core::types::{DbId, LocalizedText, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `articles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Article {
    pub id: DbId,
    pub journal_id: DbId,
    pub user_id: DbId,
    pub section_id: Option<DbId>,
    pub issue_id: Option<DbId>,
    pub status: String,
    pub submission_progress: i32,
    pub submission_file_id: Option<DbId>,
    /// Index of the corresponding author in the seq-ordered author list.
    pub primary_contact: i32,
    pub title: Json<LocalizedText>,
    pub abstract_text: Json<LocalizedText>,
    pub subject: Json<LocalizedText>,
    pub sponsor: Json<LocalizedText>,
    pub coverage: Json<LocalizedText>,
    pub article_type: Json<LocalizedText>,
    pub language: String,
    pub pages: String,
    pub comments_to_editor: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Article {
    /// The article title in the journal's primary locale, falling back to
    /// any available locale.
    pub fn localized_title(&self, primary_locale: &str) -> String {
        self.title
            .get(primary_locale)
            .or_else(|| self.title.values().next())
            .cloned()
            .unwrap_or_default()
    }
}

/// A row from the `authors` table, ordered by `seq` within an article.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Author {
    pub id: DbId,
    pub article_id: DbId,
    pub seq: i32,
    pub first_name: String,
    pub last_name: String,
    pub affiliation: String,
    pub email: String,
}

impl Author {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// A row from the `galleys` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Galley {
    pub id: DbId,
    pub article_id: DbId,
    pub file_id: Option<DbId>,
    pub file_type: String,
}

/// Metadata fields written by wizard step 1.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleMetadata {
    #[serde(default)]
    pub title: LocalizedText,
    #[serde(default)]
    pub abstract_text: LocalizedText,
    #[serde(default)]
    pub subject: LocalizedText,
    #[serde(default)]
    pub sponsor: LocalizedText,
    #[serde(default)]
    pub coverage: LocalizedText,
    #[serde(default)]
    pub article_type: LocalizedText,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub pages: String,
    pub section_id: Option<DbId>,
}
