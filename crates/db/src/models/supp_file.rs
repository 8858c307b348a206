//! Supplementary file entity model and DTOs.

use folio_core::types::{DbId, LocalizedText, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `supp_files` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SuppFile {
    pub id: DbId,
    pub article_id: DbId,
    /// Nullable: metadata may exist before any binary is uploaded.
    pub file_id: Option<DbId>,
    pub title: Json<LocalizedText>,
    pub creator: Json<LocalizedText>,
    pub description: Json<LocalizedText>,
    pub type_tag: String,
    pub language: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Editable supplementary-file fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuppFileFields {
    #[serde(default)]
    pub title: LocalizedText,
    #[serde(default)]
    pub creator: LocalizedText,
    #[serde(default)]
    pub description: LocalizedText,
    #[serde(default)]
    pub type_tag: String,
    #[serde(default)]
    pub language: String,
}
