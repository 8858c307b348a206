//! The supplementary-file edit form (nested under wizard step 4).

use folio_core::error::CoreError;
use folio_core::types::{DbId, LocalizedText};
use folio_db::models::supp_file::{SuppFile, SuppFileFields};
use folio_db::repositories::SuppFileRepo;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::PgPool;

use crate::error::AppResult;
use crate::forms::FieldError;

/// The submitted body of a supplementary-file save.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SaveSuppFileBody {
    /// Re-display the form with the submitted (unsaved) values after a
    /// display-language change; no validation, no persistence.
    pub locale_resubmit: bool,
    pub fields: SuppFileFields,
}

/// Render payload for the supplementary-file form.
#[derive(Debug, Serialize)]
pub struct SuppFileView {
    pub view: &'static str,
    pub article_id: DbId,
    pub supp_file_id: Option<DbId>,
    pub fields: serde_json::Value,
    pub errors: Vec<FieldError>,
}

/// Editable supplementary-file metadata, bound to an existing record when
/// `id` is set.
#[derive(Debug, Clone, Default)]
pub struct SuppFileForm {
    pub id: Option<DbId>,
    pub fields: SuppFileFields,
}

impl SuppFileForm {
    /// A blank form for the `/new` render.
    pub fn blank() -> Self {
        Self::default()
    }

    /// Populate from a persisted record.
    pub fn from_record(record: &SuppFile) -> Self {
        Self {
            id: Some(record.id),
            fields: SuppFileFields {
                title: record.title.0.clone(),
                creator: record.creator.0.clone(),
                description: record.description.0.clone(),
                type_tag: record.type_tag.clone(),
                language: record.language.clone(),
            },
        }
    }

    /// Populate from a submitted save body.
    pub fn read_input(id: Option<DbId>, body: &SaveSuppFileBody) -> Self {
        Self {
            id,
            fields: body.fields.clone(),
        }
    }

    /// Check the form's fields.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        if localized_is_blank(&self.fields.title) {
            return Err(vec![FieldError::new("title", "A title is required.")]);
        }
        Ok(())
    }

    /// Persist the form, creating the record when it is not yet bound.
    ///
    /// Returns the record id. An update against a record that no longer
    /// exists for the article surfaces as a not-found error.
    pub async fn execute(&self, pool: &PgPool, article_id: DbId) -> AppResult<DbId> {
        match self.id {
            Some(id) => {
                let updated = SuppFileRepo::update(pool, id, article_id, &self.fields).await?;
                if !updated {
                    return Err(CoreError::NotFound {
                        entity: "supplementary file",
                        id,
                    }
                    .into());
                }
                Ok(id)
            }
            None => {
                let id = SuppFileRepo::create(pool, article_id, &self.fields.title).await?;
                SuppFileRepo::update(pool, id, article_id, &self.fields).await?;
                Ok(id)
            }
        }
    }

    /// Build the render payload for this form.
    pub fn view(&self, article_id: DbId, errors: Vec<FieldError>) -> SuppFileView {
        SuppFileView {
            view: "author/submit/suppFile",
            article_id,
            supp_file_id: self.id,
            fields: json!({
                "title": self.fields.title,
                "creator": self.fields.creator,
                "description": self.fields.description,
                "type_tag": self.fields.type_tag,
                "language": self.fields.language,
            }),
            errors,
        }
    }
}

fn localized_is_blank(text: &LocalizedText) -> bool {
    text.values().all(|v| v.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
