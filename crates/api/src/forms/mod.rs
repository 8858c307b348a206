//! Submission form handling.
//!
//! [`steps::StepForm`] is the closed step-to-form registry for the five
//! wizard steps; [`supp_file::SuppFileForm`] backs the nested
//! supplementary-file sub-workflow. Shared input/output shapes live here.

pub mod steps;
pub mod supp_file;

use folio_core::types::DbId;
use serde::{Deserialize, Serialize};

pub use steps::StepForm;
pub use supp_file::SuppFileForm;

/// One inline form-field error, re-rendered with the step view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Render payload for a wizard step form.
///
/// `editing` marks an in-form edit round-trip (add/move/delete author,
/// file upload): the shown field values are unsaved.
#[derive(Debug, Serialize)]
pub struct StepView {
    pub view: &'static str,
    pub step: i32,
    pub label: &'static str,
    pub article_id: Option<DbId>,
    pub editing: bool,
    pub fields: serde_json::Value,
    pub errors: Vec<FieldError>,
}

/// An uploaded file carried inline in a save request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileUpload {
    pub file_name: String,
    #[serde(default = "default_content_type")]
    pub content_type: String,
    /// File contents. Kept as text; binary uploads arrive through the
    /// separate asset upload surface.
    #[serde(default)]
    pub data: String,
}

fn default_content_type() -> String {
    "application/octet-stream".to_string()
}

/// The submitted body of a wizard step save.
///
/// One shape covers all five steps; each form reads only the fields it
/// owns, and the step-specific action flags drive the pre-save branches.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SaveStepBody {
    pub article_id: Option<DbId>,
    /// Re-display the form with the submitted (unsaved) values after a
    /// display-language change; no validation, no persistence.
    pub locale_resubmit: bool,

    // -- step 1 --
    pub metadata: Option<folio_db::models::article::ArticleMetadata>,

    // -- step 2 --
    pub upload_submission_file: bool,
    pub submission_file: Option<FileUpload>,

    // -- step 3 --
    pub authors: Option<Vec<folio_core::authors::AuthorEntry>>,
    pub primary_contact: Option<usize>,
    pub deleted_authors: Option<Vec<DbId>>,
    pub add_author: bool,
    /// Indices selected for deletion; acted on only when exactly one.
    pub del_author: Option<Vec<usize>>,
    pub move_author: bool,
    /// `u` or `d`; anything else is treated as `d`.
    pub move_author_dir: Option<String>,
    pub move_author_index: Option<usize>,

    // -- step 4 --
    pub upload_supp_file: bool,
    pub supp_file: Option<FileUpload>,

    // -- step 5 --
    pub comments_to_editor: Option<String>,
}
