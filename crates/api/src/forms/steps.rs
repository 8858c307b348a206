//! Per-step wizard forms.
//!
//! [`StepForm`] is the closed registry mapping each wizard step to its
//! form. A form goes through the same lifecycle on every request:
//! `init_data` or `read_input` to populate it, `validate` to check it,
//! `execute` to persist it, `view` to render it.

use folio_core::authors::{AuthorEntry, AuthorList};
use folio_core::submission::{SubmissionStatus, SubmissionStep};
use folio_core::types::{DbId, LocalizedText};
use folio_db::models::article::{Article, ArticleMetadata};
use folio_db::repositories::{ArticleRepo, SuppFileRepo};
use serde::Serialize;
use serde_json::json;
use sqlx::PgPool;
use validator::ValidateEmail;

use crate::error::{AppError, AppResult};
use crate::forms::{FieldError, SaveStepBody, StepView};

/// Step-1 form: article metadata.
#[derive(Debug, Clone, Default)]
pub struct MetadataForm {
    pub metadata: ArticleMetadata,
}

/// Step-2 form: the primary manuscript file.
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    pub submission_file_id: Option<DbId>,
}

/// Step-3 form: the editable author sequence.
#[derive(Debug, Clone, Default)]
pub struct AuthorsForm {
    pub list: AuthorList,
}

/// One row of the step-4 supplementary-file listing.
#[derive(Debug, Clone, Serialize)]
pub struct SuppFileSummary {
    pub id: DbId,
    pub title: LocalizedText,
    pub has_file: bool,
}

/// Step-4 form: read-only listing of supplementary files. The records
/// themselves are edited through the nested sub-workflow.
#[derive(Debug, Clone, Default)]
pub struct SuppFilesForm {
    pub files: Vec<SuppFileSummary>,
}

/// Step-5 form: confirmation and comments for the editor.
#[derive(Debug, Clone, Default)]
pub struct ConfirmForm {
    pub comments_to_editor: String,
}

/// The five wizard forms, keyed by step.
#[derive(Debug, Clone)]
pub enum StepForm {
    Metadata(MetadataForm),
    Upload(UploadForm),
    Authors(AuthorsForm),
    SuppFiles(SuppFilesForm),
    Confirm(ConfirmForm),
}

impl StepForm {
    /// Populate the form for `step` from persisted state, for a GET render.
    ///
    /// `article` is `None` only for a fresh step 1.
    pub async fn init_data(
        step: SubmissionStep,
        pool: &PgPool,
        article: Option<&Article>,
    ) -> AppResult<Self> {
        Ok(match step {
            SubmissionStep::Metadata => {
                let metadata = match article {
                    Some(a) => ArticleMetadata {
                        title: a.title.0.clone(),
                        abstract_text: a.abstract_text.0.clone(),
                        subject: a.subject.0.clone(),
                        sponsor: a.sponsor.0.clone(),
                        coverage: a.coverage.0.clone(),
                        article_type: a.article_type.0.clone(),
                        language: a.language.clone(),
                        pages: a.pages.clone(),
                        section_id: a.section_id,
                    },
                    None => ArticleMetadata::default(),
                };
                Self::Metadata(MetadataForm { metadata })
            }
            SubmissionStep::Upload => {
                let article = require_article(article)?;
                Self::Upload(UploadForm {
                    submission_file_id: article.submission_file_id,
                })
            }
            SubmissionStep::Authors => {
                let article = require_article(article)?;
                let mut entries: Vec<AuthorEntry> =
                    ArticleRepo::list_authors(pool, article.id)
                        .await?
                        .into_iter()
                        .map(|a| AuthorEntry {
                            author_id: Some(a.id),
                            first_name: a.first_name,
                            last_name: a.last_name,
                            affiliation: a.affiliation,
                            email: a.email,
                        })
                        .collect();
                if entries.is_empty() {
                    entries.push(AuthorEntry::default());
                }
                let primary_contact = article.primary_contact.max(0) as usize;
                Self::Authors(AuthorsForm {
                    list: AuthorList::new(entries, primary_contact),
                })
            }
            SubmissionStep::SupplementaryFiles => {
                let article = require_article(article)?;
                let files = SuppFileRepo::list_for_article(pool, article.id)
                    .await?
                    .into_iter()
                    .map(|f| SuppFileSummary {
                        id: f.id,
                        title: f.title.0.clone(),
                        has_file: f.file_id.is_some(),
                    })
                    .collect();
                Self::SuppFiles(SuppFilesForm { files })
            }
            SubmissionStep::Confirmation => {
                let article = require_article(article)?;
                Self::Confirm(ConfirmForm {
                    comments_to_editor: article.comments_to_editor.clone(),
                })
            }
        })
    }

    /// Populate the form for `step` from a submitted save body.
    ///
    /// Only fields the body actually carries are taken from it; the rest
    /// (the step-2 file id, the step-4 listing) come from the article.
    pub fn read_input(step: SubmissionStep, article: Option<&Article>, body: &SaveStepBody) -> Self {
        match step {
            SubmissionStep::Metadata => Self::Metadata(MetadataForm {
                metadata: body.metadata.clone().unwrap_or_default(),
            }),
            SubmissionStep::Upload => Self::Upload(UploadForm {
                submission_file_id: article.and_then(|a| a.submission_file_id),
            }),
            SubmissionStep::Authors => {
                let mut entries = body.authors.clone().unwrap_or_default();
                if entries.is_empty() {
                    entries.push(AuthorEntry::default());
                }
                let mut list = AuthorList::new(entries, body.primary_contact.unwrap_or(0));
                list.deleted = body.deleted_authors.clone().unwrap_or_default();
                Self::Authors(AuthorsForm { list })
            }
            SubmissionStep::SupplementaryFiles => Self::SuppFiles(SuppFilesForm::default()),
            SubmissionStep::Confirmation => Self::Confirm(ConfirmForm {
                comments_to_editor: body.comments_to_editor.clone().unwrap_or_default(),
            }),
        }
    }

    pub fn step(&self) -> SubmissionStep {
        match self {
            Self::Metadata(_) => SubmissionStep::Metadata,
            Self::Upload(_) => SubmissionStep::Upload,
            Self::Authors(_) => SubmissionStep::Authors,
            Self::SuppFiles(_) => SubmissionStep::SupplementaryFiles,
            Self::Confirm(_) => SubmissionStep::Confirmation,
        }
    }

    /// Mutable handle to the author sequence, when this is the step-3 form.
    pub fn author_list_mut(&mut self) -> Option<&mut AuthorList> {
        match self {
            Self::Authors(form) => Some(&mut form.list),
            _ => None,
        }
    }

    /// Record a freshly stored manuscript file on the step-2 form.
    pub fn attach_submission_file(&mut self, file_id: DbId) {
        if let Self::Upload(form) = self {
            form.submission_file_id = Some(file_id);
        }
    }

    /// Check the form's fields.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        match self {
            Self::Metadata(form) => {
                if localized_is_blank(&form.metadata.title) {
                    errors.push(FieldError::new("title", "A title is required."));
                }
            }
            Self::Authors(form) => {
                if form.list.entries.is_empty() {
                    errors.push(FieldError::new("authors", "At least one author is required."));
                }
                for (i, entry) in form.list.entries.iter().enumerate() {
                    if entry.last_name.trim().is_empty() {
                        errors.push(FieldError::new(
                            &format!("authors[{i}].last_name"),
                            "A last name is required.",
                        ));
                    }
                    if !entry.email.validate_email() {
                        errors.push(FieldError::new(
                            &format!("authors[{i}].email"),
                            "A valid email address is required.",
                        ));
                    }
                }
                if form.list.primary_contact >= form.list.entries.len() {
                    errors.push(FieldError::new(
                        "primary_contact",
                        "The principal contact must be one of the listed authors.",
                    ));
                }
            }
            Self::Upload(_) | Self::SuppFiles(_) | Self::Confirm(_) => {}
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Persist the form and raise the progress high-water mark.
    ///
    /// Returns the bound article id (freshly created for a first step-1
    /// save). Step 5 additionally queues the article for review.
    pub async fn execute(
        &self,
        pool: &PgPool,
        journal_id: DbId,
        user_id: DbId,
        article: Option<&Article>,
    ) -> AppResult<DbId> {
        match self {
            Self::Metadata(form) => match article {
                Some(a) => {
                    ArticleRepo::update_metadata(pool, a.id, &form.metadata).await?;
                    ArticleRepo::bump_progress(pool, a.id, 1).await?;
                    Ok(a.id)
                }
                None => {
                    let created =
                        ArticleRepo::create(pool, journal_id, user_id, &form.metadata).await?;
                    Ok(created.id)
                }
            },
            Self::Upload(_) => {
                let article = require_article(article)?;
                ArticleRepo::bump_progress(pool, article.id, 2).await?;
                Ok(article.id)
            }
            Self::Authors(form) => {
                let article = require_article(article)?;
                ArticleRepo::replace_authors(
                    pool,
                    article.id,
                    &form.list.entries,
                    form.list.primary_contact,
                    &form.list.deleted,
                )
                .await?;
                ArticleRepo::bump_progress(pool, article.id, 3).await?;
                Ok(article.id)
            }
            Self::SuppFiles(_) => {
                let article = require_article(article)?;
                ArticleRepo::bump_progress(pool, article.id, 4).await?;
                Ok(article.id)
            }
            Self::Confirm(form) => {
                let article = require_article(article)?;
                ArticleRepo::set_comments_to_editor(pool, article.id, &form.comments_to_editor)
                    .await?;
                ArticleRepo::bump_progress(pool, article.id, 5).await?;
                ArticleRepo::set_status(pool, article.id, SubmissionStatus::Queued).await?;
                Ok(article.id)
            }
        }
    }

    /// Build the render payload for this form.
    pub fn view(&self, article_id: Option<DbId>, editing: bool, errors: Vec<FieldError>) -> StepView {
        let step = self.step();
        let fields = match self {
            Self::Metadata(form) => json!({ "metadata": form.metadata }),
            Self::Upload(form) => json!({ "submission_file_id": form.submission_file_id }),
            Self::Authors(form) => json!({
                "authors": form.list.entries,
                "primary_contact": form.list.primary_contact,
                "deleted_authors": form.list.deleted,
            }),
            Self::SuppFiles(form) => json!({ "supp_files": form.files }),
            Self::Confirm(form) => json!({ "comments_to_editor": form.comments_to_editor }),
        };
        StepView {
            view: step.view(),
            step: step.to_number(),
            label: step.label(),
            article_id,
            editing,
            fields,
            errors,
        }
    }
}

fn require_article(article: Option<&Article>) -> AppResult<&Article> {
    article.ok_or_else(|| AppError::InternalError("wizard step run without a bound article".into()))
}

fn localized_is_blank(text: &LocalizedText) -> bool {
    text.values().all(|v| v.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
