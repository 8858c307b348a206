//! The five-step article submission wizard.
//!
//! Access failures here follow the wizard's policy rather than the API
//! error envelope: a malformed step goes back to step 1, a foreign or
//! overreaching article request goes back to the step-less entry point,
//! and a form that fails validation is re-rendered with inline errors.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use folio_core::submission::{
    check_article_access, check_step_request, StepAccess, SubmissionStatus, SubmissionStep,
};
use folio_core::types::{DbId, LocalizedText};
use folio_db::models::article::Article;
use folio_db::models::journal::Journal;
use folio_db::repositories::{ArticleRepo, JournalRepo, RoleRepo, SuppFileRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::forms::{FieldError, SaveStepBody, StepForm};
use crate::hooks::HookOutcome;
use crate::middleware::auth::AuthUser;
use crate::notifications::notify_article_submitted;
use crate::state::AppState;

/// `?article_id=` query on wizard GETs and single-shot POSTs.
#[derive(Debug, Deserialize)]
pub struct ArticleIdQuery {
    pub article_id: Option<DbId>,
}

/// Terminal view returned after a successful step-5 save.
#[derive(Debug, Serialize)]
pub struct CompletionView {
    pub view: &'static str,
    pub article_id: DbId,
    /// Whether the submitter may push the article straight into review.
    pub can_expedite: bool,
}

/// Outcome of [`validate_submission_access`].
pub enum Access {
    /// Request may proceed; carries the bound article (`None` only for a
    /// fresh step 1).
    Granted(Option<Article>),
    /// Request may not proceed as addressed; carries the ready redirect.
    Denied(Response),
}

pub(crate) async fn resolve_journal(state: &AppState, path: &str) -> AppResult<Journal> {
    JournalRepo::find_by_path(&state.pool, path)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No journal at path '{path}'")))
}

fn submit_url(journal_path: &str, suffix: &str) -> String {
    format!("/api/v1/journals/{journal_path}/submit{suffix}")
}

/// Validate a wizard request against the journal context, the requesting
/// user, and the article's recorded progress. Never mutates.
///
/// `step` is `None` for step-less operations (entry point, expedite).
pub(crate) async fn validate_submission_access(
    state: &AppState,
    journal: &Journal,
    user_id: DbId,
    step: Option<i32>,
    article_id: Option<DbId>,
) -> AppResult<Access> {
    if let Some(step) = step {
        if check_step_request(step, article_id.is_some()) == StepAccess::RedirectToFirstStep {
            return Ok(Access::Denied(
                Redirect::to(&submit_url(&journal.path, "/1")).into_response(),
            ));
        }
    }

    let Some(article_id) = article_id else {
        return Ok(Access::Granted(None));
    };

    let entry = || Redirect::to(&submit_url(&journal.path, "")).into_response();
    let Some(article) = ArticleRepo::find_by_id(&state.pool, article_id).await? else {
        return Ok(Access::Denied(entry()));
    };

    let access = check_article_access(
        article.user_id == user_id,
        article.journal_id == journal.id,
        step,
        article.submission_progress,
    );
    match access {
        StepAccess::Granted => Ok(Access::Granted(Some(article))),
        _ => Ok(Access::Denied(entry())),
    }
}

/// GET `/journals/{journal}/submit` -- the step-less entry point.
pub async fn submit_entry(
    State(state): State<AppState>,
    Path(journal_path): Path<String>,
    _user: AuthUser,
) -> AppResult<Response> {
    let journal = resolve_journal(&state, &journal_path).await?;
    Ok(Redirect::to(&submit_url(&journal.path, "/1")).into_response())
}

/// GET `/journals/{journal}/submit/{step}` -- render a wizard step.
pub async fn render_step(
    State(state): State<AppState>,
    Path((journal_path, step)): Path<(String, String)>,
    Query(query): Query<ArticleIdQuery>,
    user: AuthUser,
) -> AppResult<Response> {
    // A non-numeric step segment gates like any out-of-range step.
    let step_number: i32 = step.parse().unwrap_or(0);
    let journal = resolve_journal(&state, &journal_path).await?;

    let article = match validate_submission_access(
        &state,
        &journal,
        user.user_id,
        Some(step_number),
        query.article_id,
    )
    .await?
    {
        Access::Granted(article) => article,
        Access::Denied(redirect) => return Ok(redirect),
    };

    let step = SubmissionStep::from_number(step_number)?;
    let form = StepForm::init_data(step, &state.pool, article.as_ref()).await?;
    let article_id = article.as_ref().map(|a| a.id);
    Ok(Json(form.view(article_id, false, Vec::new())).into_response())
}

/// POST `/journals/{journal}/submit/{step}` -- save a wizard step.
pub async fn save_step(
    State(state): State<AppState>,
    Path((journal_path, step)): Path<(String, String)>,
    user: AuthUser,
    Json(body): Json<SaveStepBody>,
) -> AppResult<Response> {
    let step_number: i32 = step.parse().unwrap_or(0);
    let journal = resolve_journal(&state, &journal_path).await?;

    let article = match validate_submission_access(
        &state,
        &journal,
        user.user_id,
        Some(step_number),
        body.article_id,
    )
    .await?
    {
        Access::Granted(article) => article,
        Access::Denied(redirect) => return Ok(redirect),
    };

    let step = SubmissionStep::from_number(step_number)?;
    let mut form = StepForm::read_input(step, article.as_ref(), &body);
    let article_id = article.as_ref().map(|a| a.id);

    // A display-language change re-posts the form untouched: show it again
    // with the submitted values, saving nothing.
    if body.locale_resubmit {
        return Ok(Json(form.view(article_id, true, Vec::new())).into_response());
    }

    if let Some(hook) = &state.save_hook {
        if hook.on_save(step, article.as_ref(), &body) == HookOutcome::Handled {
            return Ok(StatusCode::NO_CONTENT.into_response());
        }
    }

    if let Some(response) =
        run_step_branch(&state, &journal, step, &mut form, article.as_ref(), &body).await?
    {
        return Ok(response);
    }

    if let Err(errors) = form.validate() {
        return Ok(Json(form.view(article_id, false, errors)).into_response());
    }

    let saved_id = form
        .execute(&state.pool, journal.id, user.user_id, article.as_ref())
        .await?;

    if step == SubmissionStep::Confirmation {
        let article = match article {
            Some(article) => article,
            // Unreachable past the access gate, which requires an article
            // for every step but 1.
            None => {
                return Err(AppError::InternalError(
                    "confirmation step saved without a bound article".into(),
                ))
            }
        };
        notify_article_submitted(&state.pool, &journal, &article).await;

        let is_editor =
            RoleRepo::has_role(&state.pool, journal.id, user.user_id, folio_core::roles::ROLE_EDITOR)
                .await?;
        let view = CompletionView {
            view: "author/submit/complete",
            article_id: saved_id,
            can_expedite: is_editor && article.submission_file_id.is_some(),
        };
        return Ok(Json(view).into_response());
    }

    let next = step.to_number() + 1;
    Ok(Redirect::to(&submit_url(
        &journal.path,
        &format!("/{next}?article_id={saved_id}"),
    ))
    .into_response())
}

/// Run the step-specific pre-save branch, if the body requests one.
///
/// Branches re-render the form in edit mode (or hand off to the
/// supplementary-file workflow) instead of advancing the wizard.
async fn run_step_branch(
    state: &AppState,
    journal: &Journal,
    step: SubmissionStep,
    form: &mut StepForm,
    article: Option<&Article>,
    body: &SaveStepBody,
) -> AppResult<Option<Response>> {
    let article_id = article.map(|a| a.id);
    match step {
        SubmissionStep::Upload if body.upload_submission_file => {
            let Some(article) = article else {
                return Err(AppError::InternalError(
                    "upload step saved without a bound article".into(),
                ));
            };
            let Some(upload) = &body.submission_file else {
                let errors = vec![FieldError::new("submission_file", "A file is required.")];
                return Ok(Some(Json(form.view(article_id, true, errors)).into_response()));
            };
            let file_id = state.files.store(&state.pool, article.id, upload).await?;
            ArticleRepo::set_submission_file(&state.pool, article.id, file_id).await?;
            form.attach_submission_file(file_id);
            Ok(Some(Json(form.view(article_id, true, Vec::new())).into_response()))
        }
        SubmissionStep::Authors => {
            let Some(list) = form.author_list_mut() else {
                return Ok(None);
            };
            if body.add_author {
                list.add_blank();
            } else if let Some(indices) = &body.del_author {
                // Acted on only when exactly one index is selected.
                if let [index] = indices.as_slice() {
                    list.delete(*index);
                }
            } else if body.move_author {
                let direction = folio_core::authors::MoveDirection::from_flag(
                    body.move_author_dir.as_deref().unwrap_or(""),
                );
                if let Some(index) = body.move_author_index {
                    list.move_entry(direction, index);
                }
            } else {
                return Ok(None);
            }
            Ok(Some(Json(form.view(article_id, true, Vec::new())).into_response()))
        }
        SubmissionStep::SupplementaryFiles if body.upload_supp_file => {
            let Some(article) = article else {
                return Err(AppError::InternalError(
                    "supplementary-file step saved without a bound article".into(),
                ));
            };
            let Some(upload) = &body.supp_file else {
                let errors = vec![FieldError::new("supp_file", "A file is required.")];
                return Ok(Some(Json(form.view(article_id, true, errors)).into_response()));
            };

            // Create the record up front so the author lands in its edit
            // view with the binary already attached.
            let title = untitled(&journal.primary_locale);
            let supp_id = SuppFileRepo::create(&state.pool, article.id, &title).await?;
            let file_id = state.files.store(&state.pool, article.id, upload).await?;
            SuppFileRepo::set_file(&state.pool, supp_id, article.id, file_id).await?;

            Ok(Some(
                Redirect::to(&submit_url(
                    &journal.path,
                    &format!("/supp-files/{supp_id}?article_id={}", article.id),
                ))
                .into_response(),
            ))
        }
        _ => Ok(None),
    }
}

/// Placeholder title for a supplementary file created before its metadata
/// has been entered.
pub(crate) fn untitled(primary_locale: &str) -> LocalizedText {
    let mut title = LocalizedText::new();
    title.insert(primary_locale.to_string(), "Untitled".to_string());
    title
}

/// POST `/journals/{journal}/submit/expedite` -- push a finished
/// submission straight into review.
///
/// Available to submitters who also hold the editor role in the journal
/// and have a manuscript file attached; everyone else is sent to the
/// author tracking view unchanged.
pub async fn expedite(
    State(state): State<AppState>,
    Path(journal_path): Path<String>,
    Query(query): Query<ArticleIdQuery>,
    user: AuthUser,
) -> AppResult<Response> {
    let journal = resolve_journal(&state, &journal_path).await?;

    let article =
        match validate_submission_access(&state, &journal, user.user_id, None, query.article_id)
            .await?
        {
            Access::Granted(Some(article)) => article,
            Access::Granted(None) => {
                return Ok(Redirect::to(&submit_url(&journal.path, "")).into_response())
            }
            Access::Denied(redirect) => return Ok(redirect),
        };

    let is_editor =
        RoleRepo::has_role(&state.pool, journal.id, user.user_id, folio_core::roles::ROLE_EDITOR)
            .await?;
    if is_editor && article.submission_file_id.is_some() {
        ArticleRepo::set_status(&state.pool, article.id, SubmissionStatus::InReview).await?;
        tracing::info!(article_id = article.id, user_id = user.user_id, "Submission expedited");
        Ok(Redirect::to(&format!(
            "/api/v1/journals/{}/editor/submissions/{}",
            journal.path, article.id
        ))
        .into_response())
    } else {
        Ok(Redirect::to(&format!("/api/v1/journals/{}/author", journal.path)).into_response())
    }
}
