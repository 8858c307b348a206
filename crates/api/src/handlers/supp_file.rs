//! The supplementary-file sub-workflow, nested under wizard step 4.
//!
//! Every operation validates access exactly like a step-4 wizard request,
//! so a supplementary file is only ever reachable through an article the
//! requesting author owns at sufficient progress.

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use folio_core::error::CoreError;
use folio_core::types::DbId;
use folio_db::models::article::Article;
use folio_db::repositories::SuppFileRepo;

use crate::error::AppResult;
use crate::forms::supp_file::{SaveSuppFileBody, SuppFileForm};
use crate::handlers::submission::{
    resolve_journal, untitled, validate_submission_access, Access, ArticleIdQuery,
};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

const SUPP_FILE_STEP: i32 = 4;

async fn validated_article(
    state: &AppState,
    journal_path: &str,
    user_id: DbId,
    article_id: Option<DbId>,
) -> AppResult<Result<(folio_db::models::journal::Journal, Article), Response>> {
    let journal = resolve_journal(state, journal_path).await?;
    match validate_submission_access(state, &journal, user_id, Some(SUPP_FILE_STEP), article_id)
        .await?
    {
        Access::Granted(Some(article)) => Ok(Ok((journal, article))),
        // Step 4 never grants without an article id; the gate catches it,
        // but fall back to the entry redirect regardless.
        Access::Granted(None) => {
            let journal_path = journal.path;
            Ok(Err(Redirect::to(&format!(
                "/api/v1/journals/{journal_path}/submit"
            ))
            .into_response()))
        }
        Access::Denied(redirect) => Ok(Err(redirect)),
    }
}

fn step4_url(journal_path: &str, article_id: DbId) -> String {
    format!("/api/v1/journals/{journal_path}/submit/4?article_id={article_id}")
}

/// POST `.../submit/supp-files` -- create a blank record and send the
/// author into its edit view.
pub async fn create_supp_file(
    State(state): State<AppState>,
    Path(journal_path): Path<String>,
    Query(query): Query<ArticleIdQuery>,
    user: AuthUser,
) -> AppResult<Response> {
    let (journal, article) =
        match validated_article(&state, &journal_path, user.user_id, query.article_id).await? {
            Ok(bound) => bound,
            Err(redirect) => return Ok(redirect),
        };

    let title = untitled(&journal.primary_locale);
    let supp_id = SuppFileRepo::create(&state.pool, article.id, &title).await?;
    Ok(Redirect::to(&format!(
        "/api/v1/journals/{}/submit/supp-files/{supp_id}?article_id={}",
        journal.path, article.id
    ))
    .into_response())
}

/// GET `.../submit/supp-files/new` -- render a blank form.
pub async fn render_new_supp_file(
    State(state): State<AppState>,
    Path(journal_path): Path<String>,
    Query(query): Query<ArticleIdQuery>,
    user: AuthUser,
) -> AppResult<Response> {
    let (_, article) =
        match validated_article(&state, &journal_path, user.user_id, query.article_id).await? {
            Ok(bound) => bound,
            Err(redirect) => return Ok(redirect),
        };

    let form = SuppFileForm::blank();
    Ok(Json(form.view(article.id, Vec::new())).into_response())
}

/// GET `.../submit/supp-files/{id}` -- render an existing record.
pub async fn render_supp_file(
    State(state): State<AppState>,
    Path((journal_path, supp_id)): Path<(String, DbId)>,
    Query(query): Query<ArticleIdQuery>,
    user: AuthUser,
) -> AppResult<Response> {
    let (_, article) =
        match validated_article(&state, &journal_path, user.user_id, query.article_id).await? {
            Ok(bound) => bound,
            Err(redirect) => return Ok(redirect),
        };

    let record = SuppFileRepo::find_for_article(&state.pool, supp_id, article.id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "supplementary file",
            id: supp_id,
        })?;
    let form = SuppFileForm::from_record(&record);
    Ok(Json(form.view(article.id, Vec::new())).into_response())
}

/// POST `.../submit/supp-files/new` -- create from submitted fields.
pub async fn save_new_supp_file(
    State(state): State<AppState>,
    Path(journal_path): Path<String>,
    Query(query): Query<ArticleIdQuery>,
    user: AuthUser,
    Json(body): Json<SaveSuppFileBody>,
) -> AppResult<Response> {
    save_supp_file_inner(state, journal_path, query, user, None, body).await
}

/// POST `.../submit/supp-files/{id}` -- update an existing record.
pub async fn save_supp_file(
    State(state): State<AppState>,
    Path((journal_path, supp_id)): Path<(String, DbId)>,
    Query(query): Query<ArticleIdQuery>,
    user: AuthUser,
    Json(body): Json<SaveSuppFileBody>,
) -> AppResult<Response> {
    save_supp_file_inner(state, journal_path, query, user, Some(supp_id), body).await
}

async fn save_supp_file_inner(
    state: AppState,
    journal_path: String,
    query: ArticleIdQuery,
    user: AuthUser,
    supp_id: Option<DbId>,
    body: SaveSuppFileBody,
) -> AppResult<Response> {
    let (journal, article) =
        match validated_article(&state, &journal_path, user.user_id, query.article_id).await? {
            Ok(bound) => bound,
            Err(redirect) => return Ok(redirect),
        };

    let form = SuppFileForm::read_input(supp_id, &body);

    // Display-language change: show the submitted values again, unsaved.
    if body.locale_resubmit {
        return Ok(Json(form.view(article.id, Vec::new())).into_response());
    }

    if let Err(errors) = form.validate() {
        return Ok(Json(form.view(article.id, errors)).into_response());
    }

    form.execute(&state.pool, article.id).await?;
    Ok(Redirect::to(&step4_url(&journal.path, article.id)).into_response())
}

/// DELETE `.../submit/supp-files/{id}`.
///
/// A record that does not exist for the validated article is a hard 404.
/// The metadata row goes first; the stored binary is removed afterwards
/// and its loss on a crash in between is accepted.
pub async fn delete_supp_file(
    State(state): State<AppState>,
    Path((journal_path, supp_id)): Path<(String, DbId)>,
    Query(query): Query<ArticleIdQuery>,
    user: AuthUser,
) -> AppResult<Response> {
    let (journal, article) =
        match validated_article(&state, &journal_path, user.user_id, query.article_id).await? {
            Ok(bound) => bound,
            Err(redirect) => return Ok(redirect),
        };

    let file_id = SuppFileRepo::delete(&state.pool, supp_id, article.id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "supplementary file",
            id: supp_id,
        })?;

    if let Some(file_id) = file_id {
        state.files.delete(&state.pool, article.id, file_id).await?;
    }

    Ok(Redirect::to(&step4_url(&journal.path, article.id)).into_response())
}
