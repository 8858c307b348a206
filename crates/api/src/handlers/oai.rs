//! OAI-PMH Dublin Core metadata export.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use folio_core::oai_dc::{
    creator_line, merge_localized, publisher_text, source_text, DublinCoreRecord,
};
use folio_core::types::{DbId, LocalizedText};
use folio_db::repositories::{ArticleRepo, JournalRepo, SuppFileRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET `/oai/dc/{article_id}` -- one article as an `oai_dc:dc` fragment.
///
/// Public: harvesters carry no credentials.
pub async fn export_article_dc(
    State(state): State<AppState>,
    Path(article_id): Path<DbId>,
) -> AppResult<Response> {
    let article = ArticleRepo::find_by_id(&state.pool, article_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No article with id {article_id}")))?;
    let journal = JournalRepo::find_by_id(&state.pool, article.journal_id)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(format!("Article {article_id} references a missing journal"))
        })?;

    let section = match article.section_id {
        Some(id) => JournalRepo::find_section(&state.pool, id, journal.id).await?,
        None => None,
    };
    let issue = match article.issue_id {
        Some(id) => JournalRepo::find_issue(&state.pool, id, journal.id).await?,
        None => None,
    };
    let authors = ArticleRepo::list_authors(&state.pool, article.id).await?;
    let galleys = ArticleRepo::list_galleys(&state.pool, article.id).await?;
    let supp_files = SuppFileRepo::list_for_article(&state.pool, article.id).await?;

    let base = &state.config.public_base_url;
    let journal_path = &journal.path;

    // The type element folds the article's own type onto what the section
    // says it publishes, defaulting to the peer-reviewed label.
    let section_type = section
        .as_ref()
        .map(|s| s.identify_type.0.clone())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| peer_reviewed(&journal.primary_locale));

    let source = match &issue {
        Some(issue) => source_text(&journal.title.0, &issue.identification, &article.pages),
        None => LocalizedText::new(),
    };

    let record = DublinCoreRecord {
        title: article.title.0.clone(),
        creators: authors
            .iter()
            .map(|a| creator_line(&a.full_name(), &a.affiliation))
            .collect(),
        subject: article.subject.0.clone(),
        description: article.abstract_text.0.clone(),
        publisher: publisher_text(
            &journal.title.0,
            &journal.primary_locale,
            journal.publisher_institution.as_deref(),
        ),
        contributor: article.sponsor.0.clone(),
        date: issue.as_ref().and_then(|i| i.date_published),
        types: merge_localized(&section_type, &article.article_type.0),
        formats: galleys.iter().map(|g| g.file_type.clone()).collect(),
        identifier: format!("{base}/journals/{journal_path}/article/view/{}", article.id),
        source,
        language: article.language.clone(),
        relations: supp_files
            .iter()
            .filter_map(|s| s.file_id)
            .map(|file_id| {
                format!(
                    "{base}/journals/{journal_path}/article/download/{}/{file_id}",
                    article.id
                )
            })
            .collect(),
        coverage: article.coverage.0.clone(),
        rights: journal.copyright_notice.0.clone(),
    };

    Ok((
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        record.to_xml(),
    )
        .into_response())
}

fn peer_reviewed(primary_locale: &str) -> LocalizedText {
    let mut map = LocalizedText::new();
    map.insert(primary_locale.to_string(), "Peer-reviewed Article".to_string());
    map
}
