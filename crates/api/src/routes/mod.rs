pub mod health;
pub mod notification;
pub mod oai;
pub mod submission;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /journals/{journal}/submit                       wizard entry (redirects to step 1)
/// /journals/{journal}/submit/{step}                render (GET), save (POST)
/// /journals/{journal}/submit/supp-files            create (POST)
/// /journals/{journal}/submit/supp-files/new        render blank (GET), create from fields (POST)
/// /journals/{journal}/submit/supp-files/{id}       render (GET), save (POST), delete (DELETE)
/// /journals/{journal}/submit/expedite              expedite (POST)
///
/// /notifications                                   list (requires auth)
///
/// /oai/dc/{article_id}                             Dublin Core export (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/journals/{journal}/submit", submission::router())
        .nest("/notifications", notification::router())
        .nest("/oai", oai::router())
}
