//! Route definitions for the submission wizard, mounted at
//! `/journals/{journal}/submit`.
//!
//! All endpoints require authentication. Static segments (`supp-files`,
//! `expedite`, `new`) take precedence over the `{step}` capture.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{submission, supp_file};
use crate::state::AppState;

/// Routes mounted at `/journals/{journal}/submit`.
///
/// ```text
/// GET    /                      -> submit_entry (redirect to step 1)
/// GET    /{step}                -> render_step
/// POST   /{step}                -> save_step
///
/// POST   /supp-files            -> create_supp_file
/// GET    /supp-files/new        -> render_new_supp_file
/// POST   /supp-files/new        -> save_new_supp_file
/// GET    /supp-files/{id}       -> render_supp_file
/// POST   /supp-files/{id}       -> save_supp_file
/// DELETE /supp-files/{id}       -> delete_supp_file
///
/// POST   /expedite              -> expedite
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(submission::submit_entry))
        .route("/expedite", post(submission::expedite))
        .route("/supp-files", post(supp_file::create_supp_file))
        .route(
            "/supp-files/new",
            get(supp_file::render_new_supp_file).post(supp_file::save_new_supp_file),
        )
        .route(
            "/supp-files/{id}",
            get(supp_file::render_supp_file)
                .post(supp_file::save_supp_file)
                .delete(supp_file::delete_supp_file),
        )
        .route(
            "/{step}",
            get(submission::render_step).post(submission::save_step),
        )
}
