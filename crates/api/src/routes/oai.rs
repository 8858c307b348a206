//! Route definitions for the OAI-PMH metadata surface.
//!
//! Public: harvesters authenticate nothing.

use axum::routing::get;
use axum::Router;

use crate::handlers::oai;
use crate::state::AppState;

/// Routes mounted at `/oai`.
///
/// ```text
/// GET /dc/{article_id} -> export_article_dc
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/dc/{article_id}", get(oai::export_article_dc))
}
