//! Route definitions for the `/notifications` resource.
//!
//! All endpoints require authentication.

use axum::routing::get;
use axum::Router;

use crate::handlers::notification;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// GET / -> list_notifications
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(notification::list_notifications))
}
