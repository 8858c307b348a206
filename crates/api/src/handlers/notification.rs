//! Notification inbox handlers.

use axum::extract::State;
use axum::Json;
use folio_db::models::notification::Notification;
use folio_db::repositories::NotificationRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET `/notifications` -- the authenticated user's notifications,
/// newest first.
pub async fn list_notifications(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Notification>>>> {
    let notifications = NotificationRepo::list_for_user(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse {
        data: notifications,
    }))
}
