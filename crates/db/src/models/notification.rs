//! Notification entity model.

use folio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: DbId,
    /// Event kind tag, e.g. `article_submitted`.
    pub kind: String,
    pub title: String,
    pub link: String,
    pub level: i32,
    pub is_read: bool,
    pub created_at: Timestamp,
}
