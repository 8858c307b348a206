//! Notification fan-out for completed submissions.

use folio_core::roles::{ROLE_EDITOR, ROLE_MANAGER};
use folio_core::types::DbId;
use folio_db::models::article::Article;
use folio_db::models::journal::Journal;
use folio_db::repositories::{NotificationRepo, RoleRepo};
use sqlx::PgPool;

/// Notification kind written when an author completes the wizard.
pub const NOTIFICATION_ARTICLE_SUBMITTED: &str = "article_submitted";

const NOTIFICATION_LEVEL_NORMAL: i32 = 1;

/// Notify the journal's managers and editors that `article` was submitted.
///
/// Recipients are the manager role holders followed by the editor role
/// holders; a user holding both roles is notified twice. An individual
/// insert failure is logged and skipped, so a completed submission never
/// fails on notification delivery.
pub async fn notify_article_submitted(pool: &PgPool, journal: &Journal, article: &Article) {
    let mut recipients: Vec<DbId> = Vec::new();
    for role in [ROLE_MANAGER, ROLE_EDITOR] {
        match RoleRepo::user_ids_with_role(pool, journal.id, role).await {
            Ok(ids) => recipients.extend(ids),
            Err(error) => {
                tracing::warn!(
                    journal_id = journal.id,
                    article_id = article.id,
                    role,
                    %error,
                    "failed to resolve notification recipients"
                );
            }
        }
    }

    let title = format!(
        "Article submitted: {}",
        article.localized_title(&journal.primary_locale)
    );
    let link = format!("/journals/{}/editor/submissions/{}", journal.path, article.id);

    for user_id in recipients {
        if let Err(error) = NotificationRepo::create(
            pool,
            user_id,
            NOTIFICATION_ARTICLE_SUBMITTED,
            &title,
            &link,
            NOTIFICATION_LEVEL_NORMAL,
        )
        .await
        {
            tracing::warn!(
                user_id,
                article_id = article.id,
                %error,
                "failed to create submission notification"
            );
        }
    }
}
