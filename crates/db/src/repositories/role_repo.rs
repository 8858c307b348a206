//! Repository for the `user_roles` table (per-journal role membership).

use folio_core::types::DbId;
use sqlx::PgPool;

/// Provides role-membership lookups.
pub struct RoleRepo;

impl RoleRepo {
    /// Whether a user holds the named role in a journal.
    pub async fn has_role(
        pool: &PgPool,
        journal_id: DbId,
        user_id: DbId,
        role_name: &str,
    ) -> Result<bool, sqlx::Error> {
        let count: Option<i64> = sqlx::query_scalar(
            "SELECT COUNT(*) FROM user_roles \
             WHERE journal_id = $1 AND user_id = $2 AND role_name = $3",
        )
        .bind(journal_id)
        .bind(user_id)
        .bind(role_name)
        .fetch_one(pool)
        .await?;
        Ok(count.unwrap_or(0) > 0)
    }

    /// User ids holding the named role in a journal, ordered for stable
    /// notification fan-out.
    pub async fn user_ids_with_role(
        pool: &PgPool,
        journal_id: DbId,
        role_name: &str,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT user_id FROM user_roles \
             WHERE journal_id = $1 AND role_name = $2 ORDER BY user_id ASC",
        )
        .bind(journal_id)
        .bind(role_name)
        .fetch_all(pool)
        .await
    }

    /// Grant a role, ignoring an already-existing grant.
    pub async fn grant(
        pool: &PgPool,
        journal_id: DbId,
        user_id: DbId,
        role_name: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO user_roles (journal_id, user_id, role_name) VALUES ($1, $2, $3) \
             ON CONFLICT ON CONSTRAINT uq_user_roles DO NOTHING",
        )
        .bind(journal_id)
        .bind(user_id)
        .bind(role_name)
        .execute(pool)
        .await?;
        Ok(())
    }
}
