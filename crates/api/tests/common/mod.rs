//! Shared harness for HTTP-level integration tests.
//!
//! Builds the real application router (same middleware stack as
//! production) around a `#[sqlx::test]` pool, plus request helpers and
//! raw-SQL seed functions for the journal/user/article fixtures the
//! wizard tests need.

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use folio_api::auth::jwt::{generate_access_token, JwtConfig};
use folio_api::config::ServerConfig;
use folio_api::files::DiskFileStore;
use folio_api::hooks::SaveStepHook;
use folio_api::router::build_app_router;
use folio_api::state::AppState;
use folio_core::types::DbId;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        public_base_url: "http://localhost:3000".to_string(),
        files_dir: std::env::temp_dir().join("folio-test-files"),
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router over the given pool, mirroring
/// `main.rs` so tests exercise the production middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_hook(pool, None)
}

/// Like [`build_test_app`], with a pre-save wizard hook installed.
pub fn build_test_app_with_hook(pool: PgPool, save_hook: Option<Arc<dyn SaveStepHook>>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        files: Arc::new(DiskFileStore::new(config.files_dir.clone())),
        save_hook,
    };
    build_app_router(state, &config)
}

/// A Bearer token for `user_id`, signed with the test secret.
pub fn token_for(user_id: DbId) -> String {
    generate_access_token(user_id, &test_config().jwt).expect("failed to sign test token")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, path: &str, token: &str) -> Response {
    let request = Request::builder()
        .method("GET")
        .uri(path)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .expect("failed to build request");
    app.oneshot(request).await.expect("request failed")
}

pub async fn get_public(app: Router, path: &str) -> Response {
    let request = Request::builder()
        .method("GET")
        .uri(path)
        .body(Body::empty())
        .expect("failed to build request");
    app.oneshot(request).await.expect("request failed")
}

pub async fn post_json(
    app: Router,
    path: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("failed to build request");
    app.oneshot(request).await.expect("request failed")
}

pub async fn delete(app: Router, path: &str, token: &str) -> Response {
    let request = Request::builder()
        .method("DELETE")
        .uri(path)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .expect("failed to build request");
    app.oneshot(request).await.expect("request failed")
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is not valid JSON")
}

/// Collect a response body as text.
pub async fn body_text(response: Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("body is not valid UTF-8")
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

/// Insert a journal, returning its id. `path` doubles as the English title.
pub async fn seed_journal(pool: &PgPool, path: &str) -> DbId {
    sqlx::query_scalar(
        "INSERT INTO journals (path, primary_locale, title, publisher_institution, copyright_notice) \
         VALUES ($1, 'en', $2, 'Test Press', $3) RETURNING id",
    )
    .bind(path)
    .bind(serde_json::json!({ "en": format!("Journal of {path}") }))
    .bind(serde_json::json!({ "en": "CC BY" }))
    .fetch_one(pool)
    .await
    .expect("failed to seed journal")
}

pub async fn seed_user(pool: &PgPool, username: &str) -> DbId {
    sqlx::query_scalar(
        "INSERT INTO users (username, email) VALUES ($1, $2) RETURNING id",
    )
    .bind(username)
    .bind(format!("{username}@example.edu"))
    .fetch_one(pool)
    .await
    .expect("failed to seed user")
}

pub async fn seed_role(pool: &PgPool, journal_id: DbId, user_id: DbId, role: &str) {
    folio_db::repositories::RoleRepo::grant(pool, journal_id, user_id, role)
        .await
        .expect("failed to seed role");
}

/// Insert an article owned by `user_id` with the given recorded progress.
pub async fn seed_article(
    pool: &PgPool,
    journal_id: DbId,
    user_id: DbId,
    progress: i32,
) -> DbId {
    sqlx::query_scalar(
        "INSERT INTO articles (journal_id, user_id, submission_progress, title) \
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(journal_id)
    .bind(user_id)
    .bind(progress)
    .bind(serde_json::json!({ "en": "A Seeded Article" }))
    .fetch_one(pool)
    .await
    .expect("failed to seed article")
}

/// Attach a manuscript file row to an article, returning the file id.
pub async fn seed_submission_file(pool: &PgPool, article_id: DbId) -> DbId {
    let file_id: DbId = sqlx::query_scalar(
        "INSERT INTO article_files (article_id, file_name, content_type, size) \
         VALUES ($1, 'paper.pdf', 'application/pdf', 4) RETURNING id",
    )
    .bind(article_id)
    .fetch_one(pool)
    .await
    .expect("failed to seed article file");
    sqlx::query("UPDATE articles SET submission_file_id = $2 WHERE id = $1")
        .bind(article_id)
        .bind(file_id)
        .execute(pool)
        .await
        .expect("failed to attach submission file");
    file_id
}
