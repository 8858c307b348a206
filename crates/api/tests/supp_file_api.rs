//! HTTP-level integration tests for the supplementary-file sub-workflow.

mod common;

use axum::http::{header::LOCATION, StatusCode};
use common::{
    body_json, build_test_app, delete, get, post_json, seed_article, seed_journal, seed_user,
    token_for,
};
use folio_db::repositories::SuppFileRepo;
use sqlx::PgPool;

fn location(response: &axum::response::Response) -> String {
    response
        .headers()
        .get(LOCATION)
        .expect("missing Location header")
        .to_str()
        .unwrap()
        .to_string()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_makes_untitled_record_and_redirects_to_edit(pool: PgPool) {
    let journal = seed_journal(&pool, "widgets").await;
    let user = seed_user(&pool, "ada").await;
    let article = seed_article(&pool, journal, user, 4).await;

    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/journals/widgets/submit/supp-files?article_id={article}"),
        &token_for(user),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let location = location(&response);
    let prefix = "/api/v1/journals/widgets/submit/supp-files/";
    assert!(location.starts_with(prefix), "unexpected redirect: {location}");

    let records = SuppFileRepo::list_for_article(&pool, article).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title.0.get("en").map(String::as_str), Some("Untitled"));
    assert!(records[0].file_id.is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_render_existing_record(pool: PgPool) {
    let journal = seed_journal(&pool, "widgets").await;
    let user = seed_user(&pool, "ada").await;
    let article = seed_article(&pool, journal, user, 4).await;
    let title = [("en".to_string(), "Raw Data".to_string())].into_iter().collect();
    let supp = SuppFileRepo::create(&pool, article, &title).await.unwrap();

    let app = build_test_app(pool);
    let response = get(
        app,
        &format!("/api/v1/journals/widgets/submit/supp-files/{supp}?article_id={article}"),
        &token_for(user),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["view"], "author/submit/suppFile");
    assert_eq!(json["supp_file_id"], supp);
    assert_eq!(json["fields"]["title"]["en"], "Raw Data");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_save_persists_fields_and_returns_to_step_four(pool: PgPool) {
    let journal = seed_journal(&pool, "widgets").await;
    let user = seed_user(&pool, "ada").await;
    let article = seed_article(&pool, journal, user, 4).await;
    let title = [("en".to_string(), "Untitled".to_string())].into_iter().collect();
    let supp = SuppFileRepo::create(&pool, article, &title).await.unwrap();

    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/journals/widgets/submit/supp-files/{supp}?article_id={article}"),
        &token_for(user),
        serde_json::json!({
            "fields": {
                "title": { "en": "Survey Instrument" },
                "creator": { "en": "Ada Lovelace" },
                "type_tag": "research_instrument",
                "language": "en"
            }
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        format!("/api/v1/journals/widgets/submit/4?article_id={article}")
    );

    let stored = SuppFileRepo::find_for_article(&pool, supp, article)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.title.0.get("en").map(String::as_str), Some("Survey Instrument"));
    assert_eq!(stored.type_tag, "research_instrument");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_save_with_blank_title_re_renders_with_errors(pool: PgPool) {
    let journal = seed_journal(&pool, "widgets").await;
    let user = seed_user(&pool, "ada").await;
    let article = seed_article(&pool, journal, user, 4).await;
    let title = [("en".to_string(), "Keep Me".to_string())].into_iter().collect();
    let supp = SuppFileRepo::create(&pool, article, &title).await.unwrap();

    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/journals/widgets/submit/supp-files/{supp}?article_id={article}"),
        &token_for(user),
        serde_json::json!({ "fields": { "title": { "en": "  " } } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["errors"][0]["field"], "title");

    let stored = SuppFileRepo::find_for_article(&pool, supp, article)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.title.0.get("en").map(String::as_str), Some("Keep Me"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_locale_resubmit_re_renders_unsaved_fields(pool: PgPool) {
    let journal = seed_journal(&pool, "widgets").await;
    let user = seed_user(&pool, "ada").await;
    let article = seed_article(&pool, journal, user, 4).await;
    let title = [("en".to_string(), "Stored".to_string())].into_iter().collect();
    let supp = SuppFileRepo::create(&pool, article, &title).await.unwrap();

    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/journals/widgets/submit/supp-files/{supp}?article_id={article}"),
        &token_for(user),
        serde_json::json!({
            "locale_resubmit": true,
            "fields": { "title": { "de": "Entwurf" } }
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["fields"]["title"]["de"], "Entwurf");

    let stored = SuppFileRepo::find_for_article(&pool, supp, article)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.title.0.get("en").map(String::as_str), Some("Stored"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_removes_record(pool: PgPool) {
    let journal = seed_journal(&pool, "widgets").await;
    let user = seed_user(&pool, "ada").await;
    let article = seed_article(&pool, journal, user, 4).await;
    let title = [("en".to_string(), "Doomed".to_string())].into_iter().collect();
    let supp = SuppFileRepo::create(&pool, article, &title).await.unwrap();

    let app = build_test_app(pool.clone());
    let response = delete(
        app,
        &format!("/api/v1/journals/widgets/submit/supp-files/{supp}?article_id={article}"),
        &token_for(user),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        format!("/api/v1/journals/widgets/submit/4?article_id={article}")
    );

    assert!(SuppFileRepo::find_for_article(&pool, supp, article)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_of_foreign_record_is_not_found(pool: PgPool) {
    let journal = seed_journal(&pool, "widgets").await;
    let user = seed_user(&pool, "ada").await;
    let mine = seed_article(&pool, journal, user, 4).await;
    let other_owner = seed_user(&pool, "grace").await;
    let theirs = seed_article(&pool, journal, other_owner, 4).await;
    let title = [("en".to_string(), "Not Yours".to_string())].into_iter().collect();
    let supp = SuppFileRepo::create(&pool, theirs, &title).await.unwrap();

    // Addressing someone else's record through my own validated article
    // fails closed with a hard 404, not a redirect.
    let app = build_test_app(pool.clone());
    let response = delete(
        app,
        &format!("/api/v1/journals/widgets/submit/supp-files/{supp}?article_id={mine}"),
        &token_for(user),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert!(SuppFileRepo::find_for_article(&pool, supp, theirs)
        .await
        .unwrap()
        .is_some());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_sub_workflow_is_step_four_gated(pool: PgPool) {
    let journal = seed_journal(&pool, "widgets").await;
    let user = seed_user(&pool, "ada").await;
    // Progress 2: step 4 is out of reach, so the whole sub-workflow is.
    let article = seed_article(&pool, journal, user, 2).await;

    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/journals/widgets/submit/supp-files?article_id={article}"),
        &token_for(user),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/api/v1/journals/widgets/submit");
    assert!(SuppFileRepo::list_for_article(&pool, article).await.unwrap().is_empty());
}
