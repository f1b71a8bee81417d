/// Integration tests for account registration
///
/// These tests require a running PostgreSQL database and are ignored by default.
/// Run with: cargo test -p userbase-api --test register_tests -- --ignored

mod common;

use axum::http::StatusCode;
use common::TestContext;
use futures::future::join_all;
use serde_json::json;

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_register_new_email() {
    let ctx = TestContext::new().await.unwrap();
    let email = ctx.unique_email();

    let (status, body) = ctx
        .register(json!({ "email": email, "password": "correct horse battery staple" }))
        .await;

    assert_eq!(status, StatusCode::OK, "unexpected body: {}", body);
    assert!(body["id"].is_string());
    assert_eq!(body["email"], email.as_str());
    assert!(body.get("name").is_none());
    assert_eq!(ctx.rows_for(&email).await, 1);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_register_with_name() {
    let ctx = TestContext::new().await.unwrap();
    let email = ctx.unique_email();

    let (status, body) = ctx
        .register(json!({ "email": email, "password": "pw", "name": "Ada" }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Ada");

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_response_and_storage_never_expose_plaintext() {
    let ctx = TestContext::new().await.unwrap();
    let email = ctx.unique_email();
    let password = "plaintext-should-not-leak";

    let (status, body) = ctx.register(json!({ "email": email, "password": password })).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
    assert!(!body.to_string().contains(password));

    let stored: String = sqlx::query_scalar("SELECT password_hash FROM users WHERE email = $1")
        .bind(&email)
        .fetch_one(&ctx.db)
        .await
        .unwrap();
    assert!(stored.starts_with("$argon2id$"));
    assert!(!stored.contains(password));

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_duplicate_email_is_rejected() {
    let ctx = TestContext::new().await.unwrap();
    let email = ctx.unique_email();

    let (first, _) = ctx.register(json!({ "email": email, "password": "one" })).await;
    assert_eq!(first, StatusCode::OK);

    let (second, body) = ctx.register(json!({ "email": email, "password": "two" })).await;
    assert_eq!(second, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "detail": "Email already registered" }));
    assert_eq!(ctx.rows_for(&email).await, 1);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_duplicate_check_ignores_case_and_whitespace() {
    let ctx = TestContext::new().await.unwrap();
    let email = ctx.unique_email();

    let (first, _) = ctx.register(json!({ "email": email, "password": "one" })).await;
    assert_eq!(first, StatusCode::OK);

    let variant = format!("  {}  ", email.to_uppercase());
    let (second, body) = ctx.register(json!({ "email": variant, "password": "two" })).await;

    assert_eq!(second, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Email already registered");
    assert_eq!(ctx.rows_for(&email).await, 1);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_padded_mixed_case_email_is_stored_normalized() {
    let ctx = TestContext::new().await.unwrap();
    let email = ctx.unique_email();

    let padded = format!("\t{} ", email.to_uppercase());
    let (status, body) = ctx.register(json!({ "email": padded, "password": "pw" })).await;

    assert_eq!(status, StatusCode::OK, "unexpected body: {}", body);
    assert_eq!(body["email"], email.as_str());
    assert_eq!(ctx.rows_for(&email).await, 1);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_invalid_request_creates_nothing() {
    let ctx = TestContext::new().await.unwrap();
    let email = ctx.unique_email();

    let (status, _) = ctx.register(json!({ "email": email, "password": "" })).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(ctx.rows_for(&email).await, 0);

    ctx.cleanup().await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore = "requires a running PostgreSQL database"]
async fn test_concurrent_registrations_create_one_account() {
    let ctx = TestContext::new().await.unwrap();
    let email = ctx.unique_email();

    let attempts = (0..8).map(|i| {
        ctx.register(json!({ "email": email, "password": format!("pw-{}", i) }))
    });
    let results = join_all(attempts).await;

    let created = results.iter().filter(|(s, _)| *s == StatusCode::OK).count();
    let rejected = results
        .iter()
        .filter(|(s, body)| {
            *s == StatusCode::BAD_REQUEST && body["detail"] == "Email already registered"
        })
        .count();

    assert_eq!(created, 1);
    assert_eq!(rejected, 7);
    assert_eq!(ctx.rows_for(&email).await, 1);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_health_reports_connected_database() {
    use axum::body::Body;
    use axum::http::Request;
    use tower::Service as _;

    let ctx = TestContext::new().await.unwrap();

    let response = ctx
        .app
        .clone()
        .call(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
}
