use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
};
use serde_json::json;
use tower::ServiceExt;

mod common;
use common::{body_json, create_test_app, extract_session_cookie, register_and_get_cookie};

async fn post_json(
    app: &axum::Router,
    uri: &str,
    body: serde_json::Value,
) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn register_returns_profile_and_session_cookie() {
    let app = create_test_app().await;

    let response = post_json(
        &app,
        "/api/v1/auth/register",
        json!({
            "username": "lan",
            "email": "lan@example.com",
            "password": "s3cret-enough",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let cookies: Vec<String> = response
        .headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|v| v.to_str().ok().map(|s| s.to_string()))
        .collect();
    assert!(extract_session_cookie(&cookies).is_some());
    assert!(
        cookies.iter().any(|c| c.contains("HttpOnly")),
        "session cookie must be HTTP-only: {:?}",
        cookies
    );

    let body = body_json(response).await;
    assert_eq!(body["username"], "lan");
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn registration_validates_the_request() {
    let app = create_test_app().await;

    let response = post_json(
        &app,
        "/api/v1/auth/register",
        json!({
            "username": "lan",
            "email": "not-an-email",
            "password": "123",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_username_is_rejected() {
    let app = create_test_app().await;
    register_and_get_cookie(&app, "lan").await;

    let response = post_json(
        &app,
        "/api/v1/auth/register",
        json!({
            "username": "lan",
            "email": "second@example.com",
            "password": "another-secret",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_with_valid_credentials_sets_session_cookie() {
    let app = create_test_app().await;
    register_and_get_cookie(&app, "lan").await;

    let response = post_json(
        &app,
        "/api/v1/auth/login",
        json!({"username": "lan", "password": "s3cret-enough"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);

    let cookies: Vec<String> = response
        .headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|v| v.to_str().ok().map(|s| s.to_string()))
        .collect();
    assert!(extract_session_cookie(&cookies).is_some());

    let body = body_json(response).await;
    assert_eq!(body["username"], "lan");
    assert!(!body["last_login_at"].is_null());
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let app = create_test_app().await;
    register_and_get_cookie(&app, "lan").await;

    let response = post_json(
        &app,
        "/api/v1/auth/login",
        json!({"username": "lan", "password": "wrong"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_with_unknown_user_is_unauthorized() {
    let app = create_test_app().await;

    let response = post_json(
        &app,
        "/api/v1/auth/login",
        json!({"username": "ghost", "password": "whatever"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_returns_the_authenticated_profile() {
    let app = create_test_app().await;
    let cookie = register_and_get_cookie(&app, "lan").await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/auth/me")
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["username"], "lan");
    assert_eq!(body["email"], "lan@example.com");
}

#[tokio::test]
async fn me_without_session_is_unauthorized() {
    let app = create_test_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/auth/me")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_clears_the_session_cookie() {
    let app = create_test_app().await;
    let cookie = register_and_get_cookie(&app, "lan").await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/logout")
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let cookies: Vec<String> = response
        .headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|v| v.to_str().ok().map(|s| s.to_string()))
        .collect();
    assert!(
        cookies
            .iter()
            .any(|c| c.starts_with("session_token=") && c.contains("Max-Age=0")),
        "logout must expire the session cookie: {:?}",
        cookies
    );

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(body.is_empty());
}

#[tokio::test]
async fn responses_disable_caching() {
    let app = create_test_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get(header::CACHE_CONTROL)
            .and_then(|v| v.to_str().ok()),
        Some("no-cache, no-store, must-revalidate")
    );
}
