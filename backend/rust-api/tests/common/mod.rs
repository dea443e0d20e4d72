use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use quizhub_api::{config::Config, create_router, services::AppState};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

pub async fn create_test_app() -> Router {
    // Initialize tracing for tests
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    // Each test app gets its own data directory and user file
    let data_dir = std::env::temp_dir().join(format!("quizhub-test-{}", uuid::Uuid::new_v4()));
    tokio::fs::create_dir_all(&data_dir)
        .await
        .expect("Failed to create test data dir");

    seed_test_data(&data_dir).await;

    let config = Config {
        bind_addr: "127.0.0.1:0".to_string(),
        data_dir: data_dir.clone(),
        users_file: data_dir.join("users.json"),
        jwt_secret: "test-secret".to_string(),
        session_ttl_seconds: 3600,
    };

    let app_state = Arc::new(
        AppState::new(config)
            .await
            .expect("Failed to initialize test app state"),
    );

    create_router(app_state)
}

async fn seed_test_data(data_dir: &PathBuf) {
    let subjects = json!([
        {"name": "Toán Rời Rạc Và Ứng Dụng", "slug": "mth254", "icon": "fa-solid fa-calculator"},
        {"name": "Cơ Sở Dữ Liệu", "slug": "is301", "icon": "fa-solid fa-database"}
    ]);
    tokio::fs::write(data_dir.join("subjects.json"), subjects.to_string())
        .await
        .expect("Failed to seed subject catalog");

    // is301 deliberately has no question file: its catalog entry exists but
    // its question set is missing.
    let questions = json!([
        {"id": 1, "type": "mcq", "question": "1 + 1 = ?", "answer": "B",
         "options": {"A": "1", "B": "2", "C": "3", "D": "4"}},
        {"id": 2, "type": "short", "question": "Dòng chảy lớn là gì?",
         "keywords": ["nước", "sông"]},
        {"question": "record with no id or type"}
    ]);
    tokio::fs::write(data_dir.join("mth254.json"), questions.to_string())
        .await
        .expect("Failed to seed question set");
}

/// Register a user and return the session cookie value for follow-up requests.
pub async fn register_and_get_cookie(app: &Router, username: &str) -> String {
    let request_body = json!({
        "username": username,
        "email": format!("{}@example.com", username),
        "password": "s3cret-enough",
    });

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/register")
                .header("content-type", "application/json")
                .body(Body::from(request_body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    extract_session_cookie(
        &response
            .headers()
            .get_all("set-cookie")
            .iter()
            .filter_map(|v| v.to_str().ok().map(|s| s.to_string()))
            .collect::<Vec<_>>(),
    )
    .expect("register response must set a session cookie")
}

/// Extract the `session_token` cookie pair ("session_token=VALUE") from
/// Set-Cookie headers.
pub fn extract_session_cookie(cookies: &[String]) -> Option<String> {
    for cookie in cookies {
        if cookie.starts_with("session_token=") {
            let parts: Vec<&str> = cookie.split(';').collect();
            if let Some(first) = parts.first() {
                if !first.trim_end().ends_with('=') {
                    return Some(first.to_string());
                }
            }
        }
    }
    None
}

pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}
