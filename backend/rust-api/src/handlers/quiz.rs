use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use std::sync::Arc;

use crate::{
    extractors::AppJson,
    middlewares::auth::SessionClaims,
    models::grade::SubmittedAnswers,
    services::{question_store::QuestionStoreError, quiz_service::QuizService, AppState},
};

fn map_store_error(e: QuestionStoreError) -> (StatusCode, String) {
    match e {
        QuestionStoreError::NotFound(_) => (StatusCode::NOT_FOUND, e.to_string()),
        QuestionStoreError::Io { .. } | QuestionStoreError::Malformed { .. } => {
            tracing::error!("Question store failure: {:#}", anyhow::Error::new(e));
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to load question set".to_string(),
            )
        }
    }
}

/// GET /api/v1/subjects - List the subject catalog (protected)
pub async fn list_subjects(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.subjects.clone())
}

/// GET /api/v1/subjects/{slug} - One subject, 404 when unknown (protected)
pub async fn get_subject(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    state
        .subjects
        .iter()
        .find(|s| s.slug == slug)
        .cloned()
        .map(Json)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("Subject not found: {}", slug)))
}

/// GET /api/v1/quiz/{slug}/questions - Question set without answers (protected)
pub async fn get_questions(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let service = QuizService::new(state.questions.clone());

    let questions = service
        .questions_for(&slug)
        .await
        .map_err(map_store_error)?;

    Ok(Json(questions))
}

/// POST /api/v1/quiz/{slug}/submit - Grade a submission (protected)
pub async fn submit_quiz(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Extension(claims): Extension<SessionClaims>,
    AppJson(submission): AppJson<SubmittedAnswers>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    tracing::info!("Submission for {} by {}", slug, claims.username);

    let service = QuizService::new(state.questions.clone());

    let report = service
        .grade_submission(&slug, submission)
        .await
        .map_err(map_store_error)?;

    Ok(Json(report))
}
