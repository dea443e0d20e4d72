use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;
use validator::Validate;

use crate::{
    extractors::AppJson,
    middlewares::auth::{JwtService, SessionClaims, SESSION_COOKIE},
    models::user::{LoginRequest, RegisterRequest, UserProfile},
    services::{auth_service::AuthService, AppState},
};

fn session_cookie(state: &AppState, token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(state.config.session_ttl_seconds))
        .build()
}

fn auth_service(state: &AppState) -> AuthService {
    AuthService::new(
        state.users.clone(),
        JwtService::new(&state.config.jwt_secret),
        state.config.session_ttl_seconds,
    )
}

/// POST /api/v1/auth/register - Register a new user
pub async fn register(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    AppJson(req): AppJson<RegisterRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    // Validate request
    if let Err(e) = req.validate() {
        return Err((StatusCode::BAD_REQUEST, format!("Validation error: {}", e)));
    }

    tracing::info!("Registering new user: {}", req.username);

    let service = auth_service(&state);

    match service.register(req).await {
        Ok(response) => {
            tracing::info!("User registered successfully");

            let jar = jar.add(session_cookie(&state, response.session_token));

            Ok((StatusCode::CREATED, jar, Json(response.user)))
        }
        Err(e) => {
            tracing::warn!("Failed to register user: {}", e);
            Err((StatusCode::BAD_REQUEST, e.to_string()))
        }
    }
}

/// POST /api/v1/auth/login - Login with username and password
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    // Validate request
    if let Err(e) = req.validate() {
        return Err((StatusCode::BAD_REQUEST, format!("Validation error: {}", e)));
    }

    tracing::info!("Login attempt for user: {}", req.username);

    let service = auth_service(&state);

    match service.login(req).await {
        Ok(response) => {
            tracing::info!("User logged in successfully");

            let jar = jar.add(session_cookie(&state, response.session_token));

            Ok((StatusCode::OK, jar, Json(response.user)))
        }
        Err(e) => {
            tracing::warn!("Failed login: {}", e);
            Err((StatusCode::UNAUTHORIZED, e.to_string()))
        }
    }
}

/// POST /api/v1/auth/logout - Clear the session cookie
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    tracing::info!("Logging out user");

    let cookie = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::ZERO)
        .build();

    (StatusCode::NO_CONTENT, jar.add(cookie))
}

/// GET /api/v1/auth/me - Get current user profile (protected)
pub async fn get_current_user(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<SessionClaims>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    tracing::debug!("Getting current user profile for: {}", claims.username);

    let service = auth_service(&state);

    match service.get_user_by_username(&claims.username).await {
        Ok(user) => Ok((StatusCode::OK, Json(UserProfile::from(user)))),
        Err(e) => {
            tracing::warn!("Failed to get user: {}", e);
            Err((StatusCode::NOT_FOUND, e.to_string()))
        }
    }
}
