use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::Utc;
use uuid::Uuid;

use crate::middlewares::auth::{JwtService, SessionClaims};
use crate::models::user::{LoginRequest, RegisterRequest, User, UserProfile};
use crate::services::user_store::UserStore;

pub struct AuthResponse {
    pub session_token: String,
    pub user: UserProfile,
}

pub struct AuthService {
    users: Arc<dyn UserStore>,
    jwt_service: JwtService,
    session_ttl_seconds: i64,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        jwt_service: JwtService,
        session_ttl_seconds: i64,
    ) -> Self {
        Self {
            users,
            jwt_service,
            session_ttl_seconds,
        }
    }

    /// Hash a password using bcrypt with the default cost
    pub fn hash_password(&self, password: &str) -> Result<String> {
        hash(password, DEFAULT_COST).context("Failed to hash password")
    }

    /// Verify a password against a hash
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        verify(password, hash).context("Failed to verify password")
    }

    /// Register a new user
    pub async fn register(&self, req: RegisterRequest) -> Result<AuthResponse> {
        let username = req.username.trim().to_string();
        let email = req.email.trim().to_string();

        // Check if user already exists
        if self.users.find_by_username(&username).await?.is_some() {
            return Err(anyhow!("User with this username already exists"));
        }

        let password_hash = self.hash_password(&req.password)?;

        let user = User {
            id: Uuid::new_v4().to_string(),
            username,
            email,
            password_hash,
            created_at: Utc::now(),
            last_login_at: None,
        };

        self.users.insert(user.clone()).await?;

        let session_token = self.issue_session_token(&user)?;

        Ok(AuthResponse {
            session_token,
            user: UserProfile::from(user),
        })
    }

    /// Login with username and password
    pub async fn login(&self, req: LoginRequest) -> Result<AuthResponse> {
        let user = self
            .users
            .find_by_username(&req.username)
            .await?
            .ok_or_else(|| anyhow!("Invalid username or password"))?;

        if !self.verify_password(&req.password, &user.password_hash)? {
            return Err(anyhow!("Invalid username or password"));
        }

        let now = Utc::now();
        self.users.update_last_login(&user.username, now).await?;

        let session_token = self.issue_session_token(&user)?;

        let mut user = user;
        user.last_login_at = Some(now);

        Ok(AuthResponse {
            session_token,
            user: UserProfile::from(user),
        })
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<User> {
        self.users
            .find_by_username(username)
            .await?
            .ok_or_else(|| anyhow!("User {} not found", username))
    }

    fn issue_session_token(&self, user: &User) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: user.id.clone(),
            username: user.username.clone(),
            exp: (now + self.session_ttl_seconds) as usize,
            iat: now as usize,
        };
        self.jwt_service
            .generate_token(claims)
            .context("Failed to generate session token")
    }
}
