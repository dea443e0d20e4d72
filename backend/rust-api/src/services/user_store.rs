use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::models::user::User;

/// Credential store abstraction, keyed by username.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn insert(&self, user: User) -> Result<()>;
    async fn update_last_login(&self, username: &str, at: DateTime<Utc>) -> Result<()>;
}

/// Flat-file store: the whole user list lives in one JSON file, loaded at
/// startup and rewritten on every mutation. Fine at this scale; the RwLock
/// serializes writers.
pub struct JsonUserStore {
    path: PathBuf,
    users: RwLock<Vec<User>>,
}

impl JsonUserStore {
    pub async fn open(path: PathBuf) -> Result<Self> {
        let users = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .with_context(|| format!("Failed to parse user file {}", path.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read user file {}", path.display()))
            }
        };

        Ok(Self {
            path,
            users: RwLock::new(users),
        })
    }

    async fn persist(&self, users: &[User]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let json = serde_json::to_vec_pretty(users).context("Failed to serialize users")?;
        tokio::fs::write(&self.path, json)
            .await
            .with_context(|| format!("Failed to write user file {}", self.path.display()))
    }
}

#[async_trait]
impl UserStore for JsonUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let username = username.trim();
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn insert(&self, user: User) -> Result<()> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == user.username) {
            anyhow::bail!("User with this username already exists");
        }
        users.push(user);
        self.persist(&users).await
    }

    async fn update_last_login(&self, username: &str, at: DateTime<Utc>) -> Result<()> {
        let mut users = self.users.write().await;
        let user = users
            .iter_mut()
            .find(|u| u.username == username)
            .with_context(|| format!("User {} not found", username))?;
        user.last_login_at = Some(at);
        self.persist(&users).await
    }
}
