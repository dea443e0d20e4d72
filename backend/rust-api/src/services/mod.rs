use std::sync::Arc;

use crate::config::Config;
use crate::models::question::Subject;

use question_store::{FileQuestionStore, QuestionSetProvider};
use user_store::{JsonUserStore, UserStore};

pub struct AppState {
    pub config: Config,
    pub subjects: Vec<Subject>,
    pub questions: Arc<dyn QuestionSetProvider>,
    pub users: Arc<dyn UserStore>,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = FileQuestionStore::new(config.data_dir.clone());

        let subjects = store.load_subjects().await?;
        tracing::info!(
            "Loaded {} subjects from {}",
            subjects.len(),
            config.data_dir.display()
        );

        let users = JsonUserStore::open(config.users_file.clone()).await?;
        tracing::info!("User store ready at {}", config.users_file.display());

        Ok(Self {
            config,
            subjects,
            questions: Arc::new(store),
            users: Arc::new(users),
        })
    }
}

pub mod auth_service;
pub mod question_store;
pub mod quiz_service;
pub mod user_store;
