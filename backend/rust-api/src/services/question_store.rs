use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::question::{Question, Subject};

#[derive(Debug, Error)]
pub enum QuestionStoreError {
    #[error("Question set not found: {0}")]
    NotFound(String),
    #[error("Failed to read question set {slug}")]
    Io {
        slug: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Question set {slug} is not a sequence of question records")]
    Malformed {
        slug: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Storage abstraction handed to the quiz service; the grader itself never
/// touches storage.
#[async_trait]
pub trait QuestionSetProvider: Send + Sync {
    async fn load(&self, slug: &str) -> Result<Vec<Question>, QuestionStoreError>;
}

/// File-backed provider: one `{slug}.json` per subject under the data
/// directory, plus a `subjects.json` catalog.
pub struct FileQuestionStore {
    data_dir: PathBuf,
}

impl FileQuestionStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Loads the subject catalog. A missing file is an empty catalog, not an
    /// error: a fresh deployment starts with no subjects.
    pub async fn load_subjects(&self) -> anyhow::Result<Vec<Subject>> {
        use anyhow::Context;

        let path = self.data_dir.join("subjects.json");
        match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .with_context(|| format!("Failed to parse subject catalog {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("No subject catalog at {}", path.display());
                Ok(Vec::new())
            }
            Err(e) => Err(e).with_context(|| {
                format!("Failed to read subject catalog {}", path.display())
            }),
        }
    }
}

#[async_trait]
impl QuestionSetProvider for FileQuestionStore {
    async fn load(&self, slug: &str) -> Result<Vec<Question>, QuestionStoreError> {
        // Slugs come straight from the URL path; keep lookups inside data_dir.
        let safe = !slug.is_empty()
            && slug
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !safe {
            return Err(QuestionStoreError::NotFound(slug.to_string()));
        }

        let path = self.data_dir.join(format!("{slug}.json"));
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(QuestionStoreError::NotFound(slug.to_string()));
            }
            Err(e) => {
                return Err(QuestionStoreError::Io {
                    slug: slug.to_string(),
                    source: e,
                });
            }
        };

        serde_json::from_slice(&bytes).map_err(|e| QuestionStoreError::Malformed {
            slug: slug.to_string(),
            source: e,
        })
    }
}
