use std::sync::Arc;

use crate::grading;
use crate::models::grade::{GradeReport, SubmittedAnswers};
use crate::models::question::QuestionPublic;
use crate::services::question_store::{QuestionSetProvider, QuestionStoreError};

/// Orchestrates a grading call: load the question set, normalize the
/// submission to an answers-by-id map, hand both to the pure grading core.
pub struct QuizService {
    questions: Arc<dyn QuestionSetProvider>,
}

impl QuizService {
    pub fn new(questions: Arc<dyn QuestionSetProvider>) -> Self {
        Self { questions }
    }

    /// Question set as served to clients, with answers and keywords redacted.
    pub async fn questions_for(
        &self,
        slug: &str,
    ) -> Result<Vec<QuestionPublic>, QuestionStoreError> {
        let questions = self.questions.load(slug).await?;
        Ok(questions
            .iter()
            .filter_map(QuestionPublic::from_question)
            .collect())
    }

    pub async fn grade_submission(
        &self,
        slug: &str,
        submission: SubmittedAnswers,
    ) -> Result<GradeReport, QuestionStoreError> {
        let questions = self.questions.load(slug).await?;
        let answers = submission.keyed_by_id(&questions);

        let report = grading::grade(&questions, &answers);
        tracing::info!(
            "Graded submission for {}: {}/{} correct, score {}",
            slug,
            report.correct,
            report.total,
            report.score
        );

        Ok(report)
    }
}
