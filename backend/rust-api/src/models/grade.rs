use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::question::{Question, QuestionKind};

/// Per-question grading outcome.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GradeDetail {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub question: String,
    pub correct: bool,
    pub user_answer: String,
    pub expected: String,
}

/// Aggregate grading result returned to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GradeReport {
    /// 0..=100, integer-rounded.
    pub score: u32,
    pub total: usize,
    pub correct: usize,
    pub details: Vec<GradeDetail>,
}

/// A submission body: either answers keyed by question id or a positional
/// array aligned with question order. Anything else fails deserialization,
/// which surfaces to the client as a bad-request error.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SubmittedAnswers {
    ById(HashMap<String, String>),
    Positional(Vec<String>),
}

impl SubmittedAnswers {
    /// Normalize either submission form to a mapping keyed by question id.
    ///
    /// Positional answers align with the question records in file order,
    /// including records the grader later skips, so that both forms of the
    /// same submission produce identical reports.
    pub fn keyed_by_id(self, questions: &[Question]) -> HashMap<String, String> {
        match self {
            SubmittedAnswers::ById(map) => map,
            SubmittedAnswers::Positional(list) => {
                let mut map = HashMap::new();
                for (question, answer) in questions.iter().zip(list) {
                    if let Some(id) = &question.id {
                        map.insert(id.clone(), answer);
                    }
                }
                map
            }
        }
    }
}
