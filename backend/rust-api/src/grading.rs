//! Answer-grading core: text normalization and scoring.
//!
//! Pure functions only. Loading question sets and parsing submissions is the
//! caller's job (see `services::quiz_service`); this module takes parsed
//! questions plus answers keyed by question id and produces a [`GradeReport`].

use std::collections::HashMap;

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use crate::models::grade::{GradeDetail, GradeReport};
use crate::models::question::{Question, QuestionKind};

/// Fraction of keywords that must appear in a short answer for it to count
/// as correct.
pub const KEYWORD_MATCH_THRESHOLD: f64 = 0.8;

/// Normalize free text for keyword matching: lowercase, strip diacritics
/// (NFD decomposition, combining marks discarded), replace punctuation with
/// spaces and collapse whitespace runs.
///
/// Idempotent: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped: String = lowered
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A short answer is correct when at least [`KEYWORD_MATCH_THRESHOLD`] of the
/// keywords occur (as substrings, after normalization) in the normalized
/// answer. Each keyword counts at most once; order is irrelevant. An empty
/// keyword list can never be satisfied.
pub fn is_short_answer_correct(user_answer: &str, keywords: &[String]) -> bool {
    if keywords.is_empty() {
        return false;
    }

    let answer = normalize(user_answer);
    let matched = keywords
        .iter()
        .filter(|kw| answer.contains(normalize(kw).as_str()))
        .count();

    matched as f64 / keywords.len() as f64 >= KEYWORD_MATCH_THRESHOLD
}

/// MCQ answers are option identifiers, not free text: raw string equality,
/// no trimming, no case folding.
pub fn is_mcq_correct(user_answer: &str, correct_option: &str) -> bool {
    user_answer == correct_option
}

/// Grade a question set against answers keyed by question id.
///
/// Questions missing an id or a type are skipped silently and appear neither
/// in the details nor in the total. A question with an unrecognized type
/// grades as incorrect with expected `"---"`. An empty question set grades
/// to score 0 with no details.
pub fn grade(questions: &[Question], answers: &HashMap<String, String>) -> GradeReport {
    let mut details = Vec::with_capacity(questions.len());

    for question in questions {
        let (Some(id), Some(kind)) = (&question.id, question.kind) else {
            continue;
        };

        let user_answer = answers.get(id).cloned().unwrap_or_default();

        let correct = match kind {
            QuestionKind::Mcq => question
                .answer
                .as_deref()
                .is_some_and(|option| is_mcq_correct(&user_answer, option)),
            QuestionKind::Short => is_short_answer_correct(&user_answer, &question.keywords),
            QuestionKind::Unknown => false,
        };

        details.push(GradeDetail {
            id: id.clone(),
            kind,
            question: question.question.clone(),
            correct,
            user_answer,
            expected: question.expected(),
        });
    }

    let total = details.len();
    let correct = details.iter().filter(|d| d.correct).count();
    let score = if total == 0 {
        0
    } else {
        (correct as f64 / total as f64 * 100.0).round() as u32
    };

    GradeReport {
        score,
        total,
        correct,
        details,
    }
}
