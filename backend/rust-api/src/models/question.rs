use serde::{Deserialize, Deserializer, Serialize};

/// Question type. Unrecognized values deserialize to [`QuestionKind::Unknown`]
/// so that a single bad record cannot fail a whole question set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Mcq,
    Short,
    #[serde(other)]
    Unknown,
}

impl QuestionKind {
    pub fn as_str(&self) -> &str {
        match self {
            QuestionKind::Mcq => "mcq",
            QuestionKind::Short => "short",
            QuestionKind::Unknown => "unknown",
        }
    }
}

/// A question as stored in a quiz JSON file.
///
/// Canonical field names are `id`, `type`, `question`, `answer`, `keywords`;
/// the serde aliases adapt the legacy shapes (`q`, `ans`, `a`) that older
/// data files still carry, so nothing downstream branches on field presence.
/// `id` and `type` stay optional here: records missing either are skipped by
/// the grader rather than rejected at load time.
#[derive(Debug, Clone, Deserialize)]
pub struct Question {
    #[serde(default, deserialize_with = "id_from_string_or_number")]
    pub id: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<QuestionKind>,
    #[serde(default = "default_prompt", alias = "q")]
    pub question: String,
    #[serde(default, alias = "ans", alias = "a")]
    pub answer: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// MCQ display options, keyed by option identifier. Passed through to
    /// clients untouched; grading only compares against `answer`.
    #[serde(default)]
    pub options: Option<serde_json::Value>,
}

fn default_prompt() -> String {
    "N/A".to_string()
}

/// Question ids arrive as strings or numbers depending on the data file;
/// both normalize to a string. Empty or non-scalar ids count as missing.
fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::String(s) if !s.is_empty() => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}

impl Question {
    /// Display string for the accepted answer, derived from the question
    /// alone: the correct option for MCQ, the keyword list for short answers,
    /// `"---"` otherwise.
    pub fn expected(&self) -> String {
        match self.kind {
            Some(QuestionKind::Mcq) => self.answer.clone().unwrap_or_else(|| "---".to_string()),
            Some(QuestionKind::Short) => self.keywords.join(", "),
            _ => "---".to_string(),
        }
    }
}

/// Client-facing view of a question: no accepted answer, no keywords.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionPublic {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<serde_json::Value>,
}

impl QuestionPublic {
    /// Returns `None` for records the grader would skip anyway.
    pub fn from_question(question: &Question) -> Option<Self> {
        let id = question.id.clone()?;
        let kind = question.kind?;
        Some(Self {
            id,
            kind,
            question: question.question.clone(),
            options: question.options.clone(),
        })
    }
}

/// An entry of the subject catalog (`subjects.json` in the data directory).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub icon: String,
}
