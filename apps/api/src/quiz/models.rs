//! Question set types. Answer keys are canonical letters everywhere past the
//! validation boundary; model-side spellings never leak further.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Every question carries exactly this many options.
pub const OPTIONS_PER_QUESTION: usize = 4;

/// Topic bucket for questions the model did not tag.
pub const GENERAL_TOPIC: &str = "General";

/// Canonical answer key. Serializes as `"A"`..`"D"`; deserializes from any
/// spelling `AnswerKey::parse` accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum AnswerKey {
    A,
    B,
    C,
    D,
}

impl AnswerKey {
    pub const ALL: [AnswerKey; OPTIONS_PER_QUESTION] =
        [AnswerKey::A, AnswerKey::B, AnswerKey::C, AnswerKey::D];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn letter(self) -> char {
        match self {
            AnswerKey::A => 'A',
            AnswerKey::B => 'B',
            AnswerKey::C => 'C',
            AnswerKey::D => 'D',
        }
    }

    /// Accepts `B`, `b`, `B.`, `B)` and `(B)`.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let trimmed = trimmed.strip_prefix('(').unwrap_or(trimmed);
        let trimmed = trimmed.trim_end_matches(['.', ')']);

        let mut chars = trimmed.chars();
        let letter = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        match letter.to_ascii_uppercase() {
            'A' => Some(AnswerKey::A),
            'B' => Some(AnswerKey::B),
            'C' => Some(AnswerKey::C),
            'D' => Some(AnswerKey::D),
            _ => None,
        }
    }
}

impl TryFrom<String> for AnswerKey {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        AnswerKey::parse(&raw).ok_or_else(|| format!("'{raw}' is not an answer letter A-D"))
    }
}

impl fmt::Display for AnswerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// One multiple-choice question, answer key included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mcq {
    pub question: String,
    /// Option text without its `"A. "` label, in A–D order.
    pub options: Vec<String>,
    pub correct_answer: AnswerKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}

impl Mcq {
    pub fn topic_or_general(&self) -> &str {
        self.topic.as_deref().unwrap_or(GENERAL_TOPIC)
    }
}

/// A validated question set. Only `validation::validate_question_set` builds
/// one from model output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionSet {
    pub mcqs: Vec<Mcq>,
}

// ────────────────────────────────────────────────────────────────────────────
// Client view (no answer keys)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub index: usize,
    pub question: String,
    /// Labelled for display: `"A. ..."`.
    pub options: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizView {
    pub questions: Vec<QuestionView>,
}

impl From<&QuestionSet> for QuizView {
    fn from(set: &QuestionSet) -> Self {
        let questions = set
            .mcqs
            .iter()
            .enumerate()
            .map(|(index, mcq)| QuestionView {
                index,
                question: mcq.question.clone(),
                options: mcq
                    .options
                    .iter()
                    .zip(AnswerKey::ALL)
                    .map(|(text, key)| format!("{key}. {text}"))
                    .collect(),
                topic: mcq.topic.clone(),
            })
            .collect();
        QuizView { questions }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_set() -> QuestionSet {
        QuestionSet {
            mcqs: vec![Mcq {
                question: "What is a hook in React?".to_string(),
                options: vec![
                    "A class method".to_string(),
                    "A function that uses React state".to_string(),
                    "A CSS selector".to_string(),
                    "A build step".to_string(),
                ],
                correct_answer: AnswerKey::B,
                topic: Some("React".to_string()),
            }],
        }
    }

    #[test]
    fn test_answer_key_parse_spellings() {
        assert_eq!(AnswerKey::parse("B"), Some(AnswerKey::B));
        assert_eq!(AnswerKey::parse(" c "), Some(AnswerKey::C));
        assert_eq!(AnswerKey::parse("D."), Some(AnswerKey::D));
        assert_eq!(AnswerKey::parse("A)"), Some(AnswerKey::A));
        assert_eq!(AnswerKey::parse("(b)"), Some(AnswerKey::B));
    }

    #[test]
    fn test_answer_key_rejects_non_letters() {
        assert_eq!(AnswerKey::parse(""), None);
        assert_eq!(AnswerKey::parse("E"), None);
        assert_eq!(AnswerKey::parse("AB"), None);
        assert_eq!(AnswerKey::parse("Option B"), None);
    }

    #[test]
    fn test_answer_key_serializes_as_letter() {
        assert_eq!(serde_json::to_value(AnswerKey::C).unwrap(), json!("C"));
        let key: AnswerKey = serde_json::from_value(json!("d")).unwrap();
        assert_eq!(key, AnswerKey::D);
        assert!(serde_json::from_value::<AnswerKey>(json!("Z")).is_err());
    }

    #[test]
    fn test_index_round_trip() {
        for (index, key) in AnswerKey::ALL.into_iter().enumerate() {
            assert_eq!(AnswerKey::from_index(index), Some(key));
        }
        assert_eq!(AnswerKey::from_index(4), None);
    }

    #[test]
    fn test_quiz_view_hides_answers_and_labels_options() {
        let view = QuizView::from(&sample_set());
        let value = serde_json::to_value(&view).unwrap();
        assert!(!value.to_string().contains("correct_answer"));
        assert_eq!(value["questions"][0]["options"][1], "B. A function that uses React state");
        assert_eq!(value["questions"][0]["topic"], "React");
    }

    #[test]
    fn test_question_set_serializes_under_mcqs() {
        let value = serde_json::to_value(sample_set()).unwrap();
        assert_eq!(value["mcqs"][0]["correct_answer"], "B");
        let back: QuestionSet = serde_json::from_value(value).unwrap();
        assert_eq!(back, sample_set());
    }

    #[test]
    fn test_untagged_question_is_general() {
        let mut mcq = sample_set().mcqs.remove(0);
        mcq.topic = None;
        assert_eq!(mcq.topic_or_general(), GENERAL_TOPIC);
    }
}
