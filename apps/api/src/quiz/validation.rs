//! Schema validation for decoded question sets.
//!
//! Same contract as the analysis validator: a pure function over
//! `serde_json::Value` that returns either a fully normalized `QuestionSet`
//! or the first violated field.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::analysis::validation::ValidationError;
use crate::quiz::models::{AnswerKey, Mcq, QuestionSet, OPTIONS_PER_QUESTION};

/// `"A. text"`, `"b) text"`, `"(C) text"`, `"D: text"`.
static OPTION_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^\s*\(?([A-Da-d])[.):]\s+(.*)$").expect("option label regex")
});

/// Accepted spellings of the answer key field, in order of preference.
const ANSWER_FIELDS: [&str; 2] = ["correct_answer", "correctAnswer"];

/// Validates a decoded candidate. The list may arrive as `mcqs` or `questions`.
pub fn validate_question_set(candidate: &Value) -> Result<QuestionSet, ValidationError> {
    let root = candidate
        .as_object()
        .ok_or_else(|| ValidationError::new("$", "question set must be a JSON object"))?;

    let (field, list) = match (root.get("mcqs"), root.get("questions")) {
        (Some(list), _) => ("mcqs", list),
        (None, Some(list)) => ("questions", list),
        (None, None) => return Err(ValidationError::new("mcqs", "is required")),
    };
    let list = list
        .as_array()
        .ok_or_else(|| ValidationError::new(field, "must be an array"))?;
    if list.is_empty() {
        return Err(ValidationError::new(field, "must contain at least one question"));
    }

    let mcqs = list
        .iter()
        .enumerate()
        .map(|(i, entry)| validate_mcq(entry, &format!("{field}[{i}]")))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(QuestionSet { mcqs })
}

fn validate_mcq(entry: &Value, path: &str) -> Result<Mcq, ValidationError> {
    let obj = entry
        .as_object()
        .ok_or_else(|| ValidationError::new(path, "must be an object"))?;

    let question = non_empty_str(obj.get("question"))
        .ok_or_else(|| ValidationError::new(format!("{path}.question"), "must be a non-empty string"))?;

    let raw_options = obj
        .get("options")
        .and_then(Value::as_array)
        .ok_or_else(|| ValidationError::new(format!("{path}.options"), "must be an array"))?;
    if raw_options.len() != OPTIONS_PER_QUESTION {
        return Err(ValidationError::new(
            format!("{path}.options"),
            format!(
                "must contain exactly {OPTIONS_PER_QUESTION} options, got {}",
                raw_options.len()
            ),
        ));
    }
    let raw_options = raw_options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            non_empty_str(Some(option)).ok_or_else(|| {
                ValidationError::new(format!("{path}.options[{i}]"), "must be a non-empty string")
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let options = raw_options
        .iter()
        .zip(AnswerKey::ALL)
        .map(|(raw, key)| strip_option_label(raw, key).to_string())
        .collect::<Vec<_>>();

    let (answer_field, raw_answer) = ANSWER_FIELDS
        .iter()
        .find_map(|field| non_empty_str(obj.get(*field)).map(|answer| (*field, answer)))
        .ok_or_else(|| {
            ValidationError::new(
                format!("{path}.{}", ANSWER_FIELDS[0]),
                "must be a non-empty string",
            )
        })?;
    let correct_answer = resolve_answer(raw_answer, &raw_options, &options).ok_or_else(|| {
        ValidationError::new(
            format!("{path}.{answer_field}"),
            format!("'{raw_answer}' does not name one of the options"),
        )
    })?;

    let topic = match obj.get("topic") {
        None | Some(Value::Null) => None,
        Some(Value::String(t)) if t.trim().is_empty() => None,
        Some(Value::String(t)) => Some(t.trim().to_string()),
        Some(_) => {
            return Err(ValidationError::new(
                format!("{path}.topic"),
                "must be a string",
            ))
        }
    };

    Ok(Mcq {
        question: question.to_string(),
        options,
        correct_answer,
        topic,
    })
}

/// Removes a leading label only when it names the option's own position, so
/// text such as `"C. elegans"` in slot A is left alone.
fn strip_option_label(raw: &str, key: AnswerKey) -> &str {
    match OPTION_LABEL.captures(raw) {
        Some(caps) => {
            let labelled = caps
                .get(1)
                .and_then(|m| AnswerKey::parse(m.as_str()))
                .is_some_and(|label| label == key);
            match caps.get(2) {
                Some(rest) if labelled && !rest.as_str().trim().is_empty() => rest.as_str().trim(),
                _ => raw.trim(),
            }
        }
        None => raw.trim(),
    }
}

/// A letter wins; otherwise the answer must equal one option's text, labelled
/// or not (case-insensitive).
fn resolve_answer(raw: &str, raw_options: &[&str], options: &[String]) -> Option<AnswerKey> {
    if let Some(key) = AnswerKey::parse(raw) {
        return Some(key);
    }
    let wanted = raw.trim();
    raw_options
        .iter()
        .zip(options)
        .position(|(labelled, bare)| {
            labelled.trim().eq_ignore_ascii_case(wanted) || bare.eq_ignore_ascii_case(wanted)
        })
        .and_then(AnswerKey::from_index)
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}
