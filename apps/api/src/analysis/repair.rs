//! Response repair — best-effort string patching of model output before decode.
//!
//! The model is allowed 8192 output tokens and still occasionally stops
//! mid-document. Rather than a general JSON repair algorithm, this module keeps
//! a small table of truncation signatures observed in practice, each a
//! (detect, repair) pair. Add a row to `SIGNATURES` to cover a new shape.
//!
//! This is a heuristic safety net, not a correctness guarantee: the repaired
//! text still has to decode and pass `validation::validate`.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::llm_client::strip_code_fences;

/// Matches the opening of the `overallSuggestions` string value.
static SUGGESTIONS_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""overallSuggestions"\s*:\s*""#).expect("valid overallSuggestions regex")
});

const EXPERIENCE_KEY: &str = "\"experienceAnalysis\"";
const PROJECT_KEY: &str = "\"projectAnalysis\"";
const EMPTY_TAIL: &str = "\"experienceAnalysis\":[],\"projectAnalysis\":[]}";

/// A recognizable partial-output pattern and the patch that closes it.
pub struct TruncationSignature {
    pub name: &'static str,
    detect: fn(&str) -> bool,
    repair: fn(&str) -> String,
}

/// Checked in order; the first match wins.
static SIGNATURES: &[TruncationSignature] = &[
    TruncationSignature {
        name: "unterminated_overall_suggestions",
        detect: has_unterminated_suggestions,
        repair: close_truncated_suggestions,
    },
    TruncationSignature {
        name: "truncated_experience_analysis",
        detect: has_experience_without_projects,
        repair: replace_truncated_sections,
    },
    TruncationSignature {
        name: "unclosed_root_object",
        detect: has_unclosed_root,
        repair: close_root,
    },
];

/// Intermediate text produced for one orchestration call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairAttempt {
    pub text: String,
    /// Name of the signature that rewrote the text, if any.
    pub applied: Option<&'static str>,
}

/// Strips code fences and applies the first matching truncation signature.
/// Always returns a string; never fails.
pub fn repair(text: &str) -> String {
    attempt_repair(text).text
}

/// Like `repair`, but also reports which signature fired.
///
/// Text that already decodes as JSON is returned untouched (after fence
/// stripping), so valid documents are never rewritten.
pub fn attempt_repair(text: &str) -> RepairAttempt {
    let cleaned = strip_code_fences(text);

    if serde_json::from_str::<Value>(&cleaned).is_ok() {
        return RepairAttempt {
            text: cleaned,
            applied: None,
        };
    }

    SIGNATURES
        .iter()
        .find(|signature| (signature.detect)(&cleaned))
        .map(|signature| RepairAttempt {
            text: (signature.repair)(&cleaned),
            applied: Some(signature.name),
        })
        .unwrap_or(RepairAttempt {
            text: cleaned,
            applied: None,
        })
}

// ────────────────────────────────────────────────────────────────────────────
// Signature: overallSuggestions cut off mid-sentence
// ────────────────────────────────────────────────────────────────────────────

fn has_unterminated_suggestions(text: &str) -> bool {
    SUGGESTIONS_VALUE
        .find(text)
        .is_some_and(|m| closing_quote(&text[m.end()..]).is_none())
}

fn close_truncated_suggestions(text: &str) -> String {
    let Some(m) = SUGGESTIONS_VALUE.find(text) else {
        return text.to_string();
    };
    let (head, partial) = text.split_at(m.end());
    format!("{head}{}\",{EMPTY_TAIL}", complete_sentence(partial))
}

/// Drops the dangling partial sentence. Keeps everything up to the last
/// sentence terminator; without one, drops the cut-off word and ends the
/// remainder with a period.
fn complete_sentence(partial: &str) -> String {
    let partial = partial.trim_end_matches('\\');

    if let Some(end) = partial.rfind(['.', '!', '?']) {
        return partial[..=end].to_string();
    }

    let kept = match partial.rfind(char::is_whitespace) {
        Some(idx) => &partial[..idx],
        None => "",
    };
    let kept = kept
        .trim_end()
        .trim_end_matches([',', ';', ':', '-', '\\'])
        .trim_end();

    if kept.is_empty() {
        String::new()
    } else {
        format!("{kept}.")
    }
}

/// Byte offset of the first unescaped `"` in `s`.
fn closing_quote(s: &str) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => return Some(i),
            _ => {}
        }
    }
    None
}

// ────────────────────────────────────────────────────────────────────────────
// Signature: cut off inside experienceAnalysis (projectAnalysis never started)
// ────────────────────────────────────────────────────────────────────────────

fn has_experience_without_projects(text: &str) -> bool {
    text.contains(EXPERIENCE_KEY) && !text.contains(PROJECT_KEY)
}

fn replace_truncated_sections(text: &str) -> String {
    let Some(idx) = text.find(EXPERIENCE_KEY) else {
        return text.to_string();
    };
    let head = text[..idx].trim_end().trim_end_matches(',').trim_end();
    let separator = if head.ends_with('{') { "" } else { "," };
    format!("{head}{separator}{EMPTY_TAIL}")
}

// ────────────────────────────────────────────────────────────────────────────
// Signature: root object opened but never closed
// ────────────────────────────────────────────────────────────────────────────

fn has_unclosed_root(text: &str) -> bool {
    text.contains('{') && !text.contains('}')
}

fn close_root(text: &str) -> String {
    format!("{text}}}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const VALID_RESULT: &str = r#"{
        "matchScore": 85,
        "keywordAnalysis": {
            "coveragePercentage": 70,
            "neededKeywords": [{"keyword": "React", "found": true}]
        },
        "overallSuggestions": "Quantify impact. Mention \"TypeScript\" projects!",
        "experienceAnalysis": [{"title": "Dev", "relevanceScore": 8, "depthScore": 6, "suggestions": []}],
        "projectAnalysis": []
    }"#;

    fn parse(text: &str) -> Value {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn test_valid_input_is_not_corrupted() {
        let repaired = repair(VALID_RESULT);
        assert_eq!(parse(&repaired), parse(VALID_RESULT));
        assert_eq!(attempt_repair(VALID_RESULT).applied, None);
    }

    #[test]
    fn test_valid_input_without_project_key_is_not_rewritten() {
        let text = r#"{"matchScore": 60, "keywordAnalysis": {"coveragePercentage": 40, "neededKeywords": []},
            "experienceAnalysis": [{"title": "Dev", "relevanceScore": 5, "depthScore": 5}]}"#;
        assert_eq!(parse(&repair(text)), parse(text));
    }

    #[test]
    fn test_fenced_valid_input_unwrapped() {
        let fenced = format!("```json\n{VALID_RESULT}\n```");
        assert_eq!(parse(&repair(&fenced)), parse(VALID_RESULT));
    }

    #[test]
    fn test_truncated_overall_suggestions_recovered() {
        let input = r#"{"matchScore":70,"keywordAnalysis":{"coveragePercentage":50,"neededKeywords":[]},"overallSuggestions":"Improve user adopti"#;
        let attempt = attempt_repair(input);
        assert_eq!(attempt.applied, Some("unterminated_overall_suggestions"));

        let value = parse(&attempt.text);
        assert_eq!(value["experienceAnalysis"], json!([]));
        assert_eq!(value["projectAnalysis"], json!([]));
        assert_eq!(value["matchScore"], 70);
        assert_eq!(value["overallSuggestions"], "Improve user.");
    }

    #[test]
    fn test_truncated_suggestions_keep_last_complete_sentence() {
        let input = r#"{"matchScore":55,"keywordAnalysis":{"coveragePercentage":20,"neededKeywords":[]},"overallSuggestions":"Add AWS. Highlight leadership in"#;
        let value = parse(&repair(input));
        assert_eq!(value["overallSuggestions"], "Add AWS.");
    }

    #[test]
    fn test_truncated_suggestions_single_word_becomes_empty() {
        let input = r#"{"matchScore":55,"keywordAnalysis":{"coveragePercentage":20,"neededKeywords":[]},"overallSuggestions":"Impro"#;
        let value = parse(&repair(input));
        assert_eq!(value["overallSuggestions"], "");
    }

    #[test]
    fn test_truncated_suggestions_dangling_escape_dropped() {
        let input = "{\"matchScore\":55,\"keywordAnalysis\":{\"coveragePercentage\":20,\"neededKeywords\":[]},\"overallSuggestions\":\"Use the word \\";
        let value = parse(&repair(input));
        assert_eq!(value["overallSuggestions"], "Use the word.");
    }

    #[test]
    fn test_truncated_experience_array_replaced_with_empty_sections() {
        let input = r#"{"matchScore":64,"keywordAnalysis":{"coveragePercentage":45,"neededKeywords":[{"keyword":"Go","found":false}]},"overallSuggestions":"Learn Go.","experienceAnalysis":[{"title":"Backend Dev","relevanceScore":7,"depthSc"#;
        let attempt = attempt_repair(input);
        assert_eq!(attempt.applied, Some("truncated_experience_analysis"));

        let value = parse(&attempt.text);
        assert_eq!(value["overallSuggestions"], "Learn Go.");
        assert_eq!(value["keywordAnalysis"]["neededKeywords"][0]["keyword"], "Go");
        assert_eq!(value["experienceAnalysis"], json!([]));
        assert_eq!(value["projectAnalysis"], json!([]));
    }

    #[test]
    fn test_experience_as_first_key_has_no_leading_comma() {
        let input = r#"{"experienceAnalysis":[{"title":"#;
        let value = parse(&repair(input));
        assert_eq!(value["experienceAnalysis"], json!([]));
    }

    #[test]
    fn test_unclosed_root_gets_closing_brace() {
        let input = r#"{"matchScore": 12"#;
        let attempt = attempt_repair(input);
        assert_eq!(attempt.applied, Some("unclosed_root_object"));
        assert_eq!(parse(&attempt.text)["matchScore"], 12);
    }

    #[test]
    fn test_unrecognized_garbage_passes_through() {
        let input = "I'm sorry, I can't help with that.";
        let attempt = attempt_repair(input);
        assert_eq!(attempt.applied, None);
        assert_eq!(attempt.text, input);
    }

    #[test]
    fn test_truncation_inside_project_analysis_is_left_for_extraction() {
        let input = r#"{"matchScore":80,"keywordAnalysis":{"coveragePercentage":60,"neededKeywords":[]},"overallSuggestions":"Good.","experienceAnalysis":[],"projectAnalysis":[{"title":"Ap"#;
        let attempt = attempt_repair(input);
        assert_eq!(attempt.applied, None);
        assert!(serde_json::from_str::<Value>(&attempt.text).is_err());
    }

    #[test]
    fn test_closing_quote_skips_escaped_quotes() {
        assert_eq!(closing_quote(r#"say \"hi\" now" rest"#), Some(14));
        assert_eq!(closing_quote(r#"no end \""#), None);
    }

    #[test]
    fn test_signature_names_are_unique() {
        let mut names: Vec<_> = SIGNATURES.iter().map(|s| s.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), SIGNATURES.len());
    }
}
