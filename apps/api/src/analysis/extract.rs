//! Partial extraction — last-resort salvage of individual fields from text
//! that could not be decoded as a whole.
//!
//! Every search is independent: a miss leaves that field at its zero value.
//! The output is shaped like an analysis result but is NOT trusted until it
//! passes `validation::validate`.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{json, Value};

static MATCH_SCORE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""matchScore"\s*:\s*(\d+)"#).expect("valid matchScore regex")
});

static COVERAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""coveragePercentage"\s*:\s*(\d+)"#).expect("valid coveragePercentage regex")
});

/// Group 1 is the array body up to the first `]`; group 2 is the bracket itself,
/// absent when the array was cut off.
static NEEDED_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""neededKeywords"\s*:\s*(\[[^\]]*)(\])?"#).expect("valid neededKeywords regex")
});

static OVERALL_SUGGESTIONS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""overallSuggestions"\s*:\s*"((?:[^"\\]|\\.)*)""#)
        .expect("valid overallSuggestions regex")
});

/// Salvages whatever known fields can be found in `text`. Never fails.
pub fn extract_partial(text: &str) -> Value {
    json!({
        "matchScore": capture_integer(&MATCH_SCORE, text),
        "keywordAnalysis": {
            "coveragePercentage": capture_integer(&COVERAGE, text),
            "neededKeywords": capture_keywords(text),
        },
        "overallSuggestions": capture_suggestions(text),
        "experienceAnalysis": [],
        "projectAnalysis": [],
    })
}

fn capture_integer(re: &Regex, text: &str) -> u64 {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// Parses just the keywords sub-array, closing it if the bracket is missing.
/// Any decode failure discards the whole list.
fn capture_keywords(text: &str) -> Vec<Value> {
    let Some(caps) = NEEDED_KEYWORDS.captures(text) else {
        return Vec::new();
    };
    let Some(body) = caps.get(1) else {
        return Vec::new();
    };
    let fragment = if caps.get(2).is_some() {
        format!("{}]", body.as_str())
    } else {
        format!("{}]", body.as_str().trim_end().trim_end_matches(','))
    };

    let Ok(Value::Array(entries)) = serde_json::from_str::<Value>(&fragment) else {
        return Vec::new();
    };

    entries
        .into_iter()
        .filter(|entry| {
            let keyword_ok = entry
                .get("keyword")
                .and_then(Value::as_str)
                .is_some_and(|k| !k.trim().is_empty());
            let found_ok = entry.get("found").is_some_and(Value::is_boolean);
            keyword_ok && found_ok
        })
        .map(|entry| json!({"keyword": entry["keyword"], "found": entry["found"]}))
        .collect()
}

/// Only a fully terminated string value is salvaged.
fn capture_suggestions(text: &str) -> String {
    OVERALL_SUGGESTIONS
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| serde_json::from_str::<String>(&format!("\"{}\"", m.as_str())).ok())
        .unwrap_or_default()
}
