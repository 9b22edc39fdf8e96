//! Schema validation for decoded model output.
//!
//! `validate` is pure: it reads a generic `serde_json::Value` and either returns
//! a normalized `AnalysisResult` (optional fields defaulted) or the first
//! violated field. Nothing is validated partially.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::analysis::models::{
    AnalysisResult, ExperienceAnalysis, KeywordAnalysis, NeededKeyword, ProjectAnalysis,
    MAX_COMPLEXITY_SCORE, MAX_PERCENTAGE, MAX_SUB_SCORE,
};

/// First schema violation found in a candidate document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    /// Dotted path of the offending field, with array indices, e.g.
    /// `keywordAnalysis.neededKeywords[2].found`.
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub(crate) fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Validates a decoded candidate against the analysis result schema.
///
/// Check order: root object, `matchScore`, `keywordAnalysis`,
/// `coveragePercentage`, `neededKeywords` and each of its entries, then the
/// optional `overallSuggestions`, `experienceAnalysis` and `projectAnalysis`
/// (absent or null → empty).
pub fn validate(candidate: &Value) -> Result<AnalysisResult, ValidationError> {
    let root = candidate
        .as_object()
        .ok_or_else(|| ValidationError::new("$", "result must be a JSON object"))?;

    let match_score = integer_in_range(root.get("matchScore"), "matchScore", MAX_PERCENTAGE)?;

    let keyword_analysis = root
        .get("keywordAnalysis")
        .ok_or_else(|| ValidationError::new("keywordAnalysis", "is required"))?
        .as_object()
        .ok_or_else(|| ValidationError::new("keywordAnalysis", "must be an object"))?;
    let keyword_analysis = validate_keyword_analysis(keyword_analysis)?;

    let overall_suggestions = match root.get("overallSuggestions") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(_) => {
            return Err(ValidationError::new(
                "overallSuggestions",
                "must be a string",
            ))
        }
    };

    let experience_analysis = optional_array(root, "experienceAnalysis")?
        .iter()
        .enumerate()
        .map(|(i, entry)| validate_experience(entry, i))
        .collect::<Result<Vec<_>, _>>()?;

    let project_analysis = optional_array(root, "projectAnalysis")?
        .iter()
        .enumerate()
        .map(|(i, entry)| validate_project(entry, i))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AnalysisResult {
        match_score,
        keyword_analysis,
        overall_suggestions,
        experience_analysis,
        project_analysis,
    })
}

fn validate_keyword_analysis(obj: &Map<String, Value>) -> Result<KeywordAnalysis, ValidationError> {
    let coverage_percentage = integer_in_range(
        obj.get("coveragePercentage"),
        "keywordAnalysis.coveragePercentage",
        MAX_PERCENTAGE,
    )?;

    let needed = obj
        .get("neededKeywords")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            ValidationError::new("keywordAnalysis.neededKeywords", "must be an array")
        })?;

    let needed_keywords = needed
        .iter()
        .enumerate()
        .map(|(i, entry)| validate_needed_keyword(entry, i))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(KeywordAnalysis {
        coverage_percentage,
        needed_keywords,
    })
}

fn validate_needed_keyword(entry: &Value, index: usize) -> Result<NeededKeyword, ValidationError> {
    let path = format!("keywordAnalysis.neededKeywords[{index}]");
    let obj = entry
        .as_object()
        .ok_or_else(|| ValidationError::new(path.as_str(), "must be an object"))?;

    let keyword = obj
        .get("keyword")
        .and_then(Value::as_str)
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| {
            ValidationError::new(format!("{path}.keyword"), "must be a non-empty string")
        })?;

    let found = obj
        .get("found")
        .and_then(Value::as_bool)
        .ok_or_else(|| ValidationError::new(format!("{path}.found"), "must be a boolean"))?;

    Ok(NeededKeyword {
        keyword: keyword.to_string(),
        found,
    })
}

fn validate_experience(entry: &Value, index: usize) -> Result<ExperienceAnalysis, ValidationError> {
    let path = format!("experienceAnalysis[{index}]");
    let obj = entry
        .as_object()
        .ok_or_else(|| ValidationError::new(path.as_str(), "must be an object"))?;

    Ok(ExperienceAnalysis {
        title: optional_string(obj, "title", &path)?,
        relevance_score: integer_in_range(
            obj.get("relevanceScore"),
            &format!("{path}.relevanceScore"),
            MAX_SUB_SCORE,
        )?,
        depth_score: integer_in_range(
            obj.get("depthScore"),
            &format!("{path}.depthScore"),
            MAX_SUB_SCORE,
        )?,
        suggestions: suggestions(obj, &path)?,
    })
}

fn validate_project(entry: &Value, index: usize) -> Result<ProjectAnalysis, ValidationError> {
    let path = format!("projectAnalysis[{index}]");
    let obj = entry
        .as_object()
        .ok_or_else(|| ValidationError::new(path.as_str(), "must be an object"))?;

    Ok(ProjectAnalysis {
        title: optional_string(obj, "title", &path)?,
        relevance_score: integer_in_range(
            obj.get("relevanceScore"),
            &format!("{path}.relevanceScore"),
            MAX_SUB_SCORE,
        )?,
        complexity_score: integer_in_range(
            obj.get("complexityScore"),
            &format!("{path}.complexityScore"),
            MAX_COMPLEXITY_SCORE,
        )?,
        suggestions: suggestions(obj, &path)?,
    })
}

/// Scores arrive as JSON numbers; `85` and `85.0` are accepted, `85.5` is not.
/// Out-of-range values are rejected rather than clamped.
fn integer_in_range(value: Option<&Value>, field: &str, max: u32) -> Result<u32, ValidationError> {
    let value = value.ok_or_else(|| ValidationError::new(field, "is required"))?;
    let number = value
        .as_f64()
        .ok_or_else(|| ValidationError::new(field, "must be a number"))?;
    if number.fract() != 0.0 {
        return Err(ValidationError::new(field, "must be an integer"));
    }
    if number < 0.0 || number > f64::from(max) {
        return Err(ValidationError::new(
            field,
            format!("must be between 0 and {max}, got {number}"),
        ));
    }
    Ok(number as u32)
}

fn optional_array<'a>(
    root: &'a Map<String, Value>,
    field: &str,
) -> Result<&'a [Value], ValidationError> {
    match root.get(field) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(_) => Err(ValidationError::new(field, "must be an array")),
    }
}

fn optional_string(
    obj: &Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<String, ValidationError> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ValidationError::new(
            format!("{path}.{key}"),
            "must be a string",
        )),
    }
}

fn suggestions(obj: &Map<String, Value>, path: &str) -> Result<Vec<String>, ValidationError> {
    let items = match obj.get("suggestions") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(ValidationError::new(
                format!("{path}.suggestions"),
                "must be an array",
            ))
        }
    };
    items
        .iter()
        .enumerate()
        .map(|(i, s)| {
            s.as_str().map(str::to_string).ok_or_else(|| {
                ValidationError::new(format!("{path}.suggestions[{i}]"), "must be a string")
            })
        })
        .collect()
}
