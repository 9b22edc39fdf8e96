//! Analysis domain types: the request context sent to the model and the
//! validated result shape every consumer relies on.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Upper bound for experience/project relevance and depth scores.
pub const MAX_SUB_SCORE: u32 = 10;
/// Upper bound for project complexity scores.
pub const MAX_COMPLEXITY_SCORE: u32 = 8;
/// Upper bound for match score and keyword coverage.
pub const MAX_PERCENTAGE: u32 = 100;

// ────────────────────────────────────────────────────────────────────────────
// Request side
// ────────────────────────────────────────────────────────────────────────────

/// Personal details of the candidate, as collected by the registration form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateProfile {
    pub name: Option<String>,
    pub email: Option<String>,
    pub location: Option<String>,
    pub total_years_experience: Option<f32>,
    pub primary_stack: Vec<String>,
    pub willing_to_relocate: Option<bool>,
}

/// The comparison target: the job being applied for.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JobDetails {
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub work_mode: Option<String>,
    pub job_type: Option<String>,
    pub industry: Option<String>,
    pub job_description: String,
    pub required_skills: Vec<String>,
}

/// Input to `analyze`. Constructed per call and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub user_id: Uuid,
    pub resume_text: String,
    #[serde(default)]
    pub candidate: CandidateProfile,
    pub job: JobDetails,
}

// ────────────────────────────────────────────────────────────────────────────
// Result side (camelCase on the wire: this is the model's output contract)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NeededKeyword {
    pub keyword: String,
    pub found: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordAnalysis {
    pub coverage_percentage: u32,
    pub needed_keywords: Vec<NeededKeyword>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceAnalysis {
    pub title: String,
    pub relevance_score: u32,
    pub depth_score: u32,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectAnalysis {
    pub title: String,
    pub relevance_score: u32,
    pub complexity_score: u32,
    pub suggestions: Vec<String>,
}

/// The schema-valid analysis result. Only `validation::validate` builds one
/// from model output; `Default` is the canonical all-zero fallback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub match_score: u32,
    pub keyword_analysis: KeywordAnalysis,
    pub overall_suggestions: String,
    pub experience_analysis: Vec<ExperienceAnalysis>,
    pub project_analysis: Vec<ProjectAnalysis>,
}

impl AnalysisResult {
    pub fn found_keywords(&self) -> impl Iterator<Item = &str> {
        self.keyword_analysis
            .needed_keywords
            .iter()
            .filter(|k| k.found)
            .map(|k| k.keyword.as_str())
    }

    pub fn missing_keywords(&self) -> impl Iterator<Item = &str> {
        self.keyword_analysis
            .needed_keywords
            .iter()
            .filter(|k| !k.found)
            .map(|k| k.keyword.as_str())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Outcome classification
// ────────────────────────────────────────────────────────────────────────────

/// Why the pipeline fell back to the default result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Network, quota or rate-limit failure from the generation call.
    TransientProvider,
    /// The model answered, but nothing schema-valid could be recovered.
    MalformedResponse,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::TransientProvider => "transient_provider",
            FailureKind::MalformedResponse => "malformed_response",
        }
    }
}

/// Which branch of the pipeline produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisPath {
    /// Full document decoded and validated. `repaired` is true when a
    /// truncation signature rewrote the text first.
    Parsed { repaired: bool },
    /// Full decode or validation failed; fields were salvaged from raw text.
    Extracted,
    /// Nothing usable; the canonical default was returned.
    Fallback { reason: FailureKind },
}

impl AnalysisPath {
    pub fn label(&self) -> &'static str {
        match self {
            AnalysisPath::Parsed { repaired: false } => "parsed",
            AnalysisPath::Parsed { repaired: true } => "repaired",
            AnalysisPath::Extracted => "extracted",
            AnalysisPath::Fallback { .. } => "fallback",
        }
    }
}

/// What `analyze` returns: always a schema-valid result, plus how it was obtained.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisOutcome {
    pub result: AnalysisResult,
    pub path: AnalysisPath,
}

impl AnalysisOutcome {
    pub fn fallback(reason: FailureKind) -> Self {
        Self {
            result: AnalysisResult::default(),
            path: AnalysisPath::Fallback { reason },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_result_is_all_zero() {
        let value = serde_json::to_value(AnalysisResult::default()).unwrap();
        assert_eq!(
            value,
            json!({
                "matchScore": 0,
                "keywordAnalysis": {"coveragePercentage": 0, "neededKeywords": []},
                "overallSuggestions": "",
                "experienceAnalysis": [],
                "projectAnalysis": []
            })
        );
    }

    #[test]
    fn test_project_analysis_uses_camel_case() {
        let project = ProjectAnalysis {
            title: "Task Board".to_string(),
            relevance_score: 7,
            complexity_score: 6,
            suggestions: vec!["Add deployment details".to_string()],
        };
        let value = serde_json::to_value(project).unwrap();
        assert_eq!(value["complexityScore"], 6);
        assert_eq!(value["relevanceScore"], 7);
    }

    #[test]
    fn test_job_details_tolerates_sparse_input() {
        let job: JobDetails = serde_json::from_value(json!({
            "job_title": "Frontend Engineer",
            "required_skills": ["React", "TypeScript"]
        }))
        .unwrap();
        assert_eq!(job.job_title.as_deref(), Some("Frontend Engineer"));
        assert!(job.job_description.is_empty());
        assert_eq!(job.required_skills.len(), 2);
    }

    #[test]
    fn test_keyword_partitions() {
        let result = AnalysisResult {
            keyword_analysis: KeywordAnalysis {
                coverage_percentage: 50,
                needed_keywords: vec![
                    NeededKeyword {
                        keyword: "React".to_string(),
                        found: true,
                    },
                    NeededKeyword {
                        keyword: "AWS".to_string(),
                        found: false,
                    },
                ],
            },
            ..Default::default()
        };
        assert_eq!(result.found_keywords().collect::<Vec<_>>(), vec!["React"]);
        assert_eq!(result.missing_keywords().collect::<Vec<_>>(), vec!["AWS"]);
    }

    #[test]
    fn test_path_labels() {
        assert_eq!(AnalysisPath::Parsed { repaired: true }.label(), "repaired");
        assert_eq!(
            AnalysisPath::Fallback {
                reason: FailureKind::TransientProvider
            }
            .label(),
            "fallback"
        );
    }
}
