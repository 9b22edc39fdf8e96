//! Readiness report: composite metrics and prioritized improvements built from
//! one analysis result and, optionally, one graded quiz attempt.

use serde::{Deserialize, Serialize};

use crate::analysis::models::AnalysisResult;
use crate::quiz::grading::{QuizResults, TopicPerformance};

// Weights in fifths: 40% job match, 20% keyword coverage, 40% quiz.
const JOB_MATCH_WEIGHT: u32 = 2;
const RESUME_WEIGHT: u32 = 1;
const MCQ_WEIGHT: u32 = 2;

/// Coverage below this makes missing keywords a high-severity item.
const LOW_COVERAGE: u32 = 50;
/// Experience entries with a depth score below this are flagged.
const SHALLOW_DEPTH: u32 = 5;
/// Projects with a complexity score below this are flagged.
const SIMPLE_PROJECT: u32 = 4;
/// Quiz topics under this percentage are flagged.
const WEAK_TOPIC: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessMetrics {
    pub mcq_score: u32,
    pub resume_score: u32,
    pub job_match: u32,
    pub total_score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Improvement {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

/// The quiz part of a report: attempt totals without per-answer detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizSummary {
    pub total_questions: u32,
    pub correct_answers: u32,
    pub incorrect_answers: u32,
    pub time_taken_secs: u32,
    pub topic_performance: Vec<TopicPerformance>,
}

impl From<&QuizResults> for QuizSummary {
    fn from(results: &QuizResults) -> Self {
        Self {
            total_questions: results.total_questions,
            correct_answers: results.correct_answers,
            incorrect_answers: results.incorrect_answers,
            time_taken_secs: results.time_taken_secs,
            topic_performance: results.topic_performance.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessReport {
    pub metrics: ReadinessMetrics,
    pub analysis: AnalysisResult,
    pub quiz: Option<QuizSummary>,
    /// Ordered high → medium → low, stable within a severity.
    pub improvements: Vec<Improvement>,
}

pub fn build_report(analysis: AnalysisResult, quiz: Option<&QuizResults>) -> ReadinessReport {
    let metrics = compute_metrics(&analysis, quiz);
    let improvements = derive_improvements(&analysis, quiz);
    ReadinessReport {
        metrics,
        quiz: quiz.map(QuizSummary::from),
        analysis,
        improvements,
    }
}

/// Weighted total of job match, keyword coverage and quiz score. Without a
/// quiz attempt its weight is spread over the other two in proportion.
pub fn compute_metrics(analysis: &AnalysisResult, quiz: Option<&QuizResults>) -> ReadinessMetrics {
    let job_match = analysis.match_score;
    let resume_score = analysis.keyword_analysis.coverage_percentage;
    let weighted = JOB_MATCH_WEIGHT * job_match + RESUME_WEIGHT * resume_score;

    let (mcq_score, total) = match quiz {
        Some(results) => {
            let mcq = results.score;
            let weights = JOB_MATCH_WEIGHT + RESUME_WEIGHT + MCQ_WEIGHT;
            (mcq, weighted_mean(weighted + MCQ_WEIGHT * mcq, weights))
        }
        None => (0, weighted_mean(weighted, JOB_MATCH_WEIGHT + RESUME_WEIGHT)),
    };

    ReadinessMetrics {
        mcq_score,
        resume_score,
        job_match,
        total_score: total.min(100),
    }
}

pub fn derive_improvements(analysis: &AnalysisResult, quiz: Option<&QuizResults>) -> Vec<Improvement> {
    let mut improvements = Vec::new();

    let missing: Vec<&str> = analysis.missing_keywords().collect();
    if !missing.is_empty() {
        let coverage = analysis.keyword_analysis.coverage_percentage;
        improvements.push(Improvement {
            title: "Add missing keywords".to_string(),
            description: format!(
                "Your résumé covers {coverage}% of the job's keywords. Not found: {}.",
                missing.join(", ")
            ),
            severity: if coverage < LOW_COVERAGE {
                Severity::High
            } else {
                Severity::Medium
            },
        });
    }

    for experience in analysis
        .experience_analysis
        .iter()
        .filter(|e| e.depth_score < SHALLOW_DEPTH)
    {
        improvements.push(Improvement {
            title: format!("Show more depth in {}", display_title(&experience.title, "an experience entry")),
            description: description_from(
                &experience.suggestions,
                "Describe your ownership, the scale you worked at and measurable outcomes.",
            ),
            severity: Severity::Medium,
        });
    }

    for project in analysis
        .project_analysis
        .iter()
        .filter(|p| p.complexity_score < SIMPLE_PROJECT)
    {
        improvements.push(Improvement {
            title: format!("Strengthen {}", display_title(&project.title, "a project")),
            description: description_from(
                &project.suggestions,
                "Highlight the technical challenges and architecture behind this project.",
            ),
            severity: Severity::Low,
        });
    }

    if let Some(results) = quiz {
        for topic in results
            .topic_performance
            .iter()
            .filter(|t| t.percentage < WEAK_TOPIC)
        {
            improvements.push(Improvement {
                title: format!("Review {}", topic.topic),
                description: format!(
                    "You answered {} of {} {} questions correctly ({}%).",
                    topic.correct, topic.total, topic.topic, topic.percentage
                ),
                severity: Severity::High,
            });
        }
    }

    improvements.sort_by_key(|i| i.severity as u8);
    improvements
}

fn weighted_mean(sum: u32, weights: u32) -> u32 {
    (f64::from(sum) / f64::from(weights)).round() as u32
}

fn display_title<'a>(title: &'a str, fallback: &'a str) -> &'a str {
    if title.trim().is_empty() {
        fallback
    } else {
        title
    }
}

fn description_from(suggestions: &[String], fallback: &str) -> String {
    if suggestions.is_empty() {
        fallback.to_string()
    } else {
        suggestions.join(" ")
    }
}
