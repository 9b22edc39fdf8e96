//! Markdown export of a readiness report.

use std::fmt::Write;

use crate::analysis::models::{ExperienceAnalysis, ProjectAnalysis};
use crate::analysis::models::{MAX_COMPLEXITY_SCORE, MAX_SUB_SCORE};
use crate::report::readiness::ReadinessReport;

/// Suggestions shown per experience or project entry.
const SUGGESTIONS_PER_ENTRY: usize = 2;

const RULE: &str = "---\n";

pub fn render_markdown(report: &ReadinessReport) -> String {
    let mut out = String::from("# Interview Readiness Report\n");
    out.push_str(RULE);

    let m = &report.metrics;
    let _ = writeln!(out, "## Overall Readiness: {}/100\n", m.total_score);
    out.push_str("| Metric | Score |\n|---|---|\n");
    let _ = writeln!(out, "| Job Match | {}% |", m.job_match);
    let _ = writeln!(out, "| Résumé Keywords | {}% |", m.resume_score);
    match &report.quiz {
        Some(_) => {
            let _ = writeln!(out, "| Screening Quiz | {}% |", m.mcq_score);
        }
        None => out.push_str("| Screening Quiz | not taken |\n"),
    }
    out.push('\n');
    out.push_str(RULE);

    let analysis = &report.analysis;
    let _ = writeln!(
        out,
        "### Keyword Analysis\n**Coverage:** {}%\n",
        analysis.keyword_analysis.coverage_percentage
    );
    let found: Vec<&str> = analysis.found_keywords().collect();
    let missing: Vec<&str> = analysis.missing_keywords().collect();
    if !found.is_empty() {
        out.push_str("#### Matched Keywords\n");
        push_bullets(&mut out, &found);
        out.push('\n');
    }
    if !missing.is_empty() {
        out.push_str("#### Missing Keywords\n");
        push_bullets(&mut out, &missing);
        out.push('\n');
    }
    out.push_str(RULE);

    if !analysis.overall_suggestions.trim().is_empty() {
        let _ = writeln!(out, "### Overall Suggestions\n{}", analysis.overall_suggestions);
        out.push_str(RULE);
    }

    if !analysis.experience_analysis.is_empty() {
        out.push_str("### Experience Analysis\n");
        for experience in &analysis.experience_analysis {
            push_experience(&mut out, experience);
        }
        out.push_str(RULE);
    }

    if !analysis.project_analysis.is_empty() {
        out.push_str("### Project Analysis\n");
        for project in &analysis.project_analysis {
            push_project(&mut out, project);
        }
        out.push_str(RULE);
    }

    if let Some(quiz) = &report.quiz {
        let _ = writeln!(
            out,
            "### Screening Quiz\n**Correct:** {}/{} in {}\n",
            quiz.correct_answers,
            quiz.total_questions,
            format_duration(quiz.time_taken_secs)
        );
        if !quiz.topic_performance.is_empty() {
            out.push_str("| Topic | Correct | Score |\n|---|---|---|\n");
            for topic in &quiz.topic_performance {
                let _ = writeln!(
                    out,
                    "| {} | {}/{} | {}% |",
                    table_cell(&topic.topic),
                    topic.correct, topic.total, topic.percentage
                );
            }
            out.push('\n');
        }
        out.push_str(RULE);
    }

    if !report.improvements.is_empty() {
        out.push_str("### Areas for Improvement\n");
        for (i, improvement) in report.improvements.iter().enumerate() {
            let _ = writeln!(
                out,
                "\n{}. **{}** ({} priority)\n   {}",
                i + 1,
                improvement.title,
                improvement.severity.as_str(),
                improvement.description
            );
        }
        out.push_str(RULE);
    }

    out
}

fn push_bullets(out: &mut String, items: &[&str]) {
    for item in items {
        let _ = writeln!(out, "- {item}");
    }
}

fn push_experience(out: &mut String, experience: &ExperienceAnalysis) {
    let _ = writeln!(out, "\n#### {}", title_or(&experience.title, "Untitled Experience"));
    let _ = writeln!(out, "- **Relevance:** {}/{MAX_SUB_SCORE}", experience.relevance_score);
    let _ = writeln!(out, "- **Depth/Ownership:** {}/{MAX_SUB_SCORE}", experience.depth_score);
    push_suggestions(out, &experience.suggestions);
}

fn push_project(out: &mut String, project: &ProjectAnalysis) {
    let _ = writeln!(out, "\n#### {}", title_or(&project.title, "Untitled Project"));
    let _ = writeln!(out, "- **Relevance:** {}/{MAX_SUB_SCORE}", project.relevance_score);
    let _ = writeln!(out, "- **Complexity:** {}/{MAX_COMPLEXITY_SCORE}", project.complexity_score);
    push_suggestions(out, &project.suggestions);
}

fn push_suggestions(out: &mut String, suggestions: &[String]) {
    if suggestions.is_empty() {
        return;
    }
    out.push_str("- **Suggestions:**\n");
    for suggestion in suggestions.iter().take(SUGGESTIONS_PER_ENTRY) {
        let _ = writeln!(out, "  - {suggestion}");
    }
}

fn title_or<'a>(title: &'a str, fallback: &'a str) -> &'a str {
    if title.trim().is_empty() {
        fallback
    } else {
        title
    }
}

/// Keeps free text from splitting a Markdown table row.
fn table_cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\n', '\r'], " ")
}

fn format_duration(secs: u32) -> String {
    format!("{}m {:02}s", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::models::{AnalysisResult, KeywordAnalysis, NeededKeyword};
    use crate::quiz::grading::TopicPerformance;
    use crate::report::readiness::{
        Improvement, QuizSummary, ReadinessMetrics, ReadinessReport, Severity,
    };

    fn report(with_quiz: bool) -> ReadinessReport {
        ReadinessReport {
            metrics: ReadinessMetrics {
                mcq_score: if with_quiz { 70 } else { 0 },
                resume_score: 50,
                job_match: 80,
                total_score: 72,
            },
            analysis: AnalysisResult {
                match_score: 80,
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
                overall_suggestions: "Quantify your impact.".to_string(),
                experience_analysis: vec![ExperienceAnalysis {
                    title: "Frontend Developer".to_string(),
                    relevance_score: 9,
                    depth_score: 7,
                    suggestions: vec![
                        "First".to_string(),
                        "Second".to_string(),
                        "Third".to_string(),
                    ],
                }],
                project_analysis: vec![ProjectAnalysis {
                    title: String::new(),
                    relevance_score: 6,
                    complexity_score: 3,
                    suggestions: vec![],
                }],
            },
            quiz: with_quiz.then(|| QuizSummary {
                total_questions: 10,
                correct_answers: 7,
                incorrect_answers: 3,
                time_taken_secs: 125,
                topic_performance: vec![TopicPerformance {
                    topic: "React".to_string(),
                    correct: 4,
                    total: 5,
                    percentage: 80,
                }],
            }),
            improvements: vec![Improvement {
                title: "Add missing keywords".to_string(),
                description: "Not found: AWS.".to_string(),
                severity: Severity::Medium,
            }],
        }
    }

    #[test]
    fn test_render_full_report() {
        let md = render_markdown(&report(true));
        assert!(md.starts_with("# Interview Readiness Report\n"));
        assert!(md.contains("## Overall Readiness: 72/100"));
        assert!(md.contains("| Screening Quiz | 70% |"));
        assert!(md.contains("#### Matched Keywords\n- React\n"));
        assert!(md.contains("#### Missing Keywords\n- AWS\n"));
        assert!(md.contains("### Overall Suggestions\nQuantify your impact."));
        assert!(md.contains("- **Complexity:** 3/8"));
        assert!(md.contains("#### Untitled Project"));
        assert!(md.contains("**Correct:** 7/10 in 2m 05s"));
        assert!(md.contains("| React | 4/5 | 80% |"));
        assert!(md.contains("1. **Add missing keywords** (medium priority)"));
    }

    #[test]
    fn test_suggestions_capped_at_two() {
        let md = render_markdown(&report(true));
        assert!(md.contains("  - Second\n"));
        assert!(!md.contains("Third"));
    }

    #[test]
    fn test_table_cells_escape_pipes() {
        let mut report = report(true);
        if let Some(quiz) = report.quiz.as_mut() {
            quiz.topic_performance[0].topic = "CI|CD\nPipelines".to_string();
        }
        let md = render_markdown(&report);
        assert!(md.contains("| CI\\|CD Pipelines | 4/5 | 80% |\n"));
    }

    #[test]
    fn test_render_without_quiz() {
        let md = render_markdown(&report(false));
        assert!(md.contains("| Screening Quiz | not taken |"));
        assert!(!md.contains("### Screening Quiz"));
    }

    #[test]
    fn test_render_fallback_analysis() {
        let report = crate::report::readiness::build_report(AnalysisResult::default(), None);
        let md = render_markdown(&report);
        assert!(md.contains("## Overall Readiness: 0/100"));
        assert!(md.contains("**Coverage:** 0%"));
        assert!(!md.contains("### Experience Analysis"));
        assert!(!md.contains("### Areas for Improvement"));
    }
}
