// All LLM prompt constants for the Quiz module.

use crate::analysis::models::JobDetails;
use crate::llm_client::prompts::{field_or_default, list_or_default, JSON_ONLY_SYSTEM};

/// Number of questions requested per set.
pub const QUESTION_COUNT: usize = 10;

const QUIZ_ROLE: &str = "You are a technical interviewer writing screening questions for a job opening.";

/// System prompt for question generation: interviewer role plus the JSON-only rule.
pub fn quiz_system() -> String {
    format!("{QUIZ_ROLE} {JSON_ONLY_SYSTEM}")
}

/// Question generation template. Every `{placeholder}` is replaced by `build_quiz_prompt`.
pub const QUIZ_PROMPT_TEMPLATE: &str = r#"Based on the following job description, generate {question_count} multiple-choice questions (MCQs) to screen a candidate.

The questions should be a mix of two types:
1. Direct technical questions about the specific languages, frameworks, and tools mentioned (e.g., "What is a hook in React?").
2. Scenario-based or practical questions that test how a candidate would apply those technologies to solve a common, real-world problem (e.g., "A user reports that a web page is loading slowly. Which AWS service would be most effective for diagnosing the performance bottleneck?").

Job Title: {job_title}
Required Skills: {required_skills}

Provide the output strictly as a clean JSON object, without any surrounding text or markdown markers. It must look exactly like this:
{
  "mcqs": [
    {
      "question": "The full question text.",
      "options": [
        "A. Option text 1",
        "B. Option text 2",
        "C. Option text 3",
        "D. Option text 4"
      ],
      "correct_answer": "The letter of the correct option (e.g., 'B')",
      "topic": "The skill or technology the question tests (e.g., 'React')"
    }
  ]
}

Every question must have exactly four options.

Job Description:
---
{job_description}
---"#;

pub fn build_quiz_prompt(job: &JobDetails) -> String {
    QUIZ_PROMPT_TEMPLATE
        .replace("{question_count}", &QUESTION_COUNT.to_string())
        .replace("{job_title}", field_or_default(job.job_title.as_deref()))
        .replace("{required_skills}", &list_or_default(&job.required_skills))
        .replace("{job_description}", field_or_default(Some(&job.job_description)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_carries_job_context() {
        let job = JobDetails {
            job_title: Some("Cloud Engineer".to_string()),
            job_description: "Operate AWS workloads with Terraform.".to_string(),
            required_skills: vec!["AWS".to_string(), "Terraform".to_string()],
            ..Default::default()
        };
        let prompt = build_quiz_prompt(&job);
        assert!(prompt.contains("generate 10 multiple-choice questions"));
        assert!(prompt.contains("Job Title: Cloud Engineer"));
        assert!(prompt.contains("Required Skills: AWS, Terraform"));
        assert!(prompt.contains("Operate AWS workloads with Terraform."));
        assert!(!prompt.contains("{job_description}"));
    }

    #[test]
    fn test_system_prompt_requires_json() {
        assert!(quiz_system().contains("valid JSON only"));
    }
}
