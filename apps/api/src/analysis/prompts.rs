// All LLM prompt constants for the Analysis module.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::analysis::models::AnalysisRequest;
use crate::llm_client::prompts::{field_or_default, list_or_default};

/// System prompt for résumé analysis.
pub const ANALYSIS_SYSTEM: &str = "You are an expert AI resume analyzer. \
    Compare a candidate's resume against a job's requirements and score the fit. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Analysis prompt template. Every `{placeholder}` is replaced by `build_analysis_prompt`.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the following resume text and candidate information against the job requirements.

**Candidate Information:**
Name: {candidate_name}
Email: {candidate_email}
Location: {candidate_location}
Total Years of Experience: {total_yoe}
Primary Stack: {primary_stack}
Willing to Relocate: {willing_to_relocate}

**Resume Content:**
```
{resume_text}
```

**Job Requirements:**
Job Title: {job_title}
Company: {company}
Location: {job_location}
Work Mode: {work_mode}
Job Type: {job_type}
Industry: {industry}

Job Description:
```
{job_description}
```

Required Skills: {required_skills}

**Analysis Instructions:**
Return only a single valid JSON object with this exact structure:

{
  "matchScore": INTEGER_0_TO_100,
  "keywordAnalysis": {
    "coveragePercentage": INTEGER_0_TO_100,
    "neededKeywords": [
      {
        "keyword": "TECHNICAL_SKILL_OR_TOOL",
        "found": BOOLEAN
      }
    ]
  },
  "overallSuggestions": "CONCISE_ACTIONABLE_FEEDBACK_STRING",
  "experienceAnalysis": [
    {
      "title": "ROLE_TITLE",
      "relevanceScore": INTEGER_0_TO_10,
      "depthScore": INTEGER_0_TO_10,
      "suggestions": ["SHORT_ACTIONABLE_SUGGESTION_1", "SHORT_ACTIONABLE_SUGGESTION_2"]
    }
  ],
  "projectAnalysis": [
    {
      "title": "PROJECT_NAME",
      "relevanceScore": INTEGER_0_TO_10,
      "complexityScore": INTEGER_0_TO_8,
      "suggestions": ["SHORT_ACTIONABLE_SUGGESTION_1", "SHORT_ACTIONABLE_SUGGESTION_2"]
    }
  ]
}

**Important Guidelines:**
- Only include concrete, verifiable technical skills in neededKeywords
- Limit suggestions to 1-2 items per experience/project (15 words or fewer each)
- Ensure all scores are integers within the specified ranges
- Return only valid JSON without any markdown formatting or additional text"#;

/// Fills `ANALYSIS_PROMPT_TEMPLATE` from the request's subject text and context fields.
pub fn build_analysis_prompt(request: &AnalysisRequest) -> String {
    let candidate = &request.candidate;
    let job = &request.job;

    let total_yoe = candidate
        .total_years_experience
        .map(|y| y.to_string())
        .unwrap_or_else(|| field_or_default(None).to_string());
    let relocate = candidate
        .willing_to_relocate
        .map(|r| if r { "Yes" } else { "No" });

    ANALYSIS_PROMPT_TEMPLATE
        .replace("{candidate_name}", field_or_default(candidate.name.as_deref()))
        .replace("{candidate_email}", field_or_default(candidate.email.as_deref()))
        .replace(
            "{candidate_location}",
            field_or_default(candidate.location.as_deref()),
        )
        .replace("{total_yoe}", &total_yoe)
        .replace("{primary_stack}", &list_or_default(&candidate.primary_stack))
        .replace("{willing_to_relocate}", field_or_default(relocate))
        .replace("{job_title}", field_or_default(job.job_title.as_deref()))
        .replace("{company}", field_or_default(job.company.as_deref()))
        .replace("{job_location}", field_or_default(job.location.as_deref()))
        .replace("{work_mode}", field_or_default(job.work_mode.as_deref()))
        .replace("{job_type}", field_or_default(job.job_type.as_deref()))
        .replace("{industry}", field_or_default(job.industry.as_deref()))
        .replace("{required_skills}", &list_or_default(&job.required_skills))
        // Free text last so braces inside it are never mistaken for placeholders.
        .replace("{job_description}", field_or_default(Some(&job.job_description)))
        .replace("{resume_text}", &request.resume_text)
}
