//! Analysis orchestrator — one generation call, then repair → decode →
//! validate → partial extraction → default.
//!
//! `analyze` is total: every failure class (provider outage, quota, malformed
//! or truncated output, schema violation) ends in a schema-valid result. The
//! downstream report must always render, so nothing here is surfaced as an error.

use serde_json::Value;
use tracing::{info, warn};

use crate::analysis::extract::extract_partial;
use crate::analysis::models::{
    AnalysisOutcome, AnalysisPath, AnalysisRequest, AnalysisResult, FailureKind,
};
use crate::analysis::prompts::{build_analysis_prompt, ANALYSIS_SYSTEM};
use crate::analysis::repair::attempt_repair;
use crate::analysis::validation::validate;
use crate::llm_client::{LlmError, TextGenerator};

/// Runs the full analysis pipeline for one request.
///
/// Exactly one generation request is issued; it is never retried here.
pub async fn analyze(generator: &dyn TextGenerator, request: &AnalysisRequest) -> AnalysisOutcome {
    let prompt = build_analysis_prompt(request);

    let raw = match generator.generate(&prompt, ANALYSIS_SYSTEM).await {
        Ok(raw) => raw,
        Err(e) => {
            let reason = classify_provider_error(&e);
            warn!(
                user_id = %request.user_id,
                ?reason,
                "Analysis generation call failed, returning default result: {e}"
            );
            return AnalysisOutcome::fallback(reason);
        }
    };

    let outcome = process_response(&raw);
    info!(
        user_id = %request.user_id,
        path = outcome.path.label(),
        match_score = outcome.result.match_score,
        "Resume analysis complete"
    );
    outcome
}

/// Turns raw model text into an outcome. Pure apart from logging.
pub fn process_response(raw: &str) -> AnalysisOutcome {
    let attempt = attempt_repair(raw);
    if let Some(signature) = attempt.applied {
        warn!(signature, "Model output matched a truncation signature; repaired before decode");
    }

    match serde_json::from_str::<Value>(&attempt.text) {
        Ok(decoded) => match validate(&decoded) {
            Ok(result) => {
                return AnalysisOutcome {
                    result,
                    path: AnalysisPath::Parsed {
                        repaired: attempt.applied.is_some(),
                    },
                };
            }
            Err(e) => warn!("Decoded analysis failed validation ({e}); attempting partial extraction"),
        },
        Err(e) => warn!("Analysis output is not valid JSON ({e}); attempting partial extraction"),
    }

    // Extraction always reads the raw model text, never the repaired one.
    let salvaged = extract_partial(raw);
    match validate(&salvaged) {
        Ok(result) if result == AnalysisResult::default() => {
            warn!("Partial extraction recovered nothing; returning default result");
            AnalysisOutcome::fallback(FailureKind::MalformedResponse)
        }
        Ok(result) => {
            warn!(
                match_score = result.match_score,
                keywords = result.keyword_analysis.needed_keywords.len(),
                "Returning partially extracted analysis"
            );
            AnalysisOutcome {
                result,
                path: AnalysisPath::Extracted,
            }
        }
        Err(e) => {
            warn!("Partially extracted analysis failed validation ({e}); returning default result");
            AnalysisOutcome::fallback(FailureKind::MalformedResponse)
        }
    }
}

/// An empty candidate is a malformed answer; everything else from the call
/// boundary (network, quota, rate limit, API status) is a provider failure.
fn classify_provider_error(error: &LlmError) -> FailureKind {
    match error {
        LlmError::EmptyContent => FailureKind::MalformedResponse,
        LlmError::Http(_) | LlmError::Api { .. } | LlmError::RateLimited(_) => {
            FailureKind::TransientProvider
        }
    }
}
