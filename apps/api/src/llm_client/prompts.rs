// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Rendered in place of any context field the caller left empty.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Renders an optional prompt field, substituting `NOT_SPECIFIED` when absent or blank.
pub fn field_or_default(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => NOT_SPECIFIED,
    }
}

/// Renders a list prompt field as a comma-separated string.
pub fn list_or_default(values: &[String]) -> String {
    if values.is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        values.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_or_default_blank() {
        assert_eq!(field_or_default(Some("  ")), NOT_SPECIFIED);
        assert_eq!(field_or_default(None), NOT_SPECIFIED);
        assert_eq!(field_or_default(Some("Remote")), "Remote");
    }

    #[test]
    fn test_list_or_default() {
        assert_eq!(list_or_default(&[]), NOT_SPECIFIED);
        assert_eq!(
            list_or_default(&["React".to_string(), "TypeScript".to_string()]),
            "React, TypeScript"
        );
    }
}
