use textcraft_core::{Family, OperationKind};

/// A generation result shaped for persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedResponse {
    /// The display text; always the raw completion, unchanged.
    pub text: String,
    /// Parsed analysis payload, insight family only. `None` when the
    /// completion was not valid JSON — an accepted, displayable outcome,
    /// not an error.
    pub structured: Option<serde_json::Value>,
}

/// Shape a raw completion according to the operation kind.
///
/// Non-insight kinds pass through untouched. Insight kinds get one JSON
/// parse attempt (unwrapping a markdown code fence first, since models
/// ignore the no-markdown instruction often enough); whatever parses is
/// stored as-is with no schema validation.
pub fn normalize(raw: &str, kind: &OperationKind) -> NormalizedResponse {
    if kind.family() != Family::Insight {
        return NormalizedResponse {
            text: raw.to_string(),
            structured: None,
        };
    }

    let candidate = strip_code_fence(raw);
    let structured = serde_json::from_str::<serde_json::Value>(candidate)
        .ok()
        .filter(|value| value.is_object() || value.is_array());

    NormalizedResponse {
        text: raw.to_string(),
        structured,
    }
}

/// Unwrap a ```json ... ``` (or bare ```) fence around the whole payload.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // drop an optional language hint on the opening fence line
    match body.split_once('\n') {
        Some((first_line, tail)) if first_line.trim().chars().all(char::is_alphanumeric) => {
            tail.trim()
        }
        _ => body.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn insight() -> OperationKind {
        OperationKind::parse_wire_tag("insight_sentiment")
    }

    #[test]
    fn style_kinds_pass_through() {
        let result = normalize("{\"looks\": \"like json\"}", &OperationKind::parse_wire_tag("formal"));
        assert_eq!(result.text, "{\"looks\": \"like json\"}");
        assert!(result.structured.is_none());
    }

    #[test]
    fn valid_json_is_parsed_and_raw_text_preserved() {
        let raw = r#"{"sentiment":"Positive","score":0.8}"#;
        let result = normalize(raw, &insight());
        assert_eq!(result.text, raw);
        assert_eq!(
            result.structured,
            Some(json!({"sentiment": "Positive", "score": 0.8}))
        );
    }

    #[test]
    fn invalid_json_falls_back_to_raw_text() {
        let raw = "The sentiment is mostly positive.";
        let result = normalize(raw, &insight());
        assert_eq!(result.text, raw);
        assert!(result.structured.is_none());
    }

    #[test]
    fn fenced_json_is_unwrapped() {
        let raw = "```json\n{\"keywords\": []}\n```";
        let result = normalize(raw, &OperationKind::parse_wire_tag("insight_keywords"));
        assert_eq!(result.structured, Some(json!({"keywords": []})));
        assert_eq!(result.text, raw);
    }

    #[test]
    fn scalar_json_does_not_count_as_structured() {
        let result = normalize("42", &insight());
        assert!(result.structured.is_none());
        assert_eq!(result.text, "42");
    }

    #[test]
    fn normalization_is_idempotent_on_the_text() {
        let raw = "not json at all";
        let first = normalize(raw, &insight());
        let second = normalize(&first.text, &insight());
        assert_eq!(first, second);
    }
}
