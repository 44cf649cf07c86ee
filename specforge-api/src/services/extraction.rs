//! Model response extraction
//!
//! Model responses are unstructured text expected to contain a JSON
//! payload, frequently wrapped in a markdown code fence. Extraction strips
//! exactly one opening and one trailing fence and then parses strictly;
//! anything short of valid JSON is a typed error. Kept separate from
//! prompt construction so the contract can be tested on its own.

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Extraction errors
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("response was not valid JSON after fence removal: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Parse a JSON payload out of a model response
pub fn extract_json<T: DeserializeOwned>(text: &str) -> Result<T, ExtractionError> {
    let payload = strip_code_fence(text);
    Ok(serde_json::from_str(payload)?)
}

/// Strip a single markdown code fence, if present
///
/// Handles both ```json and bare ``` fences. Only the outermost pair is
/// removed; the remainder is returned trimmed.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);

    rest.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_json() {
        let values: Vec<i64> = extract_json("[1,2,3]").unwrap();
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn fenced_json_parses_identically_to_bare() {
        let fenced: Vec<i64> = extract_json("```json\n[1,2,3]\n```").unwrap();
        let bare: Vec<i64> = extract_json("[1,2,3]").unwrap();
        assert_eq!(fenced, bare);
    }

    #[test]
    fn strips_fence_without_language_tag() {
        let values: Vec<i64> = extract_json("```\n[4,5]\n```").unwrap();
        assert_eq!(values, vec![4, 5]);
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        let values: Vec<i64> = extract_json("\n\n  ```json\n[1]\n```  \n").unwrap();
        assert_eq!(values, vec![1]);
    }

    #[test]
    fn strips_only_one_fence_pair() {
        // Inner fences are payload, not markup; this must fail as JSON
        let result: Result<serde_json::Value, _> = extract_json("```json\n```json\n[1]\n```\n```");
        assert!(result.is_err());
    }

    #[test]
    fn rejects_non_json_payload() {
        let result: Result<serde_json::Value, _> = extract_json("the model apologizes");
        assert!(matches!(result, Err(ExtractionError::InvalidJson(_))));
    }

    #[test]
    fn rejects_prose_around_fence() {
        let result: Result<serde_json::Value, _> =
            extract_json("Here you go:\n```json\n[1]\n```");
        assert!(result.is_err());
    }

    #[test]
    fn parses_structured_payload() {
        #[derive(serde::Deserialize)]
        struct Payload {
            sorted_requirement_ids: Vec<String>,
        }
        let payload: Payload =
            extract_json("```json\n{\"sorted_requirement_ids\": [\"a\", \"b\"]}\n```").unwrap();
        assert_eq!(payload.sorted_requirement_ids, vec!["a", "b"]);
    }
}
