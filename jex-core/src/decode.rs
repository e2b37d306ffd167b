//! Loose JSON decoding with raw-text fallback

use serde_json::Value;

/// Parse `text` as JSON, degrading to the verbatim text on failure.
///
/// Never fails: output that is not valid JSON is data, not an error, and is
/// wrapped as a JSON string instead. The degradation is reported as a
/// warning event so it stays observable.
pub fn decode_loose(text: &str) -> Value {
    match serde_json::from_str(text) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(error = %err, "text is not valid JSON; keeping it verbatim");
            Value::String(text.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_valid_json_values() {
        assert_eq!(decode_loose("1"), json!(1));
        assert_eq!(decode_loose(r#"{"a":[true,null]}"#), json!({"a":[true,null]}));
        assert_eq!(decode_loose(r#""quoted""#), json!("quoted"));
    }

    #[test]
    fn test_decode_tolerates_surrounding_whitespace() {
        // A trailing newline is the common case for captured command output.
        assert_eq!(decode_loose("1\n"), json!(1));
    }

    #[test]
    fn test_invalid_json_falls_back_verbatim() {
        assert_eq!(decode_loose("hello"), json!("hello"));
        assert_eq!(decode_loose("hello\n"), json!("hello\n"));
        assert_eq!(decode_loose("{broken"), json!("{broken"));
    }

    #[test]
    fn test_empty_text_falls_back_to_empty_string() {
        assert_eq!(decode_loose(""), json!(""));
    }

    #[test]
    fn test_fallback_is_idempotent() {
        // Wrapping invalid text never mutates it, so decoding the same text
        // again yields the same string value.
        let text = "not: json";
        assert_eq!(decode_loose(text), decode_loose(text));
        assert_eq!(decode_loose(text), Value::String(text.to_string()));
    }
}
