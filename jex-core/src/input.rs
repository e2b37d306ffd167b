//! Top-level input sniffing and decoding
//!
//! The pipeline accepts exactly one JSON document on standard input, either
//! an array of records or a single object. The shape is decided once, from
//! the first structural byte, and fixed for the rest of the run.

use crate::error::{JexError, Result};
use serde_json::Value;
use std::io::Read;

/// A decoded top-level input document.
///
/// Exactly one variant is populated; the tag is determined by the first
/// structural byte of the input and never re-derived downstream.
#[derive(Debug, Clone, PartialEq)]
pub enum InputDocument {
    /// Top-level JSON array: one record per element, in input order.
    RecordSet(Vec<Value>),
    /// Top-level JSON object: exactly one record.
    SingleRecord(Value),
}

impl InputDocument {
    /// Number of records the document carries.
    pub fn record_count(&self) -> usize {
        match self {
            InputDocument::RecordSet(records) => records.len(),
            InputDocument::SingleRecord(_) => 1,
        }
    }
}

/// Read one JSON document from `reader` and classify its top-level shape.
///
/// The stream is buffered fully into memory first, so the classify pass and
/// the decode pass operate on the same bytes and nothing is lost to
/// tokenizer lookahead.
pub fn read_document<R: Read>(mut reader: R) -> Result<InputDocument> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    sniff_document(&buf)
}

/// Classify and decode a fully buffered JSON document.
///
/// `[` selects a record set, `{` a single record. Any other leading token is
/// rejected: a valid scalar document fails with
/// [`JexError::UnsupportedTopLevel`], anything unparsable with
/// [`JexError::MalformedInput`].
pub fn sniff_document(buf: &[u8]) -> Result<InputDocument> {
    match first_structural_byte(buf) {
        Some(b'[') => {
            let records: Vec<Value> =
                serde_json::from_slice(buf).map_err(JexError::MalformedInput)?;
            Ok(InputDocument::RecordSet(records))
        }
        Some(b'{') => {
            let record: Value = serde_json::from_slice(buf).map_err(JexError::MalformedInput)?;
            Ok(InputDocument::SingleRecord(record))
        }
        _ => match serde_json::from_slice::<Value>(buf) {
            Ok(value) => Err(JexError::UnsupportedTopLevel {
                found: value_kind(&value),
            }),
            Err(err) => Err(JexError::MalformedInput(err)),
        },
    }
}

fn first_structural_byte(buf: &[u8]) -> Option<u8> {
    buf.iter()
        .copied()
        .find(|b| !matches!(b, b' ' | b'\t' | b'\n' | b'\r'))
}

/// Name of a JSON value's kind, for diagnostics.
fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sniff_array_preserves_order() {
        let doc = sniff_document(br#"[{"a":1},{"a":2},{"a":3}]"#).unwrap();
        assert_eq!(
            doc,
            InputDocument::RecordSet(vec![json!({"a":1}), json!({"a":2}), json!({"a":3})])
        );
    }

    #[test]
    fn test_sniff_object() {
        let doc = sniff_document(br#"{ "a": 1 }"#).unwrap();
        assert_eq!(doc, InputDocument::SingleRecord(json!({"a":1})));
    }

    #[test]
    fn test_sniff_skips_leading_whitespace() {
        let doc = sniff_document(b" \t\r\n [1, 2]").unwrap();
        assert_eq!(doc, InputDocument::RecordSet(vec![json!(1), json!(2)]));
    }

    #[test]
    fn test_sniff_rejects_scalars() {
        let cases: [(&[u8], &str); 4] = [
            (br#""just a string""#, "string"),
            (b"42", "number"),
            (b"true", "boolean"),
            (b"null", "null"),
        ];
        for (input, expected_kind) in cases {
            match sniff_document(input) {
                Err(JexError::UnsupportedTopLevel { found }) => assert_eq!(found, expected_kind),
                other => panic!("expected UnsupportedTopLevel for {input:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_sniff_rejects_malformed_json() {
        assert!(matches!(
            sniff_document(b"{not json"),
            Err(JexError::MalformedInput(_))
        ));
        assert!(matches!(
            sniff_document(b"[1, 2"),
            Err(JexError::MalformedInput(_))
        ));
        assert!(matches!(
            sniff_document(b"]"),
            Err(JexError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_sniff_rejects_empty_input() {
        assert!(matches!(
            sniff_document(b""),
            Err(JexError::MalformedInput(_))
        ));
        assert!(matches!(
            sniff_document(b"   \n"),
            Err(JexError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_read_document_from_reader() {
        let doc = read_document(&br#"[{"user":"alice"}]"#[..]).unwrap();
        assert_eq!(doc.record_count(), 1);
    }

    #[test]
    fn test_record_count() {
        assert_eq!(
            sniff_document(b"[1,2,3]").unwrap().record_count(),
            3
        );
        assert_eq!(sniff_document(b"{}").unwrap().record_count(), 1);
        assert_eq!(sniff_document(b"[]").unwrap().record_count(), 0);
    }
}
