//! Tolerant JSON request decoding.
//!
//! Strict parse first; on failure, a single repair attempt that
//! re-escapes the top-level `"text"` field in place. The most common
//! malformed payload is a valid JSON shape whose `text` value contains
//! an unescaped raw blob (quotes, newlines), and that is the only case
//! worth repairing. The decoder never loops or tries a second strategy.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::{debug, info};

use textgist_core::{Error, Result};

/// Matches the first quoted `text` value, non-greedy up to the first
/// quote that terminates the value (a quote followed by `,` or `}`).
/// The terminator is captured so the splice can put it back.
static TEXT_FIELD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?s)"text"\s*:\s*"(.*?)"(\s*[,}])"#).unwrap());

/// Decode a raw request body into a JSON value.
///
/// Fails with [`Error::Encoding`] on invalid UTF-8 and with
/// [`Error::MalformedRequest`] (carrying the original parse error) when
/// the payload is not valid JSON even after the repair attempt.
pub fn decode_request(raw: &[u8]) -> Result<Value> {
    let body = std::str::from_utf8(raw).map_err(|e| Error::Encoding(e.to_string()))?;

    match serde_json::from_str(body) {
        Ok(value) => Ok(value),
        Err(parse_err) => {
            debug!("JSON decode error, attempting to fix: {}", parse_err);
            let repaired = repair_text_field(body);
            match serde_json::from_str(&repaired) {
                Ok(value) => {
                    info!("Successfully repaired malformed JSON request");
                    Ok(value)
                }
                Err(_) => Err(Error::MalformedRequest(parse_err.to_string())),
            }
        }
    }
}

/// Re-escape the `text` field's content and splice it back over the
/// matched span. Without a matching `text` field, only the
/// control-character strip is applied.
fn repair_text_field(body: &str) -> String {
    match TEXT_FIELD_RE.captures(body) {
        Some(caps) => {
            let span = caps.get(0).expect("capture 0 always present");
            let content = strip_json_breaking_controls(&caps[1]);
            let escaped = escape_field_content(&content);
            format!(
                "{}\"text\": \"{}\"{}{}",
                &body[..span.start()],
                escaped,
                &caps[2],
                &body[span.end()..]
            )
        }
        None => strip_json_breaking_controls(body),
    }
}

/// Remove control characters that break JSON strings, keeping tab,
/// newline, and carriage return for the escape pass.
fn strip_json_breaking_controls(s: &str) -> String {
    s.chars()
        .filter(|&c| {
            let cp = c as u32;
            !(cp <= 0x08 || cp == 0x0B || cp == 0x0C || (0x0E..=0x1F).contains(&cp) || cp == 0x7F)
        })
        .collect()
}

/// Escape backslash (first, to avoid double-escaping), quote, newline,
/// carriage return, and tab.
fn escape_field_content(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_json_passes_through() {
        let value = decode_request(br#"{"text": "hello world"}"#).unwrap();
        assert_eq!(value["text"], "hello world");
    }

    #[test]
    fn test_repairs_unescaped_inner_quotes() {
        let value = decode_request(br#"{"text": "He said "hi" to me"}"#).unwrap();
        assert_eq!(value["text"], r#"He said "hi" to me"#);
    }

    #[test]
    fn test_repairs_raw_newlines() {
        let value = decode_request(b"{\"text\": \"line one\nline two\"}").unwrap();
        assert_eq!(value["text"], "line one\nline two");
    }

    #[test]
    fn test_repair_preserves_following_fields() {
        let value = decode_request(br#"{"text": "a "b" c", "lang": "en"}"#).unwrap();
        assert_eq!(value["text"], r#"a "b" c"#);
        assert_eq!(value["lang"], "en");
    }

    #[test]
    fn test_repair_strips_control_characters_from_field() {
        let value = decode_request(b"{\"text\": \"bad\x01 \"quote\" here\"}").unwrap();
        assert_eq!(value["text"], r#"bad "quote" here"#);
    }

    #[test]
    fn test_unrepairable_is_malformed() {
        let err = decode_request(b"{not json at all").unwrap_err();
        assert!(matches!(err, Error::MalformedRequest(_)));
    }

    #[test]
    fn test_no_text_field_strips_controls_only() {
        // Control character makes the strict parse fail; the fallback
        // strip (no `text` field to splice) makes it valid.
        let value = decode_request(b"{\"note\": \"ab\x02cd\"}").unwrap();
        assert_eq!(value["note"], "abcd");
    }

    #[test]
    fn test_invalid_utf8_is_encoding_error() {
        let err = decode_request(&[0xFF, 0xFE, b'{', b'}']).unwrap_err();
        assert!(matches!(err, Error::Encoding(_)));
    }

    #[test]
    fn test_single_attempt_reports_original_error() {
        // Repair cannot save a payload whose structure is broken outside
        // the text field; the error carries the original parse message.
        let err = decode_request(br#"{"text": "fine" extra}"#).unwrap_err();
        match err {
            Error::MalformedRequest(msg) => assert!(!msg.is_empty()),
            other => panic!("expected MalformedRequest, got {:?}", other),
        }
    }
}
