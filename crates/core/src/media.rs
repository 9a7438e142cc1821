//! Image reference decoding
//!
//! Mind-map exports store a node's images as a URL-encoded JSON array of
//! objects, each with a `uri` relative to the service's media host:
//!
//! ```text
//! %5B%7B%22uri%22%3A%22abc.png%22%7D%5D  ->  [{"uri":"abc.png"}]
//! ```

use serde_json::Value;
use thiserror::Error;

/// An image payload that could not be decoded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaDecodeError {
    #[error("invalid percent-encoding in image payload: {0}")]
    Percent(String),

    #[error("invalid JSON in image payload: {0}")]
    Json(String),
}

/// Decode a raw image payload into absolute image URLs
///
/// The payload is percent-decoded with query-string rules (`+` is a space),
/// parsed as a JSON array of objects, and every string `uri` is appended to
/// `base_url`. Entries that are not objects with a string `uri` are skipped.
/// A `%` not followed by two hex digits is rejected.
pub fn decode_media_references(raw: &str, base_url: &str) -> Result<Vec<String>, MediaDecodeError> {
    if raw.is_empty() {
        return Ok(Vec::new());
    }

    if let Some(bad) = invalid_escape(raw) {
        return Err(MediaDecodeError::Percent(format!("invalid escape {bad:?}")));
    }

    let unplussed = raw.replace('+', " ");
    let decoded =
        urlencoding::decode(&unplussed).map_err(|e| MediaDecodeError::Percent(e.to_string()))?;

    let entries: Vec<Value> =
        serde_json::from_str(&decoded).map_err(|e| MediaDecodeError::Json(e.to_string()))?;

    let urls = entries
        .iter()
        .filter_map(|entry| match entry.get("uri") {
            Some(Value::String(uri)) => Some(format!("{base_url}{uri}")),
            _ => {
                log::warn!("Skipping image reference without a string `uri`: {entry:?}");
                None
            }
        })
        .collect();

    Ok(urls)
}

/// First `%` escape that is not followed by two hex digits, if any
fn invalid_escape(raw: &str) -> Option<&str> {
    let bytes = raw.as_bytes();
    bytes.iter().enumerate().find_map(|(i, &b)| {
        if b != b'%' {
            return None;
        }
        let valid = bytes.len() > i + 2
            && bytes[i + 1].is_ascii_hexdigit()
            && bytes[i + 2].is_ascii_hexdigit();
        (!valid).then(|| raw.get(i..(i + 3).min(raw.len())).unwrap_or("%"))
    })
}

/// Resolve a raw image payload, treating undecodable payloads as "no images"
pub fn resolve_media_references(raw: &str, base_url: &str) -> Vec<String> {
    decode_media_references(raw, base_url).unwrap_or_else(|err| {
        log::warn!("Ignoring image payload {raw:?}: {err}");
        Vec::new()
    })
}
