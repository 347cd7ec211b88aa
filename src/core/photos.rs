//! Primary photo URL extraction from the loosely formatted `photos` field.
//!
//! Listing feeds store photos as a JSON array string, a comma, newline or
//! semicolon separated list, or a single URL. Detectors run in a fixed order
//! and the first one that yields a non-empty value wins.

use serde_json::Value;

/// Resolve the primary photo URL from a raw `photos` value.
///
/// Never fails: unrecognized or malformed input resolves to `None` or to a
/// best-effort string. A value that still starts with `[` after every
/// detector declined is suppressed rather than returned as a JSON fragment.
pub fn resolve(raw: Option<&str>) -> Option<String> {
    let cleaned = raw?.trim();
    if cleaned.is_empty() {
        return None;
    }

    if let Some(url) = first_from_json_array(cleaned) {
        return Some(url);
    }

    if let Some(first) = first_before(cleaned, ',')
        && !first.starts_with('[')
    {
        return Some(first.to_string());
    }

    if let Some(first) = first_before(cleaned, '\n') {
        return Some(first.to_string());
    }

    if let Some(first) = first_before(cleaned, ';') {
        return Some(first.to_string());
    }

    if is_bare_url(cleaned) {
        return Some(cleaned.to_string());
    }

    if !cleaned.starts_with('[') {
        return Some(cleaned.to_string());
    }

    None
}

/// First element of a bracket-wrapped JSON array of strings, trimmed.
fn first_from_json_array(cleaned: &str) -> Option<String> {
    if !(cleaned.starts_with('[') && cleaned.ends_with(']')) {
        return None;
    }
    let parsed: Value = match serde_json::from_str(cleaned) {
        Ok(v) => v,
        Err(e) => {
            log::debug!("photos field is not valid JSON, trying other formats: {}", e);
            return None;
        }
    };
    let first = parsed.as_array()?.first()?.as_str()?.trim();
    if first.is_empty() {
        None
    } else {
        Some(first.to_string())
    }
}

/// Trimmed text before the first `sep`, when `sep` occurs and that text is non-empty.
fn first_before(cleaned: &str, sep: char) -> Option<&str> {
    let (head, _) = cleaned.split_once(sep)?;
    let head = head.trim();
    if head.is_empty() { None } else { Some(head) }
}

fn is_bare_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://") || s.starts_with('/')
}
