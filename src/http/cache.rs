//! HTTP cache validation module
//!
//! `ETag` generation and `If-None-Match` handling for static assets.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Quoted strong `ETag` derived from the content hash, e.g. `"9f3a..."`
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    format!("\"{:x}\"", hasher.finish())
}

/// True when the client's `If-None-Match` names `etag` or is `*`.
///
/// Accepts comma-separated lists and weak (`W/`) validators.
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|header| {
        header.split(',').map(str::trim).any(|candidate| {
            candidate == "*" || candidate.strip_prefix("W/").unwrap_or(candidate) == etag
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_etag_is_stable_and_quoted() {
        let a = generate_etag(b"<html></html>");
        assert_eq!(a, generate_etag(b"<html></html>"));
        assert_ne!(a, generate_etag(b"<html> </html>"));
        assert!(a.starts_with('"') && a.ends_with('"'));
    }

    #[test]
    fn test_etag_match() {
        let etag = generate_etag(b"app.js");
        assert!(check_etag_match(Some(&etag), &etag));
        assert!(check_etag_match(Some(&format!("\"other\", {etag}")), &etag));
        assert!(check_etag_match(Some(&format!("W/{etag}")), &etag));
        assert!(check_etag_match(Some("*"), &etag));
        assert!(!check_etag_match(Some("\"other\""), &etag));
        assert!(!check_etag_match(None, &etag));
    }
}
