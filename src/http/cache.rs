//! HTTP cache validation module
//!
//! `ETag` generation and `If-None-Match` handling for bucket objects.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Generate a quoted `ETag` from object content, e.g. `"abc123def"`
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    format!("\"{:x}\"", hasher.finish())
}

/// Whether `If-None-Match` matches `etag` (list and `*` supported)
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|header| {
        header
            .split(',')
            .map(str::trim)
            .map(|e| e.strip_prefix("W/").unwrap_or(e))
            .any(|e| e == etag || e == "*")
    })
}
