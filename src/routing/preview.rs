//! Preview deployment detection
//!
//! A preview deployment is addressed by a path prefix that ends with the
//! branch marker, e.g. `feature/IMAP-123/DEMO/`. Detection is a plain
//! substring search, so `DEMOGRAPHIC` also counts as a marker hit.

/// A request path split at the first branch marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewSplit<'a> {
    /// Everything up to and including the marker
    pub prefix: &'a str,
    /// Path inside the preview deployment
    pub rest: &'a str,
}

/// Split `path` (leading `/` already stripped) at the first `marker`.
///
/// Exactly one character following the marker is dropped, whatever it is.
/// When the marker ends the path, `rest` is empty.
///
/// # Examples
/// ```
/// use spa_rewrite::routing::split_preview;
/// let split = split_preview("feature/IMAP-123/DEMO/about", "DEMO").unwrap();
/// assert_eq!(split.prefix, "feature/IMAP-123/DEMO");
/// assert_eq!(split.rest, "about");
/// assert!(split_preview("about", "DEMO").is_none());
/// ```
pub fn split_preview<'a>(path: &'a str, marker: &str) -> Option<PreviewSplit<'a>> {
    if marker.is_empty() {
        return None;
    }

    let marker_end = path.find(marker)? + marker.len();
    let (prefix, after) = path.split_at(marker_end);

    // Skip one whole char so a multi-byte char never splits
    let rest = after
        .chars()
        .next()
        .map_or("", |skipped| &after[skipped.len_utf8()..]);

    Some(PreviewSplit { prefix, rest })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_with_route() {
        let split = split_preview("feature/IMAP-123/DEMO/about/about2", "DEMO").unwrap();
        assert_eq!(split.prefix, "feature/IMAP-123/DEMO");
        assert_eq!(split.rest, "about/about2");
    }

    #[test]
    fn test_split_marker_at_end() {
        let split = split_preview("feature/IMAP-123/DEMO", "DEMO").unwrap();
        assert_eq!(split.prefix, "feature/IMAP-123/DEMO");
        assert_eq!(split.rest, "");

        let split = split_preview("feature/IMAP-123/DEMO/", "DEMO").unwrap();
        assert_eq!(split.rest, "");
    }

    #[test]
    fn test_split_is_substring_based() {
        let split = split_preview("DEMOGRAPHIC/page", "DEMO").unwrap();
        assert_eq!(split.prefix, "DEMO");
        // 'G' is eaten as if it were the separator
        assert_eq!(split.rest, "RAPHIC/page");
    }

    #[test]
    fn test_split_first_occurrence_wins() {
        let split = split_preview("a/DEMO/b/DEMO/c.js", "DEMO").unwrap();
        assert_eq!(split.prefix, "a/DEMO");
        assert_eq!(split.rest, "b/DEMO/c.js");
    }

    #[test]
    fn test_split_case_sensitive() {
        assert!(split_preview("feature/demo/about", "DEMO").is_none());
    }

    #[test]
    fn test_split_multibyte_after_marker() {
        let split = split_preview("DEMOé/app.js", "DEMO").unwrap();
        assert_eq!(split.prefix, "DEMO");
        assert_eq!(split.rest, "/app.js");
    }

    #[test]
    fn test_split_empty_marker() {
        assert!(split_preview("anything", "").is_none());
    }
}
