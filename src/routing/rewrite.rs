//! URI rewrite module
//!
//! Maps a viewer request path to the storage key that backs it. Paths that
//! look like files (contain a `.`) go to the object itself; everything else
//! is a client-side route and goes to the SPA shell document.

use serde::Serialize;

use super::preview::split_preview;
use crate::error::RulesError;

/// Production root prefix inside the bucket
pub const DEFAULT_BASE_LOCATION: &str = "/live/";
/// Token that ends a preview deployment prefix
pub const DEFAULT_BRANCH_MARKER: &str = "DEMO";
/// Document every client-side route resolves to
pub const DEFAULT_SHELL_DOCUMENT: &str = "index.html";

/// Constants driving the rewrite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRules {
    base_location: String,
    branch_marker: String,
    shell_document: String,
}

impl RewriteRules {
    /// Build validated rules
    pub fn new(
        base_location: impl Into<String>,
        branch_marker: impl Into<String>,
        shell_document: impl Into<String>,
    ) -> Result<Self, RulesError> {
        let base_location = base_location.into();
        let branch_marker = branch_marker.into();
        let shell_document = shell_document.into();

        if !base_location.starts_with('/') || !base_location.ends_with('/') {
            return Err(RulesError::InvalidBaseLocation(base_location));
        }
        if branch_marker.is_empty() {
            return Err(RulesError::EmptyMarker);
        }
        if shell_document.is_empty() || shell_document.contains('/') {
            return Err(RulesError::InvalidShellDocument(shell_document));
        }

        Ok(Self {
            base_location,
            branch_marker,
            shell_document,
        })
    }

    pub fn base_location(&self) -> &str {
        &self.base_location
    }

    pub fn branch_marker(&self) -> &str {
        &self.branch_marker
    }

    pub fn shell_document(&self) -> &str {
        &self.shell_document
    }
}

impl Default for RewriteRules {
    fn default() -> Self {
        Self {
            base_location: DEFAULT_BASE_LOCATION.to_string(),
            branch_marker: DEFAULT_BRANCH_MARKER.to_string(),
            shell_document: DEFAULT_SHELL_DOCUMENT.to_string(),
        }
    }
}

/// What the rewritten key points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    /// A static file, served as-is
    Asset,
    /// The SPA shell document; the browser router takes over
    Shell,
}

/// Outcome of a single rewrite
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rewrite {
    /// Rewritten request uri (storage key with a leading `/`)
    pub uri: String,
    pub kind: ObjectKind,
    /// Preview branch prefix, e.g. `feature/IMAP-123/DEMO`
    pub preview: Option<String>,
}

/// Classify the path left after the deployment prefix
pub fn classify(path: &str) -> ObjectKind {
    if path.contains('.') {
        ObjectKind::Asset
    } else {
        ObjectKind::Shell
    }
}

/// Rewrite a request uri using `rules`.
///
/// Total over every input. A uri without the leading `/` is treated as if
/// it had already been stripped.
pub fn rewrite_uri(uri: &str, rules: &RewriteRules) -> Rewrite {
    let remaining = uri.strip_prefix('/').unwrap_or(uri);
    let mut location = rules.base_location.clone();

    let (remaining, preview) = match split_preview(remaining, &rules.branch_marker) {
        Some(split) => {
            location.push_str(split.prefix);
            location.push('/');
            (split.rest, Some(split.prefix.to_string()))
        }
        None => (remaining, None),
    };

    let kind = classify(remaining);
    match kind {
        ObjectKind::Asset => location.push_str(remaining),
        ObjectKind::Shell => location.push_str(&rules.shell_document),
    }

    Rewrite {
        uri: location,
        kind,
        preview,
    }
}

/// Rewrite a request uri with the default rules
///
/// # Examples
/// ```
/// use spa_rewrite::routing::rewrite;
/// assert_eq!(rewrite("/about"), "/live/index.html");
/// assert_eq!(rewrite("/assets/image.png"), "/live/assets/image.png");
/// assert_eq!(
///     rewrite("/feature/IMAP-123/DEMO/image.png"),
///     "/live/feature/IMAP-123/DEMO/image.png"
/// );
/// ```
pub fn rewrite(uri: &str) -> String {
    rewrite_uri(uri, &RewriteRules::default()).uri
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ROUTES: &[(&str, &str)] = &[
        // basic page
        ("/", "/live/index.html"),
        // routes within the site
        ("/about", "/live/index.html"),
        ("/about?123", "/live/index.html"),
        ("/about/about2", "/live/index.html"),
        // assets within the site
        ("/image.png", "/live/image.png"),
        ("/assets/image.png", "/live/assets/image.png"),
        // preview routes
        ("/feature/IMAP-123/DEMO", "/live/feature/IMAP-123/DEMO/index.html"),
        ("/feature/IMAP-123/DEMO/", "/live/feature/IMAP-123/DEMO/index.html"),
        ("/feature/IMAP-123/DEMO/about", "/live/feature/IMAP-123/DEMO/index.html"),
        (
            "/feature/IMAP-123/DEMO/about/about2",
            "/live/feature/IMAP-123/DEMO/index.html",
        ),
        (
            "/feature/IMAP-123/DEMO/about?123",
            "/live/feature/IMAP-123/DEMO/index.html",
        ),
        // preview assets
        (
            "/feature/IMAP-123/DEMO/image.png",
            "/live/feature/IMAP-123/DEMO/image.png",
        ),
        (
            "/feature/IMAP-123/DEMO/assets/image.png",
            "/live/feature/IMAP-123/DEMO/assets/image.png",
        ),
    ];

    #[test]
    fn test_route_table() {
        for (input, expected) in ROUTES {
            assert_eq!(rewrite(input), *expected, "input: {input}");
        }
    }

    #[test]
    fn test_marker_at_end_of_uri() {
        let result = rewrite_uri("/release/DEMO", &RewriteRules::default());
        assert_eq!(result.uri, "/live/release/DEMO/index.html");
        assert_eq!(result.kind, ObjectKind::Shell);
        assert_eq!(result.preview.as_deref(), Some("release/DEMO"));
    }

    #[test]
    fn test_marker_only() {
        assert_eq!(rewrite("/DEMO"), "/live/DEMO/index.html");
    }

    #[test]
    fn test_substring_marker_quirk() {
        // Not segment aware: the char after the marker is dropped
        assert_eq!(rewrite("/DEMOGRAPHIC.png"), "/live/DEMO/RAPHIC.png");
        assert_eq!(rewrite("/stats/DEMOGRAPHICS"), "/live/stats/DEMO/index.html");
    }

    #[test]
    fn test_dot_anywhere_is_asset() {
        assert_eq!(rewrite("/v1.2/page"), "/live/v1.2/page");
        assert_eq!(rewrite("/.well-known/thing"), "/live/.well-known/thing");
    }

    #[test]
    fn test_kind_and_preview() {
        let rules = RewriteRules::default();

        let result = rewrite_uri("/app.js", &rules);
        assert_eq!(result.kind, ObjectKind::Asset);
        assert_eq!(result.preview, None);

        let result = rewrite_uri("/feature/X/DEMO/about", &rules);
        assert_eq!(result.kind, ObjectKind::Shell);
        assert_eq!(result.preview.as_deref(), Some("feature/X/DEMO"));
    }

    #[test]
    fn test_missing_leading_slash_treated_as_stripped() {
        assert_eq!(rewrite("image.png"), "/live/image.png");
        assert_eq!(rewrite(""), "/live/index.html");
    }

    #[test]
    fn test_custom_rules() {
        let rules = RewriteRules::new("/prod/", "PREVIEW", "app.html").unwrap();
        assert_eq!(rewrite_uri("/about", &rules).uri, "/prod/app.html");
        assert_eq!(
            rewrite_uri("/pr-7/PREVIEW/main.css", &rules).uri,
            "/prod/pr-7/PREVIEW/main.css"
        );
        // The default marker means nothing here
        assert_eq!(rewrite_uri("/x/DEMO/about", &rules).uri, "/prod/app.html");
    }

    #[test]
    fn test_rules_validation() {
        assert_eq!(
            RewriteRules::new("live/", "DEMO", "index.html"),
            Err(RulesError::InvalidBaseLocation("live/".to_string()))
        );
        assert_eq!(
            RewriteRules::new("/live", "DEMO", "index.html"),
            Err(RulesError::InvalidBaseLocation("/live".to_string()))
        );
        assert_eq!(
            RewriteRules::new("/live/", "", "index.html"),
            Err(RulesError::EmptyMarker)
        );
        assert_eq!(
            RewriteRules::new("/live/", "DEMO", "a/index.html"),
            Err(RulesError::InvalidShellDocument("a/index.html".to_string()))
        );
        assert_eq!(
            RewriteRules::new("/live/", "DEMO", "index.html"),
            Ok(RewriteRules::default())
        );
    }

    proptest! {
        #[test]
        fn prop_output_under_base(path in "(DEMO|[a-zA-Z0-9]|/|\\.|-|\\?){0,40}") {
            let uri = format!("/{path}");
            let result = rewrite_uri(&uri, &RewriteRules::default());
            prop_assert!(result.uri.starts_with("/live/"));
        }

        #[test]
        fn prop_non_shell_output_has_dot(path in "(DEMO|[a-z]|/|\\.){0,40}") {
            let uri = format!("/{path}");
            let result = rewrite_uri(&uri, &RewriteRules::default());
            if !result.uri.ends_with("/index.html") {
                let mut tail = result.uri.strip_prefix("/live/").unwrap_or_default();
                if let Some(prefix) = &result.preview {
                    tail = tail.strip_prefix(prefix.as_str()).unwrap_or_default();
                    tail = tail.strip_prefix('/').unwrap_or_default();
                }
                prop_assert!(tail.contains('.'));
            }
        }

        #[test]
        fn prop_deterministic(path in "\\PC{0,40}") {
            let uri = format!("/{path}");
            prop_assert_eq!(rewrite(&uri), rewrite(&uri));
        }
    }
}
