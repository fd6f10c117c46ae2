//! Routing module
//!
//! Translates viewer request paths into storage keys:
//! - Preview deployment detection by branch marker
//! - Asset vs. client-side route classification
//! - Rewrite rules with production defaults

mod preview;
mod rewrite;

pub use preview::{split_preview, PreviewSplit};
pub use rewrite::{
    classify, rewrite, rewrite_uri, ObjectKind, Rewrite, RewriteRules, DEFAULT_BASE_LOCATION,
    DEFAULT_BRANCH_MARKER, DEFAULT_SHELL_DOCUMENT,
};
