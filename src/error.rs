//! Error types
//!
//! The rewriter itself never fails. These errors belong to the layers
//! around it: the edge event glue and rule configuration.

use thiserror::Error;

/// Errors raised while handling an edge event
#[derive(Debug, Error)]
pub enum RewriteError {
    /// The edge runtime guarantees a leading `/`; anything else is rejected
    #[error("request uri must start with '/': {0:?}")]
    MissingLeadingSlash(String),

    #[error("invalid edge event: {0}")]
    InvalidEvent(#[from] serde_json::Error),
}

/// Errors raised when building `RewriteRules` from configuration
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RulesError {
    #[error("branch marker must not be empty")]
    EmptyMarker,

    #[error("base location must start and end with '/': {0:?}")]
    InvalidBaseLocation(String),

    #[error("shell document must be a non-empty file name without '/': {0:?}")]
    InvalidShellDocument(String),
}
