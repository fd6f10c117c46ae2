//! SPA request rewriting for an edge layer in front of a hosting bucket.
//!
//! [`routing`] holds the pure rewrite; [`edge`] wraps it in the
//! viewer-request event shape; the remaining modules make up a local edge
//! emulator that serves a bucket directory through the same rewrite.

pub mod cli;
pub mod config;
pub mod edge;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod routing;
pub mod server;

pub use error::{RewriteError, RulesError};
pub use routing::{rewrite, rewrite_uri, ObjectKind, Rewrite, RewriteRules};
