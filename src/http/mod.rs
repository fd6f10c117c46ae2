//! HTTP protocol layer module
//!
//! Content types, cache validators and response builders, kept apart from
//! the request handling that uses them.

pub mod cache;
pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    apply_edge_headers, build_304_response, build_404_response, build_405_response,
    build_500_response, build_health_response, build_object_response, build_options_response,
    REWRITTEN_URI_HEADER,
};
