//! Request handler module
//!
//! Turns a viewer request into a bucket object response, the way the CDN
//! in front of the hosting bucket would.

pub mod bucket;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
