//! Edge event glue
//!
//! The edge runtime hands the function a viewer-request event and expects
//! the (possibly modified) request back. Only `request.uri` is touched;
//! every other field is carried through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::RewriteError;
use crate::routing::{rewrite_uri, RewriteRules};

/// Viewer-request event as delivered by the edge runtime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeEvent {
    pub request: EdgeRequest,
    /// `version`, `context`, `viewer` and anything else, kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EdgeEvent {
    pub fn context(&self) -> Option<&Value> {
        self.extra.get("context")
    }

    pub fn viewer(&self) -> Option<&Value> {
        self.extra.get("viewer")
    }
}

/// The request part of an edge event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRequest {
    /// Path component, always starting with `/`, never with a query string
    pub uri: String,
    /// `method`, `querystring`, `headers`, `cookies` and anything else
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl EdgeRequest {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            fields: Map::new(),
        }
    }
}

/// Replace `request.uri` with its rewritten form
pub fn rewrite_request(mut request: EdgeRequest, rules: &RewriteRules) -> EdgeRequest {
    request.uri = rewrite_uri(&request.uri, rules).uri;
    request
}

/// Handle a viewer-request event and return the request to forward
pub fn handle_event(event: EdgeEvent, rules: &RewriteRules) -> Result<EdgeRequest, RewriteError> {
    if !event.request.uri.starts_with('/') {
        return Err(RewriteError::MissingLeadingSlash(event.request.uri));
    }
    Ok(rewrite_request(event.request, rules))
}

/// Parse an event from JSON, handle it, and serialize the resulting request
pub fn handle_event_json(input: &str, rules: &RewriteRules) -> Result<String, RewriteError> {
    let event: EdgeEvent = serde_json::from_str(input)?;
    let request = handle_event(event, rules)?;
    Ok(serde_json::to_string_pretty(&request)?)
}
