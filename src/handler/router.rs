//! Request dispatch module
//!
//! Plays the CDN for one request: method validation, health check, URI
//! rewrite, then an object fetch from the bucket with fallback to the SPA
//! shell document.

use crate::config::AppState;
use crate::handler::bucket::StoredObject;
use crate::http::{self, cache};
use crate::logger::{self, AccessLogEntry};
use crate::routing::{rewrite_uri, Rewrite};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Request information needed to produce a response
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub method: Method,
    pub path: String,
    pub if_none_match: Option<String>,
}

impl RequestContext {
    pub fn is_head(&self) -> bool {
        self.method == Method::HEAD
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let ctx = RequestContext {
        method: req.method().clone(),
        path: req.uri().path().to_string(),
        if_none_match: header_value(&req, "if-none-match"),
    };

    let (response, rewrite) = respond(&ctx, &state).await;

    if state.access_log_enabled() {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            ctx.method.to_string(),
            ctx.path.clone(),
        );
        entry.query = req.uri().query().map(ToString::to_string);
        entry.rewritten_uri = rewrite.map(|r| r.uri);
        entry.http_version = version_label(req.version()).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = content_length(&response);
        entry.referer = header_value(&req, "referer");
        entry.user_agent = header_value(&req, "user-agent");
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Produce the response for a request, along with the rewrite applied (if any)
pub async fn respond(
    ctx: &RequestContext,
    state: &AppState,
) -> (Response<Full<Bytes>>, Option<Rewrite>) {
    let http_cfg = &state.config.http;

    // 1. Method check
    match ctx.method {
        Method::GET | Method::HEAD => {}
        Method::OPTIONS => {
            let mut resp = http::build_options_response(http_cfg.enable_cors);
            http::apply_edge_headers(&mut resp, &http_cfg.server_name, None, false);
            return (resp, None);
        }
        _ => {
            logger::log_warning(&format!("Method not allowed: {}", ctx.method));
            let mut resp = http::build_405_response();
            http::apply_edge_headers(&mut resp, &http_cfg.server_name, None, false);
            return (resp, None);
        }
    }

    // 2. Health check, answered before any rewrite
    let health = &state.config.health;
    if health.enabled && ctx.path == health.path {
        let mut resp = http::build_health_response();
        http::apply_edge_headers(&mut resp, &http_cfg.server_name, None, false);
        return (resp, None);
    }

    // 3. Rewrite and fetch
    let rewrite = rewrite_uri(&ctx.path, &state.rules);
    let mut resp = serve_object(ctx, state, &rewrite.uri).await;

    let exposed = http_cfg.expose_rewrite_header.then_some(rewrite.uri.as_str());
    http::apply_edge_headers(
        &mut resp,
        &http_cfg.server_name,
        exposed,
        http_cfg.enable_cors,
    );
    (resp, Some(rewrite))
}

/// Serve an object by key, falling back to the configured document
async fn serve_object(ctx: &RequestContext, state: &AppState, key: &str) -> Response<Full<Bytes>> {
    match state.bucket.get_object(key).await {
        Ok(Some(object)) => return build_object(ctx, state, object),
        Ok(None) => {}
        Err(e) => {
            logger::log_error(&format!("Failed to read object '{key}': {e}"));
            return http::build_500_response();
        }
    }

    let Some(fallback) = state.config.bucket.fallback().filter(|f| *f != key) else {
        return http::build_404_response();
    };

    logger::log_fallback(key, fallback);
    match state.bucket.get_object(fallback).await {
        Ok(Some(object)) => build_object(ctx, state, object),
        Ok(None) => {
            logger::log_warning(&format!("Fallback document '{fallback}' is missing"));
            http::build_404_response()
        }
        Err(e) => {
            logger::log_error(&format!("Failed to read fallback '{fallback}': {e}"));
            http::build_500_response()
        }
    }
}

/// Build 200 or 304 for a fetched object
fn build_object(ctx: &RequestContext, state: &AppState, object: StoredObject) -> Response<Full<Bytes>> {
    let cache_control = &state.config.http.cache_control;
    let etag = cache::generate_etag(&object.body);

    if cache::check_etag_match(ctx.if_none_match.as_deref(), &etag) {
        return http::build_304_response(&etag, cache_control);
    }

    http::build_object_response(
        Bytes::from(object.body),
        object.content_type,
        &etag,
        cache_control,
        ctx.is_head(),
    )
}

fn header_value<B>(req: &Request<B>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn content_length(resp: &Response<Full<Bytes>>) -> usize {
    resp.headers()
        .get("content-length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

fn version_label(version: hyper::Version) -> &'static str {
    match version {
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        _ => "1.1",
    }
}
