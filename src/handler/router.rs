//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, path
//! resolution and access logging.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use hyper::{Method, Request, Response, Version};

use crate::config::AppState;
use crate::handler::resolver::{self, NotFound};
use crate::http::{self, Body};
use crate::logger::{self, AccessLogEntry};

/// Main entry point for HTTP request handling.
///
/// Generic over the request body type; GET and HEAD carry none, so it is
/// never read.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Body>, Infallible> {
    let method = req.method();
    let path = req.uri().path();
    let is_head = *method == Method::HEAD;

    // Every request falls through to the access-log block below, error
    // responses included.
    let response = if !is_head && *method != Method::GET {
        logger::log_warning(&format!("Method not allowed: {method}"));
        http::build_405_response()
    } else {
        // HEAD computes headers from a stat alone; GET opens the file so
        // the body can be streamed from the handle.
        match resolver::resolve(&state.root, path, !is_head).await {
            Ok(resolved) => http::response::build_file_response(resolved, is_head),
            Err(NotFound) => http::build_404_response(),
        }
    };

    if state.config.logging.access_log {
        let entry = access_entry(&req, &response, peer_addr, is_head);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Build the access log entry for a finished request.
fn access_entry<B>(
    req: &Request<B>,
    response: &Response<Body>,
    peer_addr: SocketAddr,
    is_head: bool,
) -> AccessLogEntry {
    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = version_str(req.version()).to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = if is_head {
        0
    } else {
        content_length(response)
    };
    entry.referer = header_str(req, "referer");
    entry.user_agent = header_str(req, "user-agent");
    entry
}

fn version_str(version: Version) -> &'static str {
    match version {
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        _ => "1.1",
    }
}

fn content_length(response: &Response<Body>) -> usize {
    response
        .headers()
        .get("content-length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

fn header_str<B>(req: &Request<B>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}
