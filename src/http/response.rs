//! HTTP response building module
//!
//! Provides builders for the server's response types, decoupled from the
//! path-resolution logic.

use futures_util::TryStreamExt;
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Full, StreamBody};
use hyper::body::{Bytes, Frame};
use hyper::Response;
use tokio::fs::File;
use tokio_util::io::ReaderStream;

use crate::handler::resolver::Resolved;
use crate::http::date;
use crate::logger;

/// Response body type shared by streamed file bodies and fixed error bodies.
pub type Body = BoxBody<Bytes, std::io::Error>;

/// Wrap a fixed byte payload as a response body.
pub fn full_body(data: impl Into<Bytes>) -> Body {
    Full::new(data.into())
        .map_err(|never| match never {})
        .boxed()
}

/// Stream a file's raw bytes as a response body.
///
/// The handle is owned by the stream and released when the body has been
/// sent or the connection is dropped.
pub fn file_body(file: File) -> Body {
    StreamBody::new(ReaderStream::new(file).map_ok(Frame::data)).boxed()
}

/// Build a 200 response for a resolved file.
///
/// `Content-Length` comes from filesystem metadata rather than from the
/// body, and `Content-Encoding: gzip` is present exactly when the file on
/// disk carries the `.gz` suffix. HEAD requests get the same headers with
/// an empty body.
pub fn build_file_response(resolved: Resolved, is_head: bool) -> Response<Body> {
    let body = match resolved.file {
        Some(file) if !is_head => file_body(file),
        _ => full_body(Bytes::new()),
    };

    let mut builder = Response::builder()
        .status(200)
        .header("Content-Type", resolved.content_type)
        .header("Content-Length", resolved.len);

    if resolved.is_gzip {
        builder = builder.header("Content-Encoding", "gzip");
    }
    if let Some(modified) = resolved.modified {
        builder = builder.header("Last-Modified", date::fmt_http_date(modified));
    }

    builder.body(body).unwrap_or_else(|e| {
        log_build_error("200", &e);
        Response::new(full_body(Bytes::new()))
    })
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Body> {
    const MESSAGE: &str = "File not found";

    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .header("Content-Length", MESSAGE.len())
        .body(full_body(MESSAGE))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(full_body(MESSAGE))
        })
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Body> {
    const MESSAGE: &str = "405 Method Not Allowed";

    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Content-Length", MESSAGE.len())
        .header("Allow", "GET, HEAD")
        .body(full_body(MESSAGE))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(full_body(MESSAGE))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    logger::log_error(&format!("Failed to build {status} response: {error}"));
}
