//! HTTP date formatting module
//!
//! Formats filesystem timestamps as IMF-fixdate strings (RFC 7231) for the
//! `Last-Modified` header.

use chrono::{DateTime, Utc};
use std::time::SystemTime;

/// Format a timestamp as an HTTP date, e.g. `Thu, 01 Jan 1970 00:00:00 GMT`.
pub fn fmt_http_date(time: SystemTime) -> String {
    DateTime::<Utc>::from(time)
        .format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string()
}
