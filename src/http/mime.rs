//! MIME type inference module
//!
//! Maps file extensions to Content-Type values, with the handling a
//! pre-compressed build output needs: a trailing `.gz` is stripped before
//! the extension lookup, and a few build-pipeline extensions the table
//! does not know get explicit overrides.

use std::path::Path;

pub const OCTET_STREAM: &str = "application/octet-stream";

/// Look up the Content-Type for a file extension, e.g. `html` maps to
/// `text/html; charset=utf-8` and `wasm` to `application/wasm`.
///
/// Returns `None` for extensions the table does not know, so the caller
/// can apply the build-pipeline overrides before falling back.
pub fn lookup(extension: Option<&str>) -> Option<&'static str> {
    match extension? {
        // Text
        "html" | "htm" => Some("text/html; charset=utf-8"),
        "css" => Some("text/css"),
        "txt" | "md" => Some("text/plain; charset=utf-8"),
        "xml" => Some("application/xml"),

        // JavaScript/WASM
        "js" | "mjs" => Some("application/javascript"),
        "json" => Some("application/json"),
        "wasm" => Some("application/wasm"),

        // Images
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "svg" => Some("image/svg+xml"),
        "ico" => Some("image/x-icon"),
        "webp" => Some("image/webp"),

        // Audio/Video
        "mp3" => Some("audio/mpeg"),
        "ogg" => Some("audio/ogg"),
        "wav" => Some("audio/wav"),
        "mp4" => Some("video/mp4"),
        "webm" => Some("video/webm"),

        // Fonts
        "woff" => Some("font/woff"),
        "woff2" => Some("font/woff2"),
        "ttf" => Some("font/ttf"),
        "otf" => Some("font/otf"),

        // Other
        "pdf" => Some("application/pdf"),
        "zip" => Some("application/zip"),
        "tar" => Some("application/x-tar"),

        _ => None,
    }
}

/// Infer the Content-Type for a request path.
///
/// Files ending in `.gz` are stored pre-compressed and served with
/// `Content-Encoding: gzip`, so the type is inferred from the name with
/// the suffix stripped. When the extension table has no answer, the
/// overrides below are checked against the original path: WebGL build
/// pipelines emit `.wasm.gz`, `.framework.js.gz` and `.data.gz` bundles
/// whose types must be explicit for the browser to load them.
pub fn content_type_for(path: &str) -> &'static str {
    let basename = path.strip_suffix(".gz").unwrap_or(path);
    let extension = Path::new(basename).extension().and_then(|e| e.to_str());

    if let Some(content_type) = lookup(extension) {
        return content_type;
    }

    if path.ends_with(".wasm.gz") || path.ends_with(".wasm") {
        "application/wasm"
    } else if path.ends_with(".framework.js.gz")
        || path.ends_with(".js.gz")
        || path.ends_with(".js")
    {
        "application/javascript"
    } else {
        // `.data[.gz]` bundles and anything else unrecognized
        OCTET_STREAM
    }
}
