//! Request path resolution module
//!
//! The request-to-file core: confines the request path to the server root,
//! falls back to index files for directory paths, flags `.gz` payloads and
//! infers the Content-Type.

use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

use percent_encoding::percent_decode_str;
use tokio::fs::{self, File};

use crate::http::mime;

const INDEX_FILES: [&str; 2] = ["index.html", "index.htm"];

/// Request-level failure. Missing files, index-less directories and open
/// errors all collapse into this; the caller answers with a 404.
#[derive(Debug, PartialEq, Eq)]
pub struct NotFound;

/// A request path resolved to a servable file.
pub struct Resolved {
    pub content_type: &'static str,
    /// True when the file on disk ends in `.gz` and must be served with
    /// `Content-Encoding: gzip`.
    pub is_gzip: bool,
    /// Exact byte size from filesystem metadata.
    pub len: u64,
    pub modified: Option<SystemTime>,
    /// Open handle for the body; `None` when only headers were requested.
    pub file: Option<File>,
}

/// Map a URL-encoded request path to a filesystem path under `root`.
///
/// Traversal components are rejected rather than silently stripped, as is
/// input that does not decode to UTF-8; callers treat `None` as a missing
/// file.
pub fn translate_path(root: &Path, raw: &str) -> Option<PathBuf> {
    let decoded = percent_decode_str(raw).decode_utf8().ok()?;

    let mut path = root.to_path_buf();
    for component in Path::new(decoded.as_ref()).components() {
        match component {
            Component::Normal(part) => path.push(part),
            Component::RootDir | Component::CurDir => {}
            Component::ParentDir | Component::Prefix(_) => return None,
        }
    }
    Some(path)
}

/// Resolve a request path against the server root.
///
/// Directory paths probe `index.html` then `index.htm`, in that order. A
/// directory with neither index file exists on disk but cannot be served,
/// so it falls out as `NotFound` just like an open failure would. With
/// `open_body` set, the file is opened and its size and mtime are taken
/// from the open handle; otherwise a plain stat provides the headers.
pub async fn resolve(root: &Path, raw_path: &str, open_body: bool) -> Result<Resolved, NotFound> {
    let path = translate_path(root, raw_path).ok_or(NotFound)?;

    let meta = fs::metadata(&path).await.map_err(|_| NotFound)?;
    let (path, meta) = if meta.is_dir() {
        probe_index(&path).await.ok_or(NotFound)?
    } else {
        (path, meta)
    };

    let name = path.to_string_lossy();
    let is_gzip = name.ends_with(".gz");
    let content_type = mime::content_type_for(&name);

    let (len, modified, file) = if open_body {
        // Permissions or a race after the existence check can still make
        // the open fail; those collapse into NotFound as well.
        let file = File::open(&path).await.map_err(|_| NotFound)?;
        let meta = file.metadata().await.map_err(|_| NotFound)?;
        (meta.len(), meta.modified().ok(), Some(file))
    } else {
        (meta.len(), meta.modified().ok(), None)
    };

    Ok(Resolved {
        content_type,
        is_gzip,
        len,
        modified,
        file,
    })
}

/// Probe a directory for its index file. Both names are attempted before
/// giving up.
async fn probe_index(dir: &Path) -> Option<(PathBuf, std::fs::Metadata)> {
    for index in INDEX_FILES {
        let candidate = dir.join(index);
        if let Ok(meta) = fs::metadata(&candidate).await {
            if meta.is_file() {
                return Some((candidate, meta));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scratch directory under the OS temp dir, removed on drop.
    struct TestRoot(PathBuf);

    impl TestRoot {
        fn new(tag: &str) -> Self {
            let dir = std::env::temp_dir().join(format!(
                "gzserve-resolver-{tag}-{}",
                std::process::id()
            ));
            let _ = std::fs::remove_dir_all(&dir);
            std::fs::create_dir_all(&dir).unwrap();
            Self(dir)
        }

        fn write(&self, relative: &str, data: &[u8]) {
            let path = self.0.join(relative);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).unwrap();
            }
            std::fs::write(path, data).unwrap();
        }

        fn path(&self) -> &Path {
            &self.0
        }
    }

    impl Drop for TestRoot {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn test_translate_path() {
        let root = Path::new("/srv/app");
        assert_eq!(
            translate_path(root, "/build/app.js"),
            Some(PathBuf::from("/srv/app/build/app.js"))
        );
        assert_eq!(translate_path(root, "/"), Some(PathBuf::from("/srv/app")));
        assert_eq!(
            translate_path(root, "/my%20file.js"),
            Some(PathBuf::from("/srv/app/my file.js"))
        );
    }

    #[test]
    fn test_translate_path_rejects_traversal() {
        let root = Path::new("/srv/app");
        assert_eq!(translate_path(root, "/../etc/passwd"), None);
        assert_eq!(translate_path(root, "/build/../../etc/passwd"), None);
        // Encoded dots decode to a parent component and are rejected too
        assert_eq!(translate_path(root, "/%2e%2e/secret"), None);
    }

    #[tokio::test]
    async fn test_serves_plain_file() {
        let root = TestRoot::new("plain");
        root.write("app.js", b"console.log('hi');");

        let resolved = resolve(root.path(), "/app.js", true).await.unwrap();
        assert_eq!(resolved.content_type, "application/javascript");
        assert!(!resolved.is_gzip);
        assert_eq!(resolved.len, 18);
        assert!(resolved.modified.is_some());
        assert!(resolved.file.is_some());
    }

    #[tokio::test]
    async fn test_gz_suffix_sets_gzip_flag() {
        let root = TestRoot::new("gz");
        root.write("build/Release.wasm.gz", b"\x1f\x8b fake gzip bytes");

        let resolved = resolve(root.path(), "/build/Release.wasm.gz", true)
            .await
            .unwrap();
        assert_eq!(resolved.content_type, "application/wasm");
        assert!(resolved.is_gzip);
    }

    #[tokio::test]
    async fn test_directory_falls_back_to_index_html() {
        let root = TestRoot::new("index-html");
        root.write("index.html", b"<html></html>");
        root.write("index.htm", b"x");

        let resolved = resolve(root.path(), "/", true).await.unwrap();
        assert_eq!(resolved.content_type, "text/html; charset=utf-8");
        // index.html wins over index.htm
        assert_eq!(resolved.len, 13);
    }

    #[tokio::test]
    async fn test_directory_falls_back_to_index_htm() {
        let root = TestRoot::new("index-htm");
        root.write("docs/index.htm", b"<html>old school</html>");

        let resolved = resolve(root.path(), "/docs", true).await.unwrap();
        assert_eq!(resolved.content_type, "text/html; charset=utf-8");
        assert_eq!(resolved.len, 23);
    }

    #[tokio::test]
    async fn test_directory_without_index_is_not_found() {
        let root = TestRoot::new("no-index");
        root.write("assets/style.css", b"body {}");

        assert_eq!(resolve(root.path(), "/assets", true).await.err(), Some(NotFound));
    }

    #[tokio::test]
    async fn test_missing_path_is_not_found() {
        let root = TestRoot::new("missing");
        assert_eq!(
            resolve(root.path(), "/missing.file", true).await.err(),
            Some(NotFound)
        );
    }

    #[tokio::test]
    async fn test_traversal_is_not_found() {
        let root = TestRoot::new("traversal");
        assert_eq!(
            resolve(root.path(), "/../outside.txt", true).await.err(),
            Some(NotFound)
        );
    }

    #[tokio::test]
    async fn test_percent_encoded_name_decodes() {
        let root = TestRoot::new("encoded");
        root.write("my app.js", b"x");

        let resolved = resolve(root.path(), "/my%20app.js", true).await.unwrap();
        assert_eq!(resolved.content_type, "application/javascript");
    }

    #[tokio::test]
    async fn test_headers_only_resolution_skips_open() {
        let root = TestRoot::new("head");
        root.write("data.bin", b"12345");

        let resolved = resolve(root.path(), "/data.bin", false).await.unwrap();
        assert_eq!(resolved.len, 5);
        assert!(resolved.file.is_none());
    }
}
