//! Content type detection for the development server.

use std::path::Path;

/// Common MIME type constants.
pub mod types {
    pub const HTML: &str = "text/html; charset=utf-8";
    pub const PLAIN: &str = "text/plain; charset=utf-8";
    pub const CSS: &str = "text/css; charset=utf-8";
    pub const JAVASCRIPT: &str = "text/javascript; charset=utf-8";
    pub const JSON: &str = "application/json";
    pub const XML: &str = "application/xml";
    pub const RSS: &str = "application/rss+xml";
    pub const ATOM: &str = "application/atom+xml";
    pub const OCTET_STREAM: &str = "application/octet-stream";
    pub const PNG: &str = "image/png";
    pub const JPEG: &str = "image/jpeg";
    pub const GIF: &str = "image/gif";
    pub const WEBP: &str = "image/webp";
    pub const SVG: &str = "image/svg+xml";
    pub const ICO: &str = "image/x-icon";
    pub const WOFF: &str = "font/woff";
    pub const WOFF2: &str = "font/woff2";
}

/// Detect content type from a file extension.
pub fn from_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "html" | "htm" => types::HTML,
        "txt" => types::PLAIN,
        "css" => types::CSS,
        "js" | "mjs" => types::JAVASCRIPT,
        "json" => types::JSON,
        "xml" => match path.file_stem().and_then(|s| s.to_str()) {
            Some("rss" | "feed") => types::RSS,
            Some("atom") => types::ATOM,
            _ => types::XML,
        },
        "png" => types::PNG,
        "jpg" | "jpeg" => types::JPEG,
        "gif" => types::GIF,
        "webp" => types::WEBP,
        "svg" => types::SVG,
        "ico" => types::ICO,
        "woff" => types::WOFF,
        "woff2" => types::WOFF2,
        _ => types::OCTET_STREAM,
    }
}
