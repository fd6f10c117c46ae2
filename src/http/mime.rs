//! MIME type detection module
//!
//! Content-Type for a storage key, decided by its extension the way an
//! object store would when the bundler uploaded the SPA build.

/// Extension of the last segment of a storage key, lowercased
pub fn key_extension(key: &str) -> Option<String> {
    let file_name = key.rsplit('/').next()?;
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() && ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Get MIME Content-Type for a storage key
///
/// # Examples
/// ```
/// use spa_rewrite::http::mime::content_type_for;
/// assert_eq!(content_type_for("live/index.html"), "text/html; charset=utf-8");
/// assert_eq!(content_type_for("live/assets/main.3f9a.JS"), "text/javascript; charset=utf-8");
/// assert_eq!(content_type_for("live/LICENSE"), "application/octet-stream");
/// ```
pub fn content_type_for(key: &str) -> &'static str {
    match key_extension(key).as_deref() {
        // Documents and code a bundler emits
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("js" | "mjs" | "cjs") => "text/javascript; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("map" | "json") => "application/json",
        Some("webmanifest") => "application/manifest+json",
        Some("wasm") => "application/wasm",
        Some("txt") => "text/plain; charset=utf-8",
        Some("xml") => "application/xml",

        // Images
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",
        Some("avif") => "image/avif",

        // Fonts
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",

        // Media and downloads
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        Some("mp3") => "audio/mpeg",
        Some("pdf") => "application/pdf",
        Some("zip") => "application/zip",

        _ => "application/octet-stream",
    }
}
