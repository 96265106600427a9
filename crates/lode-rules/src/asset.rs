//! Assets as seen by the dispatcher.
//!
//! An [`Asset`] is the transient input of a single dispatch decision: a path
//! (with an optional `?query` suffix), its extension, its size and, when the
//! caller has it, its content. Content is only needed to render content hashes
//! and data URIs; classification works on name and size alone.

use std::path::Path;
use std::sync::Arc;

use crate::error::{Error, Result};

/// A file discovered by the build engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    path: String,
    extension: String,
    query: String,
    size_bytes: u64,
    content: Option<Arc<[u8]>>,
}

impl Asset {
    /// Create an asset from its path and size.
    ///
    /// The path may carry a resource query (`logo.svg?v=2`); it is split off
    /// and kept for the `[query]` template token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingExtension`] when the file name has no extension.
    ///
    /// # Example
    ///
    /// ```
    /// use lode_rules::Asset;
    ///
    /// let asset = Asset::new("src/assets/logo.svg?inline", 4096).unwrap();
    /// assert_eq!(asset.path(), "src/assets/logo.svg");
    /// assert_eq!(asset.extension(), "svg");
    /// assert_eq!(asset.query(), "?inline");
    /// ```
    pub fn new(path: impl Into<String>, size_bytes: u64) -> Result<Self> {
        let raw = path.into();
        let (path, query) = match raw.find('?') {
            Some(idx) => (raw[..idx].to_string(), raw[idx..].to_string()),
            None => (raw, String::new()),
        };

        let extension = Path::new(&path)
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty())
            .map(str::to_string)
            .ok_or_else(|| Error::MissingExtension { path: path.clone() })?;

        Ok(Self {
            path,
            extension,
            query,
            size_bytes,
            content: None,
        })
    }

    /// Create an asset with its content; the size is taken from the content.
    pub fn with_content(path: impl Into<String>, content: impl Into<Vec<u8>>) -> Result<Self> {
        let content: Vec<u8> = content.into();
        let mut asset = Self::new(path, content.len() as u64)?;
        asset.content = Some(Arc::from(content));
        Ok(asset)
    }

    /// Read an asset from disk.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::with_content(path.to_string_lossy().into_owned(), content)
    }

    /// Path without the query suffix.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Extension without the leading dot, case preserved.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Query suffix including the `?`, or an empty string.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    pub fn content(&self) -> Option<&[u8]> {
        self.content.as_deref()
    }

    /// File name without directory and extension.
    pub fn stem(&self) -> &str {
        Path::new(&self.path)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("")
    }

    /// File name without directory.
    pub fn file_name(&self) -> &str {
        Path::new(&self.path)
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.path)
    }

    /// Directory part of the path with a trailing `/`, or empty.
    pub fn dir(&self) -> String {
        match Path::new(&self.path).parent().and_then(|p| p.to_str()) {
            Some(parent) if !parent.is_empty() => format!("{}/", parent.replace('\\', "/")),
            _ => String::new(),
        }
    }

    /// MIME type derived from the extension.
    pub fn mime_type(&self) -> &'static str {
        mime_for_extension(&self.extension)
    }
}

/// Extensions every rule set is checked against for overlapping rules.
///
/// Covers the extensions [`mime_for_extension`] knows plus the style and
/// script sources the presets route.
pub const KNOWN_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "webp", "svg", "woff", "woff2", "ttf", "mp3", "mp4", "wasm",
    "js", "mjs", "json", "css", "html", "txt", "vue", "less", "sass", "scss", "styl", "ts",
    "tsx", "jsx",
];

/// Determine content type from a file extension.
pub fn mime_for_extension(ext: &str) -> &'static str {
    match ext.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "mp3" => "audio/mpeg",
        "mp4" => "video/mp4",
        "wasm" => "application/wasm",
        "js" | "mjs" => "application/javascript",
        "json" => "application/json",
        "css" => "text/css",
        "html" => "text/html",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}
