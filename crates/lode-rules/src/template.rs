//! Output filename templates.
//!
//! Templates name emitted assets, e.g. `static/media/[hash:10][ext][query]`.
//! Supported placeholders:
//!
//! | Token | Value |
//! |-------|-------|
//! | `[name]` | file stem |
//! | `[ext]` | extension with leading dot |
//! | `[query]` | resource query including `?`, or empty |
//! | `[path]` | directory with trailing `/`, or empty |
//! | `[hash]`, `[contenthash]` | hex SHA-256 of the content |
//! | `[hash:N]`, `[contenthash:N]` | first N hex characters of the above |

use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::asset::Asset;
use crate::error::{Error, Result};

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([a-z]+)(?::(\d+))?\]").expect("token regex is valid"));

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Name,
    Ext,
    Query,
    Path,
    Hash(Option<usize>),
}

/// A parsed filename template.
#[derive(Debug, Clone)]
pub struct FilenameTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl FilenameTemplate {
    /// Parse a template, rejecting unknown placeholders.
    ///
    /// # Example
    ///
    /// ```
    /// use lode_rules::{Asset, FilenameTemplate};
    ///
    /// let template = FilenameTemplate::parse("img/[name][ext]").unwrap();
    /// let asset = Asset::new("src/logo.png", 100).unwrap();
    /// assert_eq!(template.render(&asset).unwrap(), "img/logo.png");
    /// ```
    pub fn parse(source: &str) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidTemplate {
            template: source.to_string(),
            reason,
        };

        if source.trim().is_empty() {
            return Err(invalid("template is empty".to_string()));
        }

        let mut segments = Vec::new();
        let mut last = 0;

        for caps in TOKEN.captures_iter(source) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            push_literal(&mut segments, &source[last..whole.start()]).map_err(&invalid)?;
            last = whole.end();

            let len = match caps.get(2) {
                Some(m) => {
                    let n: usize = m
                        .as_str()
                        .parse()
                        .map_err(|_| invalid(format!("bad length in {}", whole.as_str())))?;
                    if n == 0 {
                        return Err(invalid(format!("zero length in {}", whole.as_str())));
                    }
                    Some(n)
                }
                None => None,
            };

            let segment = match (&caps[1], len) {
                ("hash" | "contenthash", len) => Segment::Hash(len),
                ("name", None) => Segment::Name,
                ("ext", None) => Segment::Ext,
                ("query", None) => Segment::Query,
                ("path", None) => Segment::Path,
                (token, Some(_)) if matches!(token, "name" | "ext" | "query" | "path") => {
                    return Err(invalid(format!("[{token}] does not take a length")));
                }
                (token, _) => return Err(invalid(format!("unknown placeholder [{token}]"))),
            };
            segments.push(segment);
        }
        push_literal(&mut segments, &source[last..]).map_err(&invalid)?;

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether rendering needs the asset content.
    pub fn requires_content(&self) -> bool {
        self.segments.iter().any(|s| matches!(s, Segment::Hash(_)))
    }

    /// Substitute every placeholder for the given asset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingContent`] when the template hashes content and
    /// the asset carries none.
    pub fn render(&self, asset: &Asset) -> Result<String> {
        let hash = if self.requires_content() {
            let content = asset.content().ok_or_else(|| Error::MissingContent {
                template: self.source.clone(),
            })?;
            Some(hash_content(content))
        } else {
            None
        };

        let mut out = String::with_capacity(self.source.len() + 16);
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Name => out.push_str(asset.stem()),
                Segment::Ext => {
                    out.push('.');
                    out.push_str(asset.extension());
                }
                Segment::Query => out.push_str(asset.query()),
                Segment::Path => out.push_str(&asset.dir()),
                Segment::Hash(len) => {
                    let full = hash.as_deref().unwrap_or_default();
                    let n = len.unwrap_or(full.len()).min(full.len());
                    out.push_str(&full[..n]);
                }
            }
        }
        Ok(out)
    }
}

impl PartialEq for FilenameTemplate {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for FilenameTemplate {}

impl std::fmt::Display for FilenameTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

impl Serialize for FilenameTemplate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

impl std::str::FromStr for FilenameTemplate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn push_literal(segments: &mut Vec<Segment>, text: &str) -> std::result::Result<(), String> {
    if text.is_empty() {
        return Ok(());
    }
    if let Some(pos) = text.find(['[', ']']) {
        let rest = &text[pos..];
        let snippet: String = rest.chars().take(16).collect();
        return Err(format!("unrecognized placeholder near '{snippet}'"));
    }
    segments.push(Segment::Literal(text.to_string()));
    Ok(())
}

/// Hash asset content using SHA-256.
///
/// Returns hex-encoded hash (64 characters).
pub fn hash_content(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}
