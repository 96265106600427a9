//! Error types for rule-set construction and dispatch.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for lode-rules operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// No rule matched the asset and the rule set rejects unmatched assets.
    #[error("no rule matches asset: {path}")]
    NoMatchingRule { path: String },

    /// Asset path has no usable file extension.
    #[error("asset has no file extension: {path}")]
    MissingExtension { path: String },

    /// A rule set needs at least one rule.
    #[error("rule set is empty")]
    EmptyRuleSet,

    /// Two rules claim the same extension with different chains or policies.
    #[error("rules '{first}' and '{second}' both match '.{extension}' with conflicting chains")]
    AmbiguousRuleMatch {
        first: String,
        second: String,
        extension: String,
    },

    /// Regular expression in a rule matcher failed to compile.
    #[error("invalid rule pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Filename template could not be parsed.
    #[error("invalid filename template '{template}': {reason}")]
    InvalidTemplate { template: String, reason: String },

    /// Template uses a content hash but the asset was dispatched without content.
    #[error("template '{template}' needs asset content to compute a hash")]
    MissingContent { template: String },

    /// I/O error while reading an asset from disk.
    #[error("failed to read asset {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Error::NoMatchingRule { .. } => "NO_MATCHING_RULE",
            Error::MissingExtension { .. } => "MISSING_EXTENSION",
            Error::EmptyRuleSet => "EMPTY_RULE_SET",
            Error::AmbiguousRuleMatch { .. } => "AMBIGUOUS_RULE_MATCH",
            Error::InvalidPattern { .. } => "INVALID_PATTERN",
            Error::InvalidTemplate { .. } => "INVALID_TEMPLATE",
            Error::MissingContent { .. } => "MISSING_CONTENT",
            Error::Io { .. } => "IO_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambiguous_match_message_names_both_rules() {
        let err = Error::AmbiguousRuleMatch {
            first: "images".to_string(),
            second: "icons".to_string(),
            extension: "svg".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'images'"));
        assert!(msg.contains("'icons'"));
        assert!(msg.contains(".svg"));
        assert_eq!(err.code(), "AMBIGUOUS_RULE_MATCH");
    }

    #[test]
    fn no_matching_rule_includes_path() {
        let err = Error::NoMatchingRule {
            path: "src/data.bin".to_string(),
        };
        assert_eq!(err.to_string(), "no rule matches asset: src/data.bin");
    }
}
