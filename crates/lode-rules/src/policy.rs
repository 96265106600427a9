use serde::{Deserialize, Serialize};

use crate::template::FilenameTemplate;

/// Assets strictly smaller than this are inlined by [`OutputPolicy::Auto`].
pub const DEFAULT_INLINE_LIMIT: u64 = 10 * 1024;

/// Default template for emitted assets.
pub const DEFAULT_ASSET_FILENAME: &str = "static/media/[hash:10][ext][query]";

/// How the output of a matched asset is placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum OutputPolicy {
    /// Inline below `max_inline_size` bytes, emit a file otherwise.
    Auto {
        max_inline_size: u64,
        #[serde(skip_serializing_if = "Option::is_none")]
        filename: Option<FilenameTemplate>,
    },
    /// Always emit a separate file.
    Emit {
        #[serde(skip_serializing_if = "Option::is_none")]
        filename: Option<FilenameTemplate>,
    },
    /// Always embed as a data URI.
    Inline,
    /// The chain output becomes a module of the bundle.
    Bundle,
}

impl OutputPolicy {
    /// Size-based policy with the default 10 KiB threshold.
    pub fn auto() -> Self {
        Self::Auto {
            max_inline_size: DEFAULT_INLINE_LIMIT,
            filename: None,
        }
    }

    /// Emit policy using the rule set's default filename.
    pub fn emit() -> Self {
        Self::Emit { filename: None }
    }

    /// Custom filename template for this policy (ignored by `Inline` and `Bundle`).
    pub fn filename(&self) -> Option<&FilenameTemplate> {
        match self {
            Self::Auto { filename, .. } | Self::Emit { filename } => filename.as_ref(),
            Self::Inline | Self::Bundle => None,
        }
    }
}

/// What happens to an asset that no rule matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Fallback {
    /// Leave the asset untouched.
    #[default]
    PassThrough,
    /// Fail the dispatch with `NoMatchingRule`.
    Reject,
}

impl std::fmt::Display for Fallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Fallback::PassThrough => write!(f, "pass-through"),
            Fallback::Reject => write!(f, "reject"),
        }
    }
}
