//! Global configuration settings shared across profiles.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel_jobs: Option<usize>,
}

/// Options for assets handled by `asset` and `asset/resource` rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetOptions {
    /// Assets strictly smaller than this many bytes are inlined
    #[serde(default = "default_inline_limit")]
    pub inline_limit: u64,

    /// Filename template for emitted assets
    #[serde(default = "default_filename")]
    pub filename: String,
}

impl Default for AssetOptions {
    fn default() -> Self {
        Self {
            inline_limit: default_inline_limit(),
            filename: default_filename(),
        }
    }
}

fn default_inline_limit() -> u64 {
    lode_rules::DEFAULT_INLINE_LIMIT
}

fn default_filename() -> String {
    lode_rules::DEFAULT_ASSET_FILENAME.to_string()
}
