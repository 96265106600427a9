//! File-based config discovery for CLI use
//!
//! Handles finding and loading lode configuration files from the filesystem
//! and layering them with defaults and `LODE_*` environment variables.

use std::fs;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml};
use serde_json::Value;
use tracing::{debug, info};

use crate::config::LodeConfig;
use crate::error::{ConfigError, Result};

/// Environment variable prefix; nested keys are separated by `__`.
pub const ENV_PREFIX: &str = "LODE_";

/// File-based configuration discovery
///
/// Searches for lode configuration files in conventional locations and loads
/// them. Values are layered as defaults < file < environment. Library users
/// can call [`LodeConfig::from_value`] directly instead.
///
/// # Example
///
/// ```no_run
/// use lode_config::ConfigDiscovery;
///
/// let discovery = ConfigDiscovery::new(".");
/// let config = discovery.load().unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
    use_env: bool,
}

impl ConfigDiscovery {
    /// Create a new config discovery with a root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            use_env: true,
        }
    }

    /// Enable or disable the `LODE_*` environment layer.
    pub fn with_env(mut self, use_env: bool) -> Self {
        self.use_env = use_env;
        self
    }

    /// Find a config file in the root directory
    ///
    /// Searches in this order:
    /// 1. TOML config: lode.toml
    /// 2. package.json (lode field)
    pub fn find(&self) -> Option<PathBuf> {
        let toml_path = self.root.join("lode.toml");
        if toml_path.exists() {
            return Some(toml_path);
        }

        let pkg_path = self.root.join("package.json");
        if pkg_path.exists() {
            if let Ok(content) = fs::read_to_string(&pkg_path) {
                if let Ok(parsed) = serde_json::from_str::<Value>(&content) {
                    if parsed.get("lode").is_some_and(|v| !v.is_null()) {
                        return Some(pkg_path);
                    }
                }
            }
        }

        None
    }

    /// Load config from discovered file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no config file is found.
    pub fn load(&self) -> Result<LodeConfig> {
        let path = self.find().ok_or(ConfigError::NotFound)?;
        self.load_from(&path)
    }

    /// Load config with profile merging
    pub fn load_with_profile(&self, profile: &str) -> Result<LodeConfig> {
        self.load()?.materialize_profile(Some(profile))
    }

    /// Load config from a specific file path.
    ///
    /// `.toml` files and `.json` files are read directly; a file named
    /// `package.json` contributes its `lode` field.
    pub fn load_from(&self, path: &Path) -> Result<LodeConfig> {
        if !path.exists() {
            return Err(ConfigError::NotFound);
        }

        let mut figment = Figment::from(Serialized::defaults(LodeConfig::default()));

        figment = if path.file_name() == Some(std::ffi::OsStr::new("package.json")) {
            figment.merge(Serialized::defaults(self.read_package_json(path)?))
        } else {
            match path.extension().and_then(|e| e.to_str()) {
                Some("toml") => figment.merge(Toml::file(path)),
                Some("json") => figment.merge(Json::file(path)),
                other => {
                    return Err(ConfigError::UnsupportedFormat(
                        other.unwrap_or("<none>").to_string(),
                    ));
                }
            }
        };

        if self.use_env {
            figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));
        }

        let config: LodeConfig = figment.extract().map_err(|e| ConfigError::InvalidValue {
            field: "configuration".to_string(),
            hint: Some(e.to_string()),
        })?;

        info!(path = %path.display(), rules = config.rules.len(), "configuration loaded");
        Ok(config)
    }

    fn read_package_json(&self, path: &Path) -> Result<Value> {
        let content = fs::read_to_string(path)?;

        let parsed: Value =
            serde_json::from_str(&content).map_err(|e| ConfigError::InvalidValue {
                field: "package.json".to_string(),
                hint: Some(format!("Invalid JSON: {}", e)),
            })?;

        let lode_value = parsed.get("lode").ok_or_else(|| ConfigError::InvalidValue {
            field: "lode".to_string(),
            hint: Some("Add a 'lode' field to your package.json".to_string()),
        })?;

        if !lode_value.is_object() {
            return Err(ConfigError::InvalidValue {
                field: "lode".to_string(),
                hint: Some("The 'lode' field must be an object".to_string()),
            });
        }

        debug!(path = %path.display(), "using lode field of package.json");
        Ok(lode_value.clone())
    }
}

/// Discover and load config from current directory (convenience function)
///
/// # Example
///
/// ```no_run
/// use lode_config::discover;
///
/// let config = discover().unwrap();
/// ```
pub fn discover() -> Result<LodeConfig> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(&root).load()
}

/// Discover and load config with profile (convenience function)
pub fn discover_with_profile(profile: &str) -> Result<LodeConfig> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(&root).load_with_profile(profile)
}
