//! Shared utilities for command implementations.
//!
//! - Path resolution relative to the project directory
//! - Configuration loading, profile selection and rule compilation

use std::path::{Path, PathBuf};

use lode_config::{ConfigDiscovery, ConfigError, LodeConfig, validate_compiled};
use lode_rules::{Preset, RuleSet};
use tracing::debug;

use crate::cli::ProjectArgs;
use crate::error::{CliError, Result};
use crate::ui;

/// A loaded and compiled project configuration.
#[derive(Debug)]
pub struct Project {
    /// Project directory; relative paths are resolved against it
    pub root: PathBuf,
    /// Configuration file, or `None` when the built-in preset is used
    pub source: Option<PathBuf>,
    pub config: LodeConfig,
    pub rules: RuleSet,
}

impl Project {
    /// Locate, layer and compile the configuration.
    ///
    /// An explicit `--config` must exist. Without one, a project with no
    /// configuration file falls back to the `vue-dev` preset.
    pub fn load(args: &ProjectArgs) -> Result<Self> {
        let root = project_root(args)?;
        let discovery = ConfigDiscovery::new(&root);

        let (source, config) = match &args.config {
            Some(path) => {
                let path = resolve_path(path, &root);
                if !path.exists() {
                    return Err(CliError::FileNotFound(path));
                }
                let config = discovery.load_from(&path)?;
                (Some(path), config)
            }
            None => match discovery.find() {
                Some(path) => {
                    let config = discovery.load_from(&path)?;
                    (Some(path), config)
                }
                None => {
                    if args.profile.is_some() {
                        return Err(ConfigError::NotFound.into());
                    }
                    ui::warning("No lode.toml found, using the vue-dev preset");
                    (None, default_config())
                }
            },
        };

        let config = config.materialize_profile(args.profile.as_deref())?;
        let rules = validate_compiled(&config)?;
        debug!(rules = rules.len(), root = %root.display(), "project loaded");

        Ok(Self {
            root,
            source,
            config,
            rules,
        })
    }
}

/// Configuration used when the project has no configuration file.
pub fn default_config() -> LodeConfig {
    LodeConfig {
        preset: Some(Preset::VueDev),
        ..Default::default()
    }
}

/// `settings.log_level` from the project configuration, if it can be read.
///
/// Called before logging is initialized, so failures are ignored here and
/// reported again by the command itself.
pub fn configured_log_level(args: &ProjectArgs) -> Option<String> {
    let root = project_root(args).ok()?;
    let discovery = ConfigDiscovery::new(&root);
    let path = match &args.config {
        Some(path) => resolve_path(path, &root),
        None => discovery.find()?,
    };
    let config = discovery
        .load_from(&path)
        .ok()?
        .materialize_profile(args.profile.as_deref())
        .ok()?;
    config.settings.log_level
}

/// Resolve a path relative to a working directory.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Get the current working directory.
pub fn get_cwd() -> Result<PathBuf> {
    std::env::current_dir().map_err(|e| {
        CliError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to get current directory: {}", e),
        ))
    })
}

/// Project directory from `--cwd`, or the current directory.
pub fn project_root(args: &ProjectArgs) -> Result<PathBuf> {
    let cwd = get_cwd()?;
    match &args.cwd {
        Some(dir) => {
            let dir = resolve_path(dir, &cwd);
            if !dir.is_dir() {
                return Err(CliError::InvalidArgument(format!(
                    "--cwd is not a directory: {}",
                    dir.display()
                )));
            }
            Ok(dir)
        }
        None => Ok(cwd),
    }
}

/// Path relative to `root` with forward slashes, as used in asset paths.
pub fn display_path(path: &Path, root: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
