//! Error handling for the lode CLI.
//!
//! `CliError` wraps the library errors of `lode-rules` and `lode-config`
//! together with the failures that only the CLI can hit (walking directories,
//! writing JSON). At the top of `main` it is converted into a `miette`
//! report.
//!
//! # Example
//!
//! ```rust,no_run
//! use lode_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn read_manifest(path: &Path) -> Result<String> {
//!     std::fs::read_to_string(path).with_path(path)
//! }
//! ```

mod diagnostic;

use std::path::PathBuf;
use thiserror::Error;

pub use diagnostic::cli_error_to_miette;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Loading, validating or compiling the configuration failed
    #[error("Configuration error: {0}")]
    Config(#[from] lode_config::ConfigError),

    /// Dispatching an asset failed
    #[error("Dispatch error: {0}")]
    Dispatch(#[from] lode_rules::Error),

    /// Invalid command-line arguments or options
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Walking a directory tree failed
    #[error("Directory walk failed: {0}")]
    Walk(#[from] ignore::Error),

    /// The worker pool for parallel scanning could not be built
    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with custom messages
    #[error("{0}")]
    Custom(String),
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for attaching the offending path to `Result` types.
pub trait ResultExt<T> {
    /// Turn a not-found I/O error into [`CliError::FileNotFound`] for `path`.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            match err {
                CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                    CliError::FileNotFound(path.as_ref().to_path_buf())
                }
                CliError::Dispatch(lode_rules::Error::Io { source, .. })
                    if source.kind() == std::io::ErrorKind::NotFound =>
                {
                    CliError::FileNotFound(path.as_ref().to_path_buf())
                }
                other => other,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn with_path_maps_not_found() {
        let result: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let err = result.with_path("src/logo.svg").unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(p) if p == PathBuf::from("src/logo.svg")));
    }

    #[test]
    fn with_path_maps_asset_read_failure() {
        let result: std::result::Result<(), lode_rules::Error> = Err(lode_rules::Error::Io {
            path: PathBuf::from("/abs/logo.svg"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        });
        let err = result.with_path("logo.svg").unwrap_err();
        assert_eq!(err.to_string(), "File not found: logo.svg");
    }

    #[test]
    fn with_path_keeps_other_errors() {
        let result: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        let err = result.with_path("x.png").unwrap_err();
        assert!(matches!(err, CliError::Io(_)));
    }

    #[test]
    fn config_errors_convert() {
        let err: CliError = lode_config::ConfigError::ProfileNotFound("prod".into()).into();
        assert_eq!(
            err.to_string(),
            "Configuration error: profile 'prod' not found in config"
        );
    }
}
