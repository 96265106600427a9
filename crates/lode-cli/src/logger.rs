//! Logging setup for the lode CLI.
//!
//! Library crates only emit `tracing` events; this module installs the
//! subscriber that prints them to stderr.
//!
//! # Example
//!
//! ```rust,no_run
//! use lode_cli::logger::init_logger;
//! use tracing::info;
//!
//! init_logger(false, false, false, None);
//! info!("scanning");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LODE_TARGETS: &[&str] = &["lode", "lode_cli", "lode_config", "lode_rules"];

/// Initialize the tracing subscriber.
///
/// The filter is chosen in this order:
/// 1. `--verbose`: DEBUG for lode crates
/// 2. `--quiet`: ERROR only
/// 3. `RUST_LOG`
/// 4. `settings.log_level` from the configuration
/// 5. INFO for lode crates
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool, configured: Option<&str>) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    // try_init: integration tests may run several commands in one process
    let _ = tracing_subscriber::registry()
        .with(build_filter(verbose, quiet, configured))
        .with(fmt_layer)
        .try_init();
}

/// Build the filter described in [`init_logger`].
pub fn build_filter(verbose: bool, quiet: bool, configured: Option<&str>) -> EnvFilter {
    if verbose {
        EnvFilter::new(directives("debug"))
    } else if quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let level = configured.unwrap_or("info").to_ascii_lowercase();
            EnvFilter::new(directives(&level))
        })
    }
}

fn directives(level: &str) -> String {
    LODE_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_cover_all_crates() {
        assert_eq!(
            directives("debug"),
            "lode=debug,lode_cli=debug,lode_config=debug,lode_rules=debug"
        );
    }

    #[test]
    fn verbose_filter_enables_debug() {
        let filter = build_filter(true, false, Some("warn"));
        assert!(filter.to_string().contains("lode_rules=debug"));
    }

    #[test]
    fn quiet_filter_is_errors_only() {
        assert_eq!(build_filter(false, true, None).to_string(), "error");
    }
}
