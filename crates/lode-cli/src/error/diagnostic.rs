//! Miette diagnostic conversion for CLI errors.

use lode_config::ConfigError;
use miette::Report;

use crate::error::CliError;

/// Convert a `CliError` into a miette report, adding hints for the
/// configuration mistakes users hit most.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(ConfigError::NotFound) => miette::miette!(
            help = "Create a lode.toml in the project directory or pass --config <FILE>",
            "No lode configuration found"
        ),
        CliError::Config(ConfigError::Rules(lode_rules::Error::AmbiguousRuleMatch {
            first,
            second,
            extension,
        })) => miette::miette!(
            code = "AMBIGUOUS_RULE_MATCH",
            help = "Narrow one rule's extensions or pattern, or give both rules the same chain and output",
            "Rules '{}' and '{}' both match '.{}'",
            first,
            second,
            extension
        ),
        CliError::Config(ConfigError::Rules(e)) => miette::miette!(
            code = e.code(),
            "Invalid rule configuration: {}",
            e
        ),
        CliError::Config(ConfigError::ProfileNotFound(name)) => miette::miette!(
            help = format!("Define it as a [profiles.{name}] table in the configuration"),
            "Profile '{}' not found",
            name
        ),
        CliError::Dispatch(e) => miette::miette!(code = e.code(), "{}", e),
        _ => miette::miette!("{}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_has_help() {
        let report = cli_error_to_miette(CliError::Config(ConfigError::NotFound));
        assert_eq!(report.to_string(), "No lode configuration found");
        assert!(report.help().is_some());
    }

    #[test]
    fn dispatch_error_carries_code() {
        let report = cli_error_to_miette(CliError::Dispatch(lode_rules::Error::NoMatchingRule {
            path: "data.bin".into(),
        }));
        assert_eq!(report.code().unwrap().to_string(), "NO_MATCHING_RULE");
    }
}
