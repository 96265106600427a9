//! Pluggable config validation strategies
//!
//! Separates shape checks on the parsed document from full compilation into
//! a [`RuleSet`], which also catches bad patterns, bad templates and
//! overlapping rules.

use lode_rules::RuleSet;

use crate::config::LodeConfig;
use crate::error::{ConfigError, Result};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Trait for pluggable config validation strategies
pub trait ConfigValidator {
    fn validate(&self, config: &LodeConfig) -> Result<()>;
}

/// Shape-only validation (no rule compilation)
///
/// # Example
///
/// ```
/// use lode_config::{ConfigValidator, LodeConfig, SchemaValidator};
/// use lode_rules::Preset;
///
/// let config = LodeConfig {
///     preset: Some(Preset::VueDev),
///     ..Default::default()
/// };
///
/// SchemaValidator.validate(&config).unwrap();
/// ```
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, config: &LodeConfig) -> Result<()> {
        if config.preset.is_none() && config.rules.is_empty() {
            return Err(ConfigError::schema(
                "no rules configured",
                "Set 'preset' or add at least one [[rules]] entry",
            ));
        }

        for (index, rule) in config.rules.iter().enumerate() {
            let name = rule.display_name(index);

            if rule.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
                return Err(ConfigError::schema(
                    format!("rule {index} has an empty name"),
                    "Remove the 'name' key or give it a value",
                ));
            }

            for ext in &rule.extensions {
                if ext.trim().is_empty() {
                    return Err(ConfigError::schema(
                        format!("rule '{name}' lists an empty extension"),
                        "Remove empty strings from the 'extensions' array",
                    ));
                }
                if ext.starts_with('.') {
                    return Err(ConfigError::schema(
                        format!("rule '{name}' lists extension '{ext}' with a leading dot"),
                        format!("Write '{}' instead", ext.trim_start_matches('.')),
                    ));
                }
            }

            if rule.loaders.iter().any(|l| l.name().trim().is_empty()) {
                return Err(ConfigError::schema(
                    format!("rule '{name}' has a loader with an empty name"),
                    "Every entry in 'use' needs a loader name",
                ));
            }
        }

        if config.settings.parallel_jobs == Some(0) {
            return Err(ConfigError::schema(
                "parallel_jobs must be at least 1",
                "Remove 'parallel_jobs' to use one worker per CPU",
            ));
        }

        if let Some(level) = &config.settings.log_level {
            if !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
                return Err(ConfigError::schema(
                    format!("unknown log level '{level}'"),
                    format!("Use one of: {}", LOG_LEVELS.join(", ")),
                ));
            }
        }

        Ok(())
    }
}

/// Full validation: schema checks followed by rule set compilation.
pub struct CompileValidator;

impl CompileValidator {
    /// Validate and return the compiled rule set.
    pub fn compile(&self, config: &LodeConfig) -> Result<RuleSet> {
        SchemaValidator.validate(config)?;
        config.rule_set()
    }
}

impl ConfigValidator for CompileValidator {
    fn validate(&self, config: &LodeConfig) -> Result<()> {
        self.compile(config).map(|_| ())
    }
}

/// Convenience function for shape-only validation
pub fn validate_schema(config: &LodeConfig) -> Result<()> {
    SchemaValidator.validate(config)
}

/// Convenience function for full validation
///
/// # Example
///
/// ```
/// use lode_config::{LodeConfig, validate_compiled};
/// use serde_json::json;
///
/// let config = LodeConfig::from_value(json!({ "preset": "vue-dev" })).unwrap();
/// let rules = validate_compiled(&config).unwrap();
/// assert_eq!(rules.len(), 8);
/// ```
pub fn validate_compiled(config: &LodeConfig) -> Result<RuleSet> {
    CompileValidator.compile(config)
}
