//! High-level configuration structure for lode.
//!
//! This module provides the main `LodeConfig` struct, profile merging logic
//! and compilation into a [`RuleSet`]. For file discovery, see the
//! `discovery` module.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use lode_rules::{Fallback, Preset, RuleSet};

use crate::error::{ConfigError, Result as ConfigResult};
use crate::rule::RuleConfig;
use crate::settings::{AssetOptions, GlobalSettings};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LodeConfig {
    /// Built-in rule table placed before `rules`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<Preset>,

    #[serde(default)]
    pub fallback: Fallback,

    #[serde(default)]
    pub assets: AssetOptions,

    #[serde(default)]
    pub rules: Vec<RuleConfig>,

    #[serde(default)]
    pub settings: GlobalSettings,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub profiles: HashMap<String, Value>,

    /// Opaque options forwarded unchanged to the bundling engine
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub engine: Value,
}

impl LodeConfig {
    /// Create from serde_json::Value (for programmatic config from DB/API)
    ///
    /// # Example
    ///
    /// ```
    /// use lode_config::LodeConfig;
    /// use serde_json::json;
    ///
    /// let value = json!({
    ///     "preset": "vue-dev",
    ///     "assets": { "inline_limit": 4096 }
    /// });
    ///
    /// let config = LodeConfig::from_value(value).unwrap();
    /// assert_eq!(config.assets.inline_limit, 4096);
    /// ```
    pub fn from_value(value: Value) -> ConfigResult<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let toml_val: toml::Value =
            toml::from_str(content).map_err(|e| ConfigError::InvalidValue {
                field: "toml".to_string(),
                hint: Some(format!("Invalid TOML syntax: {}", e)),
            })?;

        let value = serde_json::to_value(toml_val).map_err(|e| ConfigError::InvalidValue {
            field: "toml".to_string(),
            hint: Some(format!("TOML to JSON conversion failed: {}", e)),
        })?;

        Self::from_value(value)
    }

    /// Convert to serde_json::Value
    pub fn to_value(&self) -> ConfigResult<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Merge the named profile over the base configuration.
    ///
    /// Objects merge key by key; arrays and scalars replace. `None` returns
    /// the configuration unchanged.
    pub fn materialize_profile(self, profile: Option<&str>) -> ConfigResult<Self> {
        let Some(name) = profile else {
            return Ok(self);
        };

        let overrides = self
            .profiles
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigError::ProfileNotFound(name.to_string()))?;

        if overrides.is_null() {
            return Ok(self);
        }
        if !overrides.is_object() {
            return Err(ConfigError::InvalidProfileOverride {
                message: format!("profile '{name}' must be a table"),
            });
        }

        let profiles = self.profiles.clone();
        let mut base =
            serde_json::to_value(&self).map_err(|err| ConfigError::InvalidProfileOverride {
                message: err.to_string(),
            })?;
        merge_values(&mut base, &overrides);

        let mut merged: LodeConfig =
            serde_json::from_value(base).map_err(|err| ConfigError::InvalidProfileOverride {
                message: err.to_string(),
            })?;
        merged.profiles = profiles;

        debug!(profile = name, "profile applied");
        Ok(merged)
    }

    /// Compile into a validated, immutable [`RuleSet`].
    ///
    /// Preset rules come first, followed by `rules` in declaration order.
    pub fn rule_set(&self) -> ConfigResult<RuleSet> {
        let mut builder = RuleSet::builder()
            .asset_filename(self.assets.filename.as_str())
            .fallback(self.fallback);

        if let Some(preset) = self.preset {
            builder = builder.rules(preset.rules(self.assets.inline_limit)?);
        }

        for (index, rule) in self.rules.iter().enumerate() {
            builder = builder.rule(rule.to_rule(index, self.assets.inline_limit)?);
        }

        Ok(builder.build()?)
    }
}

fn merge_values(target: &mut Value, update: &Value) {
    match (target, update) {
        (Value::Object(target_map), Value::Object(update_map)) => {
            for (key, value) in update_map {
                merge_values(target_map.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
        (target_slot, _) => {
            *target_slot = update.clone();
        }
    }
}
