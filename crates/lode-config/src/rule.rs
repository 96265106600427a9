//! Rule entries as written in configuration files.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use lode_rules::{FilenameTemplate, Loader, Matcher, OutputPolicy, Rule, TransformChain};

use crate::error::{ConfigError, Result};

/// One `[[rules]]` entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Display name; defaults to `rule-<index>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Regular expression tested against the asset path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<String>,

    /// Extensions to match (alternative to `test`)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<String>,

    #[serde(default)]
    pub case_insensitive: bool,

    /// Loader chain in declaration order
    #[serde(default, rename = "use", skip_serializing_if = "Vec::is_empty")]
    pub loaders: Vec<LoaderConfig>,

    #[serde(default, rename = "type")]
    pub kind: AssetType,

    /// Inline threshold for `type = "asset"`; defaults to `assets.inline_limit`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_inline_size: Option<u64>,

    /// Filename template for emitted output; defaults to `assets.filename`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

/// A loader given either by name or as `{ loader, options }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LoaderConfig {
    Name(String),
    Detailed {
        loader: String,
        #[serde(default, skip_serializing_if = "Value::is_null")]
        options: Value,
    },
}

impl LoaderConfig {
    pub fn name(&self) -> &str {
        match self {
            LoaderConfig::Name(name) => name,
            LoaderConfig::Detailed { loader, .. } => loader,
        }
    }

    fn to_loader(&self) -> Loader {
        match self {
            LoaderConfig::Name(name) => Loader::new(name.as_str()),
            LoaderConfig::Detailed { loader, options } => {
                Loader::new(loader.as_str()).with_options(options.clone())
            }
        }
    }
}

/// Output handling of a rule, named after webpack's asset module types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetType {
    /// Chain output becomes a bundle module
    #[default]
    #[serde(rename = "bundle")]
    Bundle,
    /// Inline below the threshold, emit otherwise
    #[serde(rename = "asset")]
    Asset,
    /// Always emit a file
    #[serde(rename = "asset/resource")]
    Resource,
    /// Always inline
    #[serde(rename = "asset/inline")]
    Inline,
}

impl RuleConfig {
    /// Name used in diagnostics and decisions.
    pub fn display_name(&self, index: usize) -> String {
        self.name.clone().unwrap_or_else(|| format!("rule-{index}"))
    }

    /// Compile this entry into a [`Rule`].
    ///
    /// `inline_limit` applies to `asset` rules without `max_inline_size`.
    pub fn to_rule(&self, index: usize, inline_limit: u64) -> Result<Rule> {
        let name = self.display_name(index);

        let matcher = match (&self.test, self.extensions.is_empty()) {
            (Some(_), false) => {
                return Err(ConfigError::schema(
                    format!("rule '{name}' sets both 'test' and 'extensions'"),
                    "Use either a 'test' pattern or an 'extensions' list",
                ));
            }
            (Some(pattern), true) if self.case_insensitive => Matcher::pattern_ignore_case(pattern)?,
            (Some(pattern), true) => Matcher::pattern(pattern)?,
            (None, false) if self.case_insensitive => {
                Matcher::extensions_ignore_case(&self.extensions)
            }
            (None, false) => Matcher::extensions(&self.extensions),
            (None, true) => {
                return Err(ConfigError::schema(
                    format!("rule '{name}' has nothing to match"),
                    "Add a 'test' pattern or an 'extensions' list",
                ));
            }
        };

        let filename = self
            .filename
            .as_deref()
            .map(FilenameTemplate::parse)
            .transpose()?;

        let policy = match self.kind {
            AssetType::Bundle => OutputPolicy::Bundle,
            AssetType::Inline => OutputPolicy::Inline,
            AssetType::Resource => OutputPolicy::Emit { filename },
            AssetType::Asset => OutputPolicy::Auto {
                max_inline_size: self.max_inline_size.unwrap_or(inline_limit),
                filename,
            },
        };

        let chain: TransformChain = self.loaders.iter().map(LoaderConfig::to_loader).collect();

        Ok(Rule::new(name, matcher)
            .with_chain(chain)
            .with_policy(policy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn loader_config_accepts_both_forms() {
        let loaders: Vec<LoaderConfig> = serde_json::from_value(json!([
            "css-loader",
            { "loader": "postcss-loader", "options": { "postcssOptions": {} } }
        ]))
        .unwrap();

        assert_eq!(loaders[0], LoaderConfig::Name("css-loader".to_string()));
        assert_eq!(loaders[1].name(), "postcss-loader");
    }

    #[test]
    fn asset_type_names() {
        let kinds: Vec<AssetType> =
            serde_json::from_value(json!(["bundle", "asset", "asset/resource", "asset/inline"]))
                .unwrap();
        assert_eq!(
            kinds,
            [
                AssetType::Bundle,
                AssetType::Asset,
                AssetType::Resource,
                AssetType::Inline
            ]
        );
    }

    #[test]
    fn to_rule_uses_inline_limit_default() {
        let cfg = RuleConfig {
            extensions: vec!["png".into()],
            kind: AssetType::Asset,
            ..Default::default()
        };
        let rule = cfg.to_rule(3, 2048).unwrap();
        assert_eq!(rule.name(), "rule-3");
        assert_eq!(
            rule.policy(),
            &OutputPolicy::Auto {
                max_inline_size: 2048,
                filename: None
            }
        );
    }

    #[test]
    fn to_rule_builds_chain_in_order() {
        let cfg = RuleConfig {
            name: Some("styles".into()),
            test: Some(r"\.css$".into()),
            case_insensitive: true,
            loaders: vec![
                LoaderConfig::Name("style-loader".into()),
                LoaderConfig::Detailed {
                    loader: "css-loader".into(),
                    options: json!({ "modules": true }),
                },
            ],
            ..Default::default()
        };
        let rule = cfg.to_rule(0, 10240).unwrap();
        assert_eq!(rule.chain().names(), ["style-loader", "css-loader"]);
        assert!(rule.matcher().matches_extension("CSS"));
        assert_eq!(rule.policy(), &OutputPolicy::Bundle);
    }

    #[test]
    fn to_rule_rejects_missing_matcher() {
        let err = RuleConfig::default().to_rule(0, 10240).unwrap_err();
        assert!(matches!(err, ConfigError::SchemaValidation { .. }));
    }

    #[test]
    fn to_rule_rejects_bad_template() {
        let cfg = RuleConfig {
            extensions: vec!["ttf".into()],
            kind: AssetType::Resource,
            filename: Some("fonts/[chunkhash]".into()),
            ..Default::default()
        };
        let err = cfg.to_rule(0, 10240).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Rules(lode_rules::Error::InvalidTemplate { .. })
        ));
    }
}
