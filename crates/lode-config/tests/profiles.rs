use lode_config::{ConfigDiscovery, ConfigError, LodeConfig};
use lode_rules::{Asset, OutputLocation};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

const CONFIG: &str = r#"
preset = "vue-dev"

[assets]
inline_limit = 10240

[profiles.production.assets]
inline_limit = 1024
filename = "img/[name].[hash:8][ext]"

[profiles.debug.settings]
log_level = "debug"
"#;

#[test]
fn production_profile_lowers_inline_limit() {
    let config = LodeConfig::from_toml_str(CONFIG)
        .unwrap()
        .materialize_profile(Some("production"))
        .unwrap();
    let rules = config.rule_set().unwrap();

    let asset = Asset::new("src/assets/logo.png", 4096).unwrap();
    let decision = rules.dispatch(&asset).unwrap();
    assert!(decision.is_emitted());
    assert!(matches!(
        decision.output(),
        OutputLocation::Emitted { template, .. } if template == "img/[name].[hash:8][ext]"
    ));
}

#[test]
fn base_config_without_profile() {
    let config = LodeConfig::from_toml_str(CONFIG)
        .unwrap()
        .materialize_profile(None)
        .unwrap();
    let rules = config.rule_set().unwrap();

    let asset = Asset::new("src/assets/logo.png", 4096).unwrap();
    assert!(rules.dispatch(&asset).unwrap().is_inline());
}

#[test]
fn profile_only_touches_named_keys() {
    let config = LodeConfig::from_toml_str(CONFIG)
        .unwrap()
        .materialize_profile(Some("debug"))
        .unwrap();
    assert_eq!(config.settings.log_level.as_deref(), Some("debug"));
    assert_eq!(config.assets.inline_limit, 10240);
}

#[test]
fn discovery_applies_profile() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("lode.toml"), CONFIG).unwrap();

    let config = ConfigDiscovery::new(dir.path())
        .with_env(false)
        .load_with_profile("production")
        .unwrap();
    assert_eq!(config.assets.inline_limit, 1024);
}

#[test]
fn unknown_profile_is_reported() {
    let err = LodeConfig::from_toml_str(CONFIG)
        .unwrap()
        .materialize_profile(Some("staging"))
        .unwrap_err();
    assert!(matches!(err, ConfigError::ProfileNotFound(_)));
    assert_eq!(err.to_string(), "profile 'staging' not found in config");
}

#[test]
fn engine_options_survive_discovery_and_profiles() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("lode.toml"),
        r#"
preset = "vue-dev"

[engine]
minify = false
target = "es2020"

[engine.define]
API_URL = "http://localhost:3000"

[profiles.production.engine]
minify = true
"#,
    )
    .unwrap();

    let config = ConfigDiscovery::new(dir.path())
        .with_env(false)
        .load_with_profile("production")
        .unwrap();

    let expected = json!({
        "minify": true,
        "target": "es2020",
        "define": { "API_URL": "http://localhost:3000" }
    });
    assert_eq!(config.engine, expected);
    assert_eq!(config.to_value().unwrap()["engine"], expected);
}
