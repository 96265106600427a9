//! Configuration loading for lode.
//!
//! A [`LodeConfig`] is read from `lode.toml` (or the `lode` field of
//! `package.json`), layered with `LODE_*` environment variables, optionally
//! narrowed by a profile, and finally compiled into a
//! [`lode_rules::RuleSet`].

pub mod config;
pub mod discovery;
pub mod error;
pub mod rule;
pub mod settings;
pub mod validation;

pub use config::*;
pub use error::*;
pub use rule::*;
pub use settings::*;

pub use discovery::{ConfigDiscovery, ENV_PREFIX, discover, discover_with_profile};
pub use validation::{
    CompileValidator, ConfigValidator, SchemaValidator, validate_compiled, validate_schema,
};
