//! # lode-rules
//!
//! Asset rule dispatcher: given a file and an ordered rule table, decide which
//! loader chain applies and where the output goes (inline data URI, emitted
//! file, or bundled module).
//!
//! ## Quick Start
//!
//! ```
//! use lode_rules::{Asset, Matcher, OutputPolicy, Rule, RuleSet, TransformChain, Loader};
//!
//! let rules = RuleSet::builder()
//!     .rule(Rule::new("images", Matcher::extensions(["png", "svg"])).with_policy(OutputPolicy::auto()))
//!     .rule(
//!         Rule::new("less", Matcher::pattern_ignore_case(r"\.less$")?)
//!             .with_chain(TransformChain::style(Some(Loader::new("less-loader")))),
//!     )
//!     .build()?;
//!
//! let decision = rules.dispatch(&Asset::new("theme.less", 2048)?)?;
//! assert_eq!(decision.rule(), Some("less"));
//! assert_eq!(decision.chain().len(), 4);
//! # Ok::<(), lode_rules::Error>(())
//! ```
//!
//! Dispatch is pure and the rule set is immutable, so both can be shared
//! freely across threads; [`dispatch_all`] fans a batch out over rayon.

pub mod asset;
pub mod chain;
pub mod dispatch;
pub mod error;
pub mod matcher;
pub mod policy;
pub mod presets;
pub mod rule;
pub mod template;

pub use asset::{Asset, KNOWN_EXTENSIONS, mime_for_extension};
pub use chain::{Loader, TransformChain};
pub use dispatch::{Decision, OutputLocation, dispatch, dispatch_all};
pub use error::{Error, Result};
pub use matcher::Matcher;
pub use policy::{DEFAULT_ASSET_FILENAME, DEFAULT_INLINE_LIMIT, Fallback, OutputPolicy};
pub use presets::Preset;
pub use rule::{Rule, RuleSet, RuleSetBuilder};
pub use template::{FilenameTemplate, hash_content};
