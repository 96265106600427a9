//! The dispatch decision.
//!
//! [`dispatch`] is a pure function of the asset and the rule set: it walks the
//! rules in declaration order and resolves the first match into a
//! [`Decision`]. Nothing is read or written; callers that want a data URI or a
//! rendered hashed path supply the content on the [`Asset`].

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, trace};

use crate::asset::Asset;
use crate::chain::TransformChain;
use crate::error::{Error, Result};
use crate::policy::{Fallback, OutputPolicy};
use crate::rule::{Rule, RuleSet};
use crate::template::FilenameTemplate;

/// Where the processed asset ends up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum OutputLocation {
    /// Embedded in the bundle as a data URI.
    Inline {
        mime: &'static str,
        /// Present when the asset was dispatched with its content.
        #[serde(skip_serializing_if = "Option::is_none")]
        data_uri: Option<String>,
    },
    /// Written as a separate file named by `template`.
    Emitted {
        template: String,
        /// Rendered template; absent when it hashes content that was not supplied.
        #[serde(skip_serializing_if = "Option::is_none")]
        path: Option<String>,
    },
    /// Turned into a module of the bundle by its transform chain.
    Bundled,
    /// Not handled by any rule.
    PassThrough,
}

/// Result of dispatching one asset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decision {
    rule: Option<String>,
    chain: TransformChain,
    output: OutputLocation,
}

impl Decision {
    /// Decision for an asset no rule handles.
    pub fn pass_through() -> Self {
        Self {
            rule: None,
            chain: TransformChain::new(),
            output: OutputLocation::PassThrough,
        }
    }

    /// Name of the matching rule, `None` for pass-through.
    pub fn rule(&self) -> Option<&str> {
        self.rule.as_deref()
    }

    pub fn chain(&self) -> &TransformChain {
        &self.chain
    }

    pub fn output(&self) -> &OutputLocation {
        &self.output
    }

    pub fn is_inline(&self) -> bool {
        matches!(self.output, OutputLocation::Inline { .. })
    }

    pub fn is_emitted(&self) -> bool {
        matches!(self.output, OutputLocation::Emitted { .. })
    }

    pub fn is_pass_through(&self) -> bool {
        matches!(self.output, OutputLocation::PassThrough)
    }
}

/// Pick the transform chain and output location for an asset.
///
/// # Errors
///
/// Returns [`Error::NoMatchingRule`] when nothing matches and the rule set's
/// fallback is [`Fallback::Reject`]. Assets without content still dispatch;
/// hashed output paths are then left unrendered.
///
/// # Example
///
/// ```
/// use lode_rules::{Asset, dispatch, presets};
///
/// let rules = presets::vue_dev().unwrap();
///
/// let logo = Asset::new("logo.svg", 4096).unwrap();
/// let decision = dispatch(&logo, &rules).unwrap();
/// assert!(decision.chain().is_empty());
/// assert!(decision.is_inline());
///
/// let hero = Asset::new("hero.png", 20480).unwrap();
/// assert!(dispatch(&hero, &rules).unwrap().is_emitted());
/// ```
pub fn dispatch(asset: &Asset, rules: &RuleSet) -> Result<Decision> {
    for rule in rules.iter() {
        trace!(rule = rule.name(), path = asset.path(), "testing rule");
        if rule.matches(asset) {
            let decision = resolve(asset, rule, rules.asset_filename())?;
            debug!(
                path = asset.path(),
                rule = rule.name(),
                chain = %decision.chain,
                "asset dispatched"
            );
            return Ok(decision);
        }
    }

    match rules.fallback() {
        Fallback::PassThrough => {
            debug!(path = asset.path(), "no rule matched, passing through");
            Ok(Decision::pass_through())
        }
        Fallback::Reject => Err(Error::NoMatchingRule {
            path: asset.path().to_string(),
        }),
    }
}

/// Dispatch many assets in parallel. Results keep the input order.
pub fn dispatch_all(rules: &RuleSet, assets: &[Asset]) -> Vec<Result<Decision>> {
    assets
        .par_iter()
        .map(|asset| dispatch(asset, rules))
        .collect()
}

fn resolve(asset: &Asset, rule: &Rule, default_filename: &FilenameTemplate) -> Result<Decision> {
    let output = match rule.policy() {
        OutputPolicy::Bundle => OutputLocation::Bundled,
        OutputPolicy::Inline => inline(asset),
        OutputPolicy::Emit { filename } => {
            emitted(asset, filename.as_ref().unwrap_or(default_filename))?
        }
        OutputPolicy::Auto {
            max_inline_size,
            filename,
        } => {
            if asset.size_bytes() < *max_inline_size {
                inline(asset)
            } else {
                emitted(asset, filename.as_ref().unwrap_or(default_filename))?
            }
        }
    };

    Ok(Decision {
        rule: Some(rule.name().to_string()),
        chain: rule.chain().clone(),
        output,
    })
}

fn inline(asset: &Asset) -> OutputLocation {
    let mime = asset.mime_type();
    let data_uri = asset
        .content()
        .map(|bytes| format!("data:{mime};base64,{}", STANDARD.encode(bytes)));
    OutputLocation::Inline { mime, data_uri }
}

fn emitted(asset: &Asset, template: &FilenameTemplate) -> Result<OutputLocation> {
    let path = if template.requires_content() && asset.content().is_none() {
        None
    } else {
        Some(template.render(asset)?)
    };
    Ok(OutputLocation::Emitted {
        template: template.as_str().to_string(),
        path,
    })
}
