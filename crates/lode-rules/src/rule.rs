//! Rules and validated rule sets.

use serde::Serialize;
use tracing::debug;

use crate::asset::{Asset, KNOWN_EXTENSIONS};
use crate::chain::{Loader, TransformChain};
use crate::dispatch::{Decision, dispatch};
use crate::error::{Error, Result};
use crate::matcher::Matcher;
use crate::policy::{DEFAULT_ASSET_FILENAME, Fallback, OutputPolicy};
use crate::template::FilenameTemplate;

/// A matcher plus what to do with the assets it matches.
#[derive(Debug, Clone, Serialize)]
pub struct Rule {
    name: String,
    matcher: Matcher,
    chain: TransformChain,
    policy: OutputPolicy,
}

impl Rule {
    /// New rule with an empty chain and the `Bundle` policy.
    pub fn new(name: impl Into<String>, matcher: Matcher) -> Self {
        Self {
            name: name.into(),
            matcher,
            chain: TransformChain::new(),
            policy: OutputPolicy::Bundle,
        }
    }

    pub fn with_chain(mut self, chain: TransformChain) -> Self {
        self.chain = chain;
        self
    }

    pub fn with_loader(mut self, loader: impl Into<Loader>) -> Self {
        self.chain = self.chain.then(loader);
        self
    }

    pub fn with_policy(mut self, policy: OutputPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn chain(&self) -> &TransformChain {
        &self.chain
    }

    pub fn policy(&self) -> &OutputPolicy {
        &self.policy
    }

    pub fn matches(&self, asset: &Asset) -> bool {
        self.matcher.matches(asset)
    }

    fn conflicts_with(&self, other: &Rule) -> bool {
        self.chain != other.chain || self.policy != other.policy
    }
}

/// An ordered, validated, immutable list of rules.
///
/// Build one with [`RuleSet::builder`]. Construction rejects overlapping rules
/// so that every asset matches at most one distinct behavior.
#[derive(Debug, Clone, Serialize)]
pub struct RuleSet {
    rules: Vec<Rule>,
    asset_filename: FilenameTemplate,
    fallback: Fallback,
}

impl RuleSet {
    pub fn builder() -> RuleSetBuilder {
        RuleSetBuilder::default()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Template used by emitting rules that do not set their own.
    pub fn asset_filename(&self) -> &FilenameTemplate {
        &self.asset_filename
    }

    pub fn fallback(&self) -> Fallback {
        self.fallback
    }

    /// First rule matching the asset, in declaration order.
    pub fn find(&self, asset: &Asset) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.matches(asset))
    }

    /// Shorthand for [`dispatch`](crate::dispatch()) with this rule set.
    pub fn dispatch(&self, asset: &Asset) -> Result<Decision> {
        dispatch(asset, self)
    }
}

/// Builder for [`RuleSet`].
#[derive(Debug)]
pub struct RuleSetBuilder {
    rules: Vec<Rule>,
    asset_filename: String,
    fallback: Fallback,
    extra_extensions: Vec<String>,
}

impl Default for RuleSetBuilder {
    fn default() -> Self {
        Self {
            rules: Vec::new(),
            asset_filename: DEFAULT_ASSET_FILENAME.to_string(),
            fallback: Fallback::default(),
            extra_extensions: Vec::new(),
        }
    }
}

impl RuleSetBuilder {
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(mut self, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.rules.extend(rules);
        self
    }

    pub fn asset_filename(mut self, template: impl Into<String>) -> Self {
        self.asset_filename = template.into();
        self
    }

    pub fn fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = fallback;
        self
    }

    /// Extra extension to test for overlaps between pattern rules.
    ///
    /// [`KNOWN_EXTENSIONS`] and every extension named by an extension matcher
    /// are always checked. Patterns can only be tested against concrete
    /// extensions, so project-specific ones are added here.
    pub fn check_extension(mut self, extension: impl Into<String>) -> Self {
        self.extra_extensions.push(extension.into());
        self
    }

    /// Validate and freeze the rule set.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyRuleSet`] when no rules were added
    /// - [`Error::InvalidTemplate`] when the asset filename is malformed
    /// - [`Error::AmbiguousRuleMatch`] when two rules with different chains
    ///   or policies match the same checked extension
    pub fn build(self) -> Result<RuleSet> {
        if self.rules.is_empty() {
            return Err(Error::EmptyRuleSet);
        }

        let asset_filename = FilenameTemplate::parse(&self.asset_filename)?;

        let mut extensions: Vec<String> =
            KNOWN_EXTENSIONS.iter().map(|ext| ext.to_string()).collect();
        extensions.extend(self.extra_extensions);
        for rule in &self.rules {
            extensions.extend(rule.matcher.named_extensions().iter().cloned());
        }
        extensions.sort();
        extensions.dedup();

        for extension in &extensions {
            check_overlap(&self.rules, extension)?;
        }

        debug!(
            rules = self.rules.len(),
            checked_extensions = extensions.len(),
            fallback = %self.fallback,
            "rule set built"
        );

        Ok(RuleSet {
            rules: self.rules,
            asset_filename,
            fallback: self.fallback,
        })
    }
}

fn check_overlap(rules: &[Rule], extension: &str) -> Result<()> {
    let mut matching = rules
        .iter()
        .filter(|rule| rule.matcher.matches_extension(extension));

    let Some(first) = matching.next() else {
        return Ok(());
    };

    for other in matching {
        if first.conflicts_with(other) {
            return Err(Error::AmbiguousRuleMatch {
                first: first.name.clone(),
                second: other.name.clone(),
                extension: extension.to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn images() -> Rule {
        Rule::new("images", Matcher::extensions(["png", "svg"])).with_policy(OutputPolicy::auto())
    }

    #[test]
    fn empty_rule_set_is_rejected() {
        let err = RuleSet::builder().build().unwrap_err();
        assert!(matches!(err, Error::EmptyRuleSet));
    }

    #[test]
    fn overlapping_extensions_are_rejected() {
        let icons = Rule::new("icons", Matcher::extensions(["svg"]))
            .with_loader("svgo-loader")
            .with_policy(OutputPolicy::emit());

        let err = RuleSet::builder()
            .rule(images())
            .rule(icons)
            .build()
            .unwrap_err();

        match err {
            Error::AmbiguousRuleMatch {
                first,
                second,
                extension,
            } => {
                assert_eq!(first, "images");
                assert_eq!(second, "icons");
                assert_eq!(extension, "svg");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn pattern_overlapping_named_extension_is_rejected() {
        let styles = Rule::new("styles", Matcher::pattern(r"\.(png|css)$").unwrap())
            .with_loader("css-loader");

        let err = RuleSet::builder()
            .rule(images())
            .rule(styles)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::AmbiguousRuleMatch { .. }));
    }

    #[test]
    fn overlapping_patterns_are_rejected() {
        let ts = Rule::new("ts", Matcher::pattern(r"\.ts$").unwrap()).with_loader("esbuild-loader");
        let tsx = Rule::new("tsx", Matcher::pattern(r"\.tsx?$").unwrap()).with_loader("ts-loader");

        let err = RuleSet::builder().rule(ts).rule(tsx).build().unwrap_err();
        match err {
            Error::AmbiguousRuleMatch {
                first,
                second,
                extension,
            } => {
                assert_eq!(first, "ts");
                assert_eq!(second, "tsx");
                assert_eq!(extension, "ts");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn extra_extensions_catch_project_specific_overlaps() {
        let a = Rule::new("a", Matcher::pattern(r"\.glsl$").unwrap()).with_loader("raw-loader");
        let b = Rule::new("b", Matcher::pattern(r"\.(glsl|frag)$").unwrap())
            .with_loader("glslify-loader");

        assert!(RuleSet::builder().rule(a.clone()).rule(b.clone()).build().is_ok());

        let err = RuleSet::builder()
            .rule(a)
            .rule(b)
            .check_extension("glsl")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::AmbiguousRuleMatch { extension, .. } if extension == "glsl"));
    }

    #[test]
    fn identical_duplicates_are_tolerated() {
        let set = RuleSet::builder()
            .rule(images())
            .rule(images())
            .build()
            .unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn invalid_asset_filename_is_rejected() {
        let err = RuleSet::builder()
            .rule(images())
            .asset_filename("[id][ext]")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidTemplate { .. }));
    }

    #[test]
    fn find_returns_first_match() {
        let set = RuleSet::builder()
            .rule(images())
            .rule(Rule::new("scripts", Matcher::pattern(r"\.js$").unwrap()).with_loader("babel-loader"))
            .build()
            .unwrap();

        let asset = Asset::new("main.js", 10).unwrap();
        assert_eq!(set.find(&asset).map(Rule::name), Some("scripts"));
        assert!(set.find(&Asset::new("x.bin", 1).unwrap()).is_none());
        assert_eq!(set.asset_filename().as_str(), DEFAULT_ASSET_FILENAME);
        assert_eq!(set.fallback(), Fallback::PassThrough);
    }
}
