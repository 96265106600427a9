//! Built-in rule tables.
//!
//! `vue-dev` is the loader table of a typical Vue single-page application
//! development build: single-file components, four stylesheet dialects sharing
//! one style chain, size-based image inlining, emitted fonts and media, and
//! Babel for scripts.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::chain::{Loader, TransformChain};
use crate::error::Result;
use crate::matcher::Matcher;
use crate::policy::{DEFAULT_INLINE_LIMIT, Fallback, OutputPolicy};
use crate::rule::{Rule, RuleSet};

/// Extensions inlined below the threshold by `vue-dev`.
pub const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "webp", "svg", "gif"];

/// Extensions always emitted by `vue-dev`.
pub const MEDIA_EXTENSIONS: [&str; 5] = ["woff", "woff2", "ttf", "mp3", "mp4"];

/// Named built-in rule tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    VueDev,
}

impl Preset {
    /// Rules of this preset, using `inline_limit` for size-based inlining.
    pub fn rules(self, inline_limit: u64) -> Result<Vec<Rule>> {
        match self {
            Preset::VueDev => vue_dev_rules(inline_limit),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::VueDev => "vue-dev",
        }
    }
}

impl std::str::FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "vue-dev" => Ok(Preset::VueDev),
            other => Err(format!("unknown preset: {other}")),
        }
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The `vue-dev` rule table with the default 10 KiB inline limit.
pub fn vue_dev() -> Result<RuleSet> {
    RuleSet::builder()
        .rules(vue_dev_rules(DEFAULT_INLINE_LIMIT)?)
        .fallback(Fallback::PassThrough)
        .build()
}

/// The `vue-dev` rules in declaration order.
pub fn vue_dev_rules(inline_limit: u64) -> Result<Vec<Rule>> {
    let babel = Loader::new("babel-loader").with_options(json!({
        "cacheDirectory": true,
        "cacheCompression": false
    }));

    Ok(vec![
        Rule::new("vue", Matcher::pattern(r"\.vue$")?).with_loader("vue-loader"),
        Rule::new("css", Matcher::pattern_ignore_case(r"\.css$")?)
            .with_chain(TransformChain::style(None)),
        Rule::new("less", Matcher::pattern_ignore_case(r"\.less$")?)
            .with_chain(TransformChain::style(Some(Loader::new("less-loader")))),
        Rule::new("sass", Matcher::pattern_ignore_case(r"\.s[ac]ss$")?)
            .with_chain(TransformChain::style(Some(Loader::new("sass-loader")))),
        Rule::new("stylus", Matcher::pattern_ignore_case(r"\.styl$")?)
            .with_chain(TransformChain::style(Some(Loader::new("stylus-loader")))),
        Rule::new("images", Matcher::extensions(IMAGE_EXTENSIONS)).with_policy(
            OutputPolicy::Auto {
                max_inline_size: inline_limit,
                filename: None,
            },
        ),
        Rule::new("media", Matcher::extensions(MEDIA_EXTENSIONS)).with_policy(OutputPolicy::emit()),
        Rule::new("scripts", Matcher::pattern(r"\.(js)$")?).with_loader(babel),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::Asset;

    #[test]
    fn rule_order_matches_table() {
        let set = vue_dev().unwrap();
        let names: Vec<&str> = set.iter().map(Rule::name).collect();
        assert_eq!(
            names,
            ["vue", "css", "less", "sass", "stylus", "images", "media", "scripts"]
        );
    }

    #[test]
    fn stylesheets_share_style_chain() {
        let set = vue_dev().unwrap();
        let scss = set.dispatch(&Asset::new("App.SCSS", 10).unwrap()).unwrap();
        assert_eq!(
            scss.chain().names(),
            ["vue-style-loader", "css-loader", "postcss-loader", "sass-loader"]
        );

        let css = set.dispatch(&Asset::new("reset.css", 10).unwrap()).unwrap();
        assert_eq!(css.chain().len(), 3);
    }

    #[test]
    fn scripts_use_babel_with_cache() {
        let set = vue_dev().unwrap();
        let js = set.dispatch(&Asset::new("src/main.js", 10).unwrap()).unwrap();
        let babel = js.chain().iter().next().unwrap();
        assert_eq!(babel.name, "babel-loader");
        assert_eq!(babel.options["cacheDirectory"], true);
        assert_eq!(babel.options["cacheCompression"], false);
    }

    #[test]
    fn json_passes_through() {
        let set = vue_dev().unwrap();
        let decision = set.dispatch(&Asset::new("data.json", 10).unwrap()).unwrap();
        assert!(decision.is_pass_through());
    }

    #[test]
    fn custom_inline_limit() {
        let set = RuleSet::builder()
            .rules(Preset::VueDev.rules(100).unwrap())
            .build()
            .unwrap();
        assert!(set.dispatch(&Asset::new("a.png", 99).unwrap()).unwrap().is_inline());
        assert!(set.dispatch(&Asset::new("a.png", 100).unwrap()).unwrap().is_emitted());
    }

    #[test]
    fn preset_names_round_trip() {
        assert_eq!("vue-dev".parse::<Preset>().unwrap(), Preset::VueDev);
        assert_eq!(Preset::VueDev.to_string(), "vue-dev");
        assert!("react".parse::<Preset>().is_err());
    }
}
