//! End-to-end dispatch tests against the vue-dev rule table.

use lode_rules::{
    Asset, Error, Fallback, FilenameTemplate, Matcher, OutputLocation, OutputPolicy, Rule,
    RuleSet, dispatch, dispatch_all, hash_content, presets,
};
use std::sync::Arc;

#[test]
fn small_svg_is_inlined_without_loaders() {
    let rules = presets::vue_dev().unwrap();
    let decision = dispatch(&Asset::new("logo.svg", 4096).unwrap(), &rules).unwrap();

    assert_eq!(decision.rule(), Some("images"));
    assert!(decision.chain().is_empty());
    assert_eq!(
        decision.output(),
        &OutputLocation::Inline {
            mime: "image/svg+xml",
            data_uri: None
        }
    );
}

#[test]
fn large_png_is_emitted_under_static_media() {
    let rules = presets::vue_dev().unwrap();
    let decision = dispatch(&Asset::new("hero.png", 20480).unwrap(), &rules).unwrap();

    assert!(decision.chain().is_empty());
    assert_eq!(
        decision.output(),
        &OutputLocation::Emitted {
            template: "static/media/[hash:10][ext][query]".to_string(),
            path: None,
        }
    );
}

#[test]
fn large_png_with_content_gets_hashed_path() {
    let rules = presets::vue_dev().unwrap();
    let content = vec![7u8; 20480];
    let asset = Asset::with_content("img/hero.png?v=3", content.clone()).unwrap();

    let decision = dispatch(&asset, &rules).unwrap();
    let expected = format!("static/media/{}.png?v=3", &hash_content(&content)[..10]);
    match decision.output() {
        OutputLocation::Emitted { path, .. } => assert_eq!(path.as_deref(), Some(expected.as_str())),
        other => panic!("expected emitted output, got {other:?}"),
    }
}

#[test]
fn vue_components_go_through_vue_loader() {
    let rules = presets::vue_dev().unwrap();
    let decision = dispatch(&Asset::new("src/App.vue", 1500).unwrap(), &rules).unwrap();

    assert_eq!(decision.chain().names(), ["vue-loader"]);
    assert_eq!(decision.output(), &OutputLocation::Bundled);
}

#[test]
fn stylus_and_less_get_their_preprocessor_last() {
    let rules = presets::vue_dev().unwrap();

    for (file, pre) in [("a.styl", "stylus-loader"), ("b.less", "less-loader")] {
        let decision = dispatch(&Asset::new(file, 10).unwrap(), &rules).unwrap();
        let names = decision.chain().names();
        assert_eq!(names.last(), Some(&pre));
        assert_eq!(decision.chain().execution_order().next().unwrap().name, pre);
    }
}

#[test]
fn rule_set_is_shareable_across_threads() {
    let rules = Arc::new(presets::vue_dev().unwrap());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let rules = Arc::clone(&rules);
            std::thread::spawn(move || {
                let asset = Asset::new(format!("img/{i}.gif"), 100).unwrap();
                dispatch(&asset, &rules).unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap().is_inline());
    }
}

#[test]
fn batch_dispatch_matches_sequential() {
    let rules = presets::vue_dev().unwrap();
    let assets: Vec<Asset> = [
        ("main.js", 10),
        ("App.vue", 10),
        ("logo.svg", 100),
        ("hero.jpg", 50_000),
        ("inter.woff2", 10),
        ("README.md", 10),
    ]
    .into_iter()
    .map(|(p, s)| Asset::new(p, s).unwrap())
    .collect();

    let batch = dispatch_all(&rules, &assets);
    for (asset, result) in assets.iter().zip(batch) {
        assert_eq!(result.unwrap(), dispatch(asset, &rules).unwrap());
    }
}

#[test]
fn reject_fallback_reports_no_matching_rule() {
    let rules = RuleSet::builder()
        .rule(Rule::new("scripts", Matcher::extensions(["js"])).with_loader("babel-loader"))
        .fallback(Fallback::Reject)
        .build()
        .unwrap();

    let err = dispatch(&Asset::new("styles.css", 10).unwrap(), &rules).unwrap_err();
    assert!(matches!(err, Error::NoMatchingRule { .. }));
    assert_eq!(err.code(), "NO_MATCHING_RULE");
}

#[test]
fn custom_default_filename_applies_to_emit_rules() {
    let rules = RuleSet::builder()
        .rule(Rule::new("fonts", Matcher::extensions(["ttf"])).with_policy(OutputPolicy::emit()))
        .asset_filename("fonts/[name][ext]")
        .build()
        .unwrap();

    let decision = dispatch(&Asset::new("src/Inter.ttf", 10).unwrap(), &rules).unwrap();
    assert_eq!(
        decision.output(),
        &OutputLocation::Emitted {
            template: "fonts/[name][ext]".to_string(),
            path: Some("fonts/Inter.ttf".to_string()),
        }
    );
}

#[test]
fn rule_template_overrides_default() {
    let rules = RuleSet::builder()
        .rule(
            Rule::new("images", Matcher::extensions(["png"])).with_policy(OutputPolicy::Auto {
                max_inline_size: 0,
                filename: Some(FilenameTemplate::parse("img/[name].[hash:4][ext]").unwrap()),
            }),
        )
        .build()
        .unwrap();

    let asset = Asset::with_content("a.png", b"x".to_vec()).unwrap();
    let decision = dispatch(&asset, &rules).unwrap();
    match decision.output() {
        OutputLocation::Emitted { template, path } => {
            assert_eq!(template, "img/[name].[hash:4][ext]");
            assert_eq!(path.as_deref(), Some(format!("img/a.{}.png", &hash_content(b"x")[..4]).as_str()));
        }
        other => panic!("expected emitted output, got {other:?}"),
    }
}
