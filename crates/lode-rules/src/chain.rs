//! Loader identifiers and ordered transform chains.
//!
//! Chains are stored in declaration order, the way a configuration file lists
//! them. Bundlers apply such lists right-to-left, so the last loader sees the
//! raw file first; [`TransformChain::execution_order`] yields that order.

use serde::Serialize;
use serde_json::{Value, json};

/// One named transformation step with optional opaque options.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Loader {
    pub name: String,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub options: Value,
}

impl Loader {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Value::Null,
        }
    }

    pub fn with_options(mut self, options: Value) -> Self {
        self.options = options;
        self
    }
}

impl From<&str> for Loader {
    fn from(name: &str) -> Self {
        Loader::new(name)
    }
}

impl std::fmt::Display for Loader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Ordered sequence of loaders applied to a matched asset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TransformChain(Vec<Loader>);

impl TransformChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a loader, builder style.
    pub fn then(mut self, loader: impl Into<Loader>) -> Self {
        self.0.push(loader.into());
        self
    }

    /// The style chain shared by every stylesheet rule.
    ///
    /// `vue-style-loader`, `css-loader` and `postcss-loader` (with
    /// `postcss-preset-env`) followed by the optional preprocessor loader.
    ///
    /// # Example
    ///
    /// ```
    /// use lode_rules::{Loader, TransformChain};
    ///
    /// let chain = TransformChain::style(Some(Loader::new("sass-loader")));
    /// assert_eq!(
    ///     chain.names(),
    ///     ["vue-style-loader", "css-loader", "postcss-loader", "sass-loader"]
    /// );
    /// ```
    pub fn style(preprocessor: Option<Loader>) -> Self {
        let postcss = Loader::new("postcss-loader").with_options(json!({
            "postcssOptions": {
                "plugins": ["postcss-preset-env"]
            }
        }));

        let mut chain = Self::new()
            .then("vue-style-loader")
            .then("css-loader")
            .then(postcss);
        if let Some(pre) = preprocessor {
            chain = chain.then(pre);
        }
        chain
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Loaders in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Loader> {
        self.0.iter()
    }

    /// Loaders in the order a bundler runs them (last declared first).
    pub fn execution_order(&self) -> impl Iterator<Item = &Loader> {
        self.0.iter().rev()
    }

    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|l| l.name.as_str()).collect()
    }
}

impl FromIterator<Loader> for TransformChain {
    fn from_iter<T: IntoIterator<Item = Loader>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TransformChain {
    type Item = &'a Loader;
    type IntoIter = std::slice::Iter<'a, Loader>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl std::fmt::Display for TransformChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            return f.write_str("[]");
        }
        f.write_str(&self.names().join(" ! "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_chain_without_preprocessor() {
        let chain = TransformChain::style(None);
        assert_eq!(chain.len(), 3);
        assert_eq!(
            chain.iter().nth(2).unwrap().options["postcssOptions"]["plugins"][0],
            "postcss-preset-env"
        );
    }

    #[test]
    fn execution_order_is_reversed() {
        let chain = TransformChain::style(Some(Loader::new("less-loader")));
        let order: Vec<&str> = chain.execution_order().map(|l| l.name.as_str()).collect();
        assert_eq!(
            order,
            ["less-loader", "postcss-loader", "css-loader", "vue-style-loader"]
        );
    }

    #[test]
    fn display_joins_names() {
        let chain = TransformChain::new().then("a").then("b");
        assert_eq!(chain.to_string(), "a ! b");
        assert_eq!(TransformChain::new().to_string(), "[]");
    }

    #[test]
    fn serializes_options_only_when_present() {
        let chain = TransformChain::new()
            .then("vue-loader")
            .then(Loader::new("babel-loader").with_options(json!({ "cacheDirectory": true })));
        let value = serde_json::to_value(&chain).unwrap();
        assert_eq!(
            value,
            json!([
                { "name": "vue-loader" },
                { "name": "babel-loader", "options": { "cacheDirectory": true } }
            ])
        );
    }
}
