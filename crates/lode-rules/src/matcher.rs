use regex::{Regex, RegexBuilder};
use serde::{Serialize, Serializer};

use crate::asset::Asset;
use crate::error::{Error, Result};

/// Decides whether a rule applies to an asset.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Match on a fixed set of extensions (stored without the leading dot).
    Extensions {
        extensions: Vec<String>,
        case_insensitive: bool,
    },
    /// Match a regular expression against the asset path.
    Pattern(Regex),
}

impl Matcher {
    /// Match any of the given extensions exactly. A leading dot is ignored.
    pub fn extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::Extensions {
            extensions: normalize(extensions),
            case_insensitive: false,
        }
    }

    /// Match any of the given extensions regardless of case.
    pub fn extensions_ignore_case<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::Extensions {
            extensions: normalize(extensions),
            case_insensitive: true,
        }
    }

    /// Compile a path pattern such as `\.s[ac]ss$`.
    pub fn pattern(pattern: &str) -> Result<Self> {
        Self::build_pattern(pattern, false)
    }

    /// Compile a case-insensitive path pattern (the `/i` flag).
    pub fn pattern_ignore_case(pattern: &str) -> Result<Self> {
        Self::build_pattern(pattern, true)
    }

    fn build_pattern(pattern: &str, case_insensitive: bool) -> Result<Self> {
        RegexBuilder::new(pattern)
            .case_insensitive(case_insensitive)
            .build()
            .map(Self::Pattern)
            .map_err(|source| Error::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    pub fn matches(&self, asset: &Asset) -> bool {
        match self {
            Self::Extensions { .. } => self.matches_extension(asset.extension()),
            Self::Pattern(re) => re.is_match(asset.path()),
        }
    }

    /// Test a bare extension, used when probing rule sets for overlaps.
    pub fn matches_extension(&self, extension: &str) -> bool {
        match self {
            Self::Extensions {
                extensions,
                case_insensitive,
            } => extensions.iter().any(|ext| {
                if *case_insensitive {
                    ext.eq_ignore_ascii_case(extension)
                } else {
                    ext == extension
                }
            }),
            Self::Pattern(re) => re.is_match(&format!("file.{extension}")),
        }
    }

    /// Extensions named explicitly by this matcher.
    pub fn named_extensions(&self) -> &[String] {
        match self {
            Self::Extensions { extensions, .. } => extensions,
            Self::Pattern(_) => &[],
        }
    }
}

impl std::fmt::Display for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Extensions {
                extensions,
                case_insensitive,
            } => {
                let list = extensions
                    .iter()
                    .map(|e| format!(".{e}"))
                    .collect::<Vec<_>>()
                    .join(" ");
                if *case_insensitive {
                    write!(f, "{list} (any case)")
                } else {
                    write!(f, "{list}")
                }
            }
            Self::Pattern(re) => write!(f, "/{}/", re.as_str()),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum MatcherRepr<'a> {
    Extensions {
        extensions: &'a [String],
        case_insensitive: bool,
    },
    Test(&'a str),
}

impl Serialize for Matcher {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let repr = match self {
            Self::Extensions {
                extensions,
                case_insensitive,
            } => MatcherRepr::Extensions {
                extensions,
                case_insensitive: *case_insensitive,
            },
            Self::Pattern(re) => MatcherRepr::Test(re.as_str()),
        };
        repr.serialize(serializer)
    }
}

fn normalize<I, S>(extensions: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    extensions
        .into_iter()
        .map(|ext| ext.as_ref().trim().trim_start_matches('.').to_string())
        .filter(|ext| !ext.is_empty())
        .collect()
}
