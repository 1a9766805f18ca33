//! URL substring matching.

use super::Matcher;

/// Matches a URL containing any of a set of substrings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMatcherImpl {
    /// Non-empty alternatives; any one present is a match
    alternatives: Vec<String>,
}

impl UrlMatcherImpl {
    /// Match URLs containing `pattern`. Returns `None` for an empty pattern.
    pub fn contains(pattern: &str) -> Option<Self> {
        if pattern.is_empty() {
            return None;
        }

        Some(Self {
            alternatives: vec![pattern.to_string()],
        })
    }

    /// Match URLs containing any of the `|`-separated alternatives.
    ///
    /// Empty alternatives are ignored; returns `None` if none remain.
    pub fn any_of(patterns: &str) -> Option<Self> {
        let alternatives: Vec<String> = patterns
            .split('|')
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .collect();

        (!alternatives.is_empty()).then_some(Self { alternatives })
    }
}

impl Matcher for UrlMatcherImpl {
    fn matches(&self, url: &str) -> bool {
        self.alternatives.iter().any(|alt| url.contains(alt.as_str()))
    }

    fn name(&self) -> &'static str {
        "url_matcher"
    }
}
