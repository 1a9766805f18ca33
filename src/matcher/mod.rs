//! Include/exclude filtering of HAR entries by URL.

mod url;

pub use url::UrlMatcherImpl;

use crate::config::FilterConfig;
use tracing::trace;

/// Trait for matching a request URL.
pub trait Matcher {
    /// Check if this matcher matches the given URL.
    fn matches(&self, url: &str) -> bool;

    /// Get the matcher name for debugging.
    fn name(&self) -> &'static str;
}

/// Compiled entry filter combining the include and exclude conditions.
///
/// An entry is retained iff its URL matches the include pattern (when set)
/// and matches none of the exclude alternatives (when set).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFilter {
    include: Option<UrlMatcherImpl>,
    exclude: Option<UrlMatcherImpl>,
}

impl EntryFilter {
    /// Build a filter from an include substring and `|`-separated exclude
    /// alternatives. Empty strings mean "no filter".
    pub fn new(include: Option<&str>, exclude: Option<&str>) -> Self {
        Self {
            include: include.and_then(UrlMatcherImpl::contains),
            exclude: exclude.and_then(UrlMatcherImpl::any_of),
        }
    }

    /// Compile a filter from configuration.
    pub fn compile(config: &FilterConfig) -> Self {
        Self::new(config.include.as_deref(), config.exclude.as_deref())
    }

    /// Check whether an entry with this URL is kept.
    pub fn retains(&self, url: &str) -> bool {
        if let Some(ref include) = self.include {
            if !include.matches(url) {
                trace!(matcher = include.name(), url, "URL not included");
                return false;
            }
        }

        if let Some(ref exclude) = self.exclude {
            if exclude.matches(url) {
                trace!(matcher = exclude.name(), url, "URL excluded");
                return false;
            }
        }

        true
    }

    /// Check if any condition is configured.
    pub fn is_active(&self) -> bool {
        self.include.is_some() || self.exclude.is_some()
    }
}
