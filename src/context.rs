//! Run-scoped conversion state threaded through the entry pass.

use crate::testcase::SuiteConfig;

/// Accumulator folded over the HAR entries of a single conversion run.
///
/// Holds the first User-Agent seen and per-run counters. Each step returns a
/// new context; nothing is shared between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertContext {
    /// First non-empty User-Agent seen, in HAR order
    user_agent: Option<String>,
    /// Entries turned into test cases
    converted: usize,
    /// Entries dropped by the include/exclude filter
    skipped: usize,
}

impl ConvertContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a User-Agent. Only the first one seen is kept.
    pub fn with_user_agent(mut self, user_agent: Option<String>) -> Self {
        if self.user_agent.is_none() {
            self.user_agent = user_agent.filter(|ua| !ua.is_empty());
        }
        self
    }

    /// Count an entry that produced a test case.
    pub fn with_converted(mut self) -> Self {
        self.converted += 1;
        self
    }

    /// Count an entry dropped by filtering.
    pub fn with_skipped(mut self) -> Self {
        self.skipped += 1;
        self
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    pub fn converted(&self) -> usize {
        self.converted
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Build the suite config block from the accumulated state.
    pub fn suite_config(&self, name: &str) -> SuiteConfig {
        SuiteConfig::new(name, self.user_agent())
    }
}
