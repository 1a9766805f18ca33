//! HAR to test suite converter.

use crate::config::ConvertConfig;
use crate::context::ConvertContext;
use crate::har::{self, HarEntry, HarError};
use crate::matcher::EntryFilter;
use crate::testcase::{TestCase, TestRequest, TestSuite};
use crate::transformer::{
    BodyTransformer, HeaderTransformer, TransformError, Transformer, UrlTransformer,
    ValidateTransformer,
};
use std::path::Path;
use tracing::{debug, info, trace};

/// Converts HAR log entries into a test suite document.
pub struct HarConverter {
    /// Configuration
    config: ConvertConfig,
    /// Compiled include/exclude filter
    filter: EntryFilter,
    url: UrlTransformer,
    header: HeaderTransformer,
    body: BodyTransformer,
    validate: ValidateTransformer,
}

/// Test case built from one entry, with the User-Agent it carried.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedEntry {
    pub testcase: TestCase,
    pub user_agent: Option<String>,
}

impl HarConverter {
    /// Create a new converter from configuration.
    pub fn new(config: ConvertConfig) -> Result<Self, ConvertError> {
        if config.version != "1" {
            return Err(ConvertError::UnsupportedVersion(config.version));
        }

        let filter = EntryFilter::compile(&config.filter);

        debug!(
            filter_active = filter.is_active(),
            suite_name = %config.settings.suite_name,
            "HAR converter initialized"
        );

        Ok(Self {
            config,
            filter,
            url: UrlTransformer::new(),
            header: HeaderTransformer::new(),
            body: BodyTransformer::new(),
            validate: ValidateTransformer::new(),
        })
    }

    /// Create from a YAML configuration string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConvertError> {
        let config: ConvertConfig = serde_yaml::from_str(yaml)?;
        Self::new(config)
    }

    /// Create from a JSON configuration string.
    pub fn from_json(json: &str) -> Result<Self, ConvertError> {
        let config: ConvertConfig = serde_json::from_str(json)?;
        Self::new(config)
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Build a test case from a single entry.
    pub fn make_testcase(&self, entry: &HarEntry) -> Result<ConvertedEntry, TransformError> {
        let url = self.url.transform(entry)?;
        let header = self.header.transform(entry)?;
        let payload = self.body.transform(entry)?;
        let validate = self.validate.transform(entry)?;

        trace!(
            url_transformer = self.url.name(),
            header_transformer = self.header.name(),
            body_transformer = self.body.name(),
            validate_transformer = self.validate.name(),
            name = %url.name,
            assertions = validate.len(),
            "Built test case"
        );

        Ok(ConvertedEntry {
            testcase: TestCase {
                name: url.name,
                request: TestRequest {
                    url: url.url,
                    method: payload.method,
                    params: url.params,
                    headers: header.headers,
                    body: payload.body,
                },
                validate,
            },
            user_agent: header.user_agent,
        })
    }

    /// Convert HAR entries into a test suite.
    ///
    /// Entries rejected by the filter are skipped; the rest keep HAR order.
    /// The suite config carries the first User-Agent found among the
    /// converted entries. Any fatal entry error aborts the whole conversion.
    pub fn convert(&self, entries: &[HarEntry]) -> Result<TestSuite, ConvertError> {
        let (ctx, tests) = entries.iter().enumerate().try_fold(
            (ConvertContext::new(), Vec::with_capacity(entries.len())),
            |(ctx, mut tests), (index, entry)| -> Result<_, ConvertError> {
                let url = entry
                    .request
                    .url
                    .as_deref()
                    .ok_or(ConvertError::Entry {
                        index,
                        source: TransformError::MissingUrl,
                    })?;

                if !self.filter.retains(url) {
                    trace!(index, url, "Entry skipped by filter");
                    return Ok((ctx.with_skipped(), tests));
                }

                let converted = self
                    .make_testcase(entry)
                    .map_err(|source| ConvertError::Entry { index, source })?;

                tests.push(converted.testcase);
                Ok((
                    ctx.with_user_agent(converted.user_agent).with_converted(),
                    tests,
                ))
            },
        )?;

        info!(
            entries = entries.len(),
            converted = ctx.converted(),
            skipped = ctx.skipped(),
            user_agent = ?ctx.user_agent(),
            "Converted HAR entries to test cases"
        );

        Ok(TestSuite::new(
            ctx.suite_config(&self.config.settings.suite_name),
            tests,
        ))
    }

    /// Load a HAR file and convert its entries.
    pub fn convert_file(&self, path: impl AsRef<Path>) -> Result<TestSuite, ConvertError> {
        let entries = har::load_har_log_entries(path)?;
        self.convert(&entries)
    }
}

/// Conversion errors.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("{0}")]
    Har(#[from] HarError),

    #[error("HAR entry {index}: {source}")]
    Entry {
        index: usize,
        #[source]
        source: TransformError,
    },

    #[error("unsupported configuration version: {0}")]
    UnsupportedVersion(String),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}
