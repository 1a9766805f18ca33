//! Request header transformer.

use super::{TransformError, Transformer};
use crate::har::HarEntry;
use crate::testcase::Mapping;
use serde_json::Value as JsonValue;

/// Headers never copied into a test case (compared lowercase).
pub const IGNORE_HEADERS: &[&str] = &[
    "host",
    "accept",
    "content-length",
    "connection",
    "accept-encoding",
    "accept-language",
    "origin",
    "referer",
    "cache-control",
    "pragma",
    "cookie",
    "upgrade-insecure-requests",
    ":authority",
    ":method",
    ":scheme",
    ":path",
];

const USER_AGENT: &str = "user-agent";

/// Header part of a test case.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderParts {
    /// Remaining headers, `None` if all were filtered out
    pub headers: Option<Mapping>,
    /// User-Agent carried by the entry, shared through the suite config
    pub user_agent: Option<String>,
}

/// Copies request headers, dropping the ignored ones.
///
/// `User-Agent` is never copied into the test case; it is returned separately
/// so the converter can lift it into the suite config.
#[derive(Debug, Clone)]
pub struct HeaderTransformer {
    /// Lowercase header names to drop
    ignore: Vec<String>,
}

impl HeaderTransformer {
    /// Create a header transformer with the default ignore list.
    pub fn new() -> Self {
        Self {
            ignore: IGNORE_HEADERS.iter().map(|h| h.to_string()).collect(),
        }
    }

    fn is_ignored(&self, lowercase_name: &str) -> bool {
        self.ignore.iter().any(|h| h == lowercase_name)
    }
}

impl Default for HeaderTransformer {
    fn default() -> Self {
        Self::new()
    }
}

impl Transformer for HeaderTransformer {
    type Output = HeaderParts;

    fn transform(&self, entry: &HarEntry) -> Result<HeaderParts, TransformError> {
        let mut headers = Mapping::new();
        let mut user_agent = None;

        for header in &entry.request.headers {
            let name = header.name.to_lowercase();
            if self.is_ignored(&name) {
                continue;
            }

            if name == USER_AGENT {
                if user_agent.is_none() && !header.value.is_empty() {
                    user_agent = Some(header.value.clone());
                }
                continue;
            }

            headers.insert(header.name.clone(), JsonValue::String(header.value.clone()));
        }

        Ok(HeaderParts {
            headers: (!headers.is_empty()).then_some(headers),
            user_agent,
        })
    }

    fn name(&self) -> &'static str {
        "header_transformer"
    }
}
