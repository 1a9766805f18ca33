//! Per-entry transformers.
//!
//! Each transformer reads one HAR entry and returns an independent partial
//! result. The converter composes the parts into a [`TestCase`].
//!
//! [`TestCase`]: crate::testcase::TestCase

mod body;
mod header;
mod url;
mod validate;

pub use body::{x_www_form_urlencoded, BodyTransformer, RequestPayload};
pub use header::{HeaderParts, HeaderTransformer, IGNORE_HEADERS};
pub use url::{UrlParts, UrlTransformer};
pub use validate::ValidateTransformer;

use crate::har::{HarEntry, NameValue};
use crate::testcase::Mapping;

/// Trait for extracting one part of a test case from a HAR entry.
pub trait Transformer {
    /// Partial result produced for a single entry.
    type Output;

    /// Extract this transformer's part from the entry.
    fn transform(&self, entry: &HarEntry) -> Result<Self::Output, TransformError>;

    /// Get the transformer name for debugging.
    fn name(&self) -> &'static str;
}

/// Fatal per-entry conversion errors.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("url missed in request")]
    MissingUrl,

    #[error("invalid url in request: {url}")]
    InvalidUrl {
        url: String,
        #[source]
        source: ::url::ParseError,
    },

    #[error("method missed in request")]
    MissingMethod,

    #[error("invalid JSON request body: {0}")]
    InvalidJsonBody(#[source] serde_json::Error),
}

/// Convert a HAR name/value list to a mapping. Later duplicates win.
pub fn convert_list_to_mapping(items: &[NameValue]) -> Mapping {
    items
        .iter()
        .map(|item| (item.name.clone(), item.value.clone()))
        .collect()
}
