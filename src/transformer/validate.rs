//! Response assertion transformer.

use super::{TransformError, Transformer};
use crate::har::{HarContent, HarEntry};
use crate::testcase::Assertion;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::Value as JsonValue;
use tracing::{debug, warn};

const JSON_MIME_TYPE: &str = "application/json";
const BASE64_ENCODING: &str = "base64";

/// Builds the `validate` list of a test case.
///
/// The status code assertion always comes first. For JSON responses, every
/// top-level scalar field of the body adds a `content.<field>` assertion in
/// body key order; nested objects and arrays are skipped.
///
/// Response content that is missing, empty, undecodable or not JSON only
/// results in no content assertions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateTransformer;

impl ValidateTransformer {
    pub fn new() -> Self {
        Self
    }
}

impl Transformer for ValidateTransformer {
    type Output = Vec<Assertion>;

    fn transform(&self, entry: &HarEntry) -> Result<Vec<Assertion>, TransformError> {
        let mut validate = vec![Assertion::status_code(entry.response.status)];

        let Some(body) = entry.response.content.as_ref().and_then(decode_json_content) else {
            return Ok(validate);
        };

        let JsonValue::Object(fields) = body else {
            debug!("JSON response body is not an object, no content assertions");
            return Ok(validate);
        };

        validate.extend(
            fields
                .into_iter()
                .filter(|(_, value)| !matches!(value, JsonValue::Object(_) | JsonValue::Array(_)))
                .map(|(key, value)| Assertion::content(&key, value)),
        );

        Ok(validate)
    }

    fn name(&self) -> &'static str {
        "validate_transformer"
    }
}

/// Decode a JSON response body, returning `None` when it is not usable.
fn decode_json_content(content: &HarContent) -> Option<JsonValue> {
    let mime_type = content.mime_type.as_deref()?;
    if !mime_type.starts_with(JSON_MIME_TYPE) {
        return None;
    }

    let text = content.text.as_deref().filter(|t| !t.is_empty())?;

    let decoded = if content.encoding.as_deref() == Some(BASE64_ENCODING) {
        let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        match STANDARD.decode(compact) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = %e, "Failed to decode response content from base64");
                return None;
            }
        }
    } else {
        text.as_bytes().to_vec()
    };

    match serde_json::from_slice(&decoded) {
        Ok(json) => Some(json),
        Err(e) => {
            warn!(error = %e, mime_type, "Response content declared as JSON is not valid JSON");
            None
        }
    }
}
