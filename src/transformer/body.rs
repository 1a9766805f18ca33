//! Request method and body transformer.

use super::{convert_list_to_mapping, TransformError, Transformer};
use crate::har::HarEntry;
use crate::testcase::{Mapping, RequestBody};
use serde_json::Value as JsonValue;
use tracing::trace;

const JSON_MIME_TYPE: &str = "application/json";
const FORM_MIME_TYPE: &str = "application/x-www-form-urlencoded";

/// Method and body part of a test case.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestPayload {
    pub method: String,
    pub body: Option<RequestBody>,
}

/// Extracts the request method and, for `POST` requests, the body.
///
/// The body source is `postData.text` when non-empty, else the
/// `postData.params` list. The `postData.mimeType` prefix selects the output
/// form:
///
/// - `application/json`: parsed JSON under `json`
/// - `application/x-www-form-urlencoded`: `key=value&...` string under `data`
/// - anything else: the source as-is under `data`
#[derive(Debug, Clone, Copy, Default)]
pub struct BodyTransformer;

impl BodyTransformer {
    pub fn new() -> Self {
        Self
    }
}

/// Body source before mime type dispatch.
enum PostBody<'a> {
    Text(&'a str),
    Params(Mapping),
}

impl Transformer for BodyTransformer {
    type Output = RequestPayload;

    fn transform(&self, entry: &HarEntry) -> Result<RequestPayload, TransformError> {
        let method = entry
            .request
            .method
            .as_deref()
            .filter(|m| !m.is_empty())
            .ok_or(TransformError::MissingMethod)?;

        if method != "POST" {
            return Ok(RequestPayload {
                method: method.to_string(),
                body: None,
            });
        }

        let Some(post_data) = entry.request.post_data.as_ref() else {
            trace!("POST request without postData");
            return Ok(RequestPayload {
                method: method.to_string(),
                body: None,
            });
        };

        let post_body = match post_data.text.as_deref() {
            Some(text) if !text.is_empty() => PostBody::Text(text),
            _ if !post_data.params.is_empty() => {
                PostBody::Params(convert_list_to_mapping(&post_data.params))
            }
            _ => {
                trace!("POST request with empty postData");
                return Ok(RequestPayload {
                    method: method.to_string(),
                    body: None,
                });
            }
        };

        let body = match post_data.mime_type.as_deref() {
            Some(mime_type) if mime_type.starts_with(JSON_MIME_TYPE) => {
                RequestBody::Json(match post_body {
                    PostBody::Text(text) => {
                        serde_json::from_str(text).map_err(TransformError::InvalidJsonBody)?
                    }
                    PostBody::Params(params) => JsonValue::Object(params),
                })
            }
            Some(mime_type) if mime_type.starts_with(FORM_MIME_TYPE) => {
                RequestBody::Data(JsonValue::String(match post_body {
                    // Already form encoded by the client
                    PostBody::Text(text) => text.to_string(),
                    PostBody::Params(params) => x_www_form_urlencoded(&params),
                }))
            }
            _ => RequestBody::Data(match post_body {
                PostBody::Text(text) => JsonValue::String(text.to_string()),
                PostBody::Params(params) => JsonValue::Object(params),
            }),
        };

        Ok(RequestPayload {
            method: method.to_string(),
            body: Some(body),
        })
    }

    fn name(&self) -> &'static str {
        "body_transformer"
    }
}

/// Join a mapping as `key=value` pairs separated by `&`.
///
/// No percent-encoding is applied. Pairs follow the mapping's insertion
/// order. String values are written raw, other values as JSON text.
pub fn x_www_form_urlencoded(mapping: &Mapping) -> String {
    mapping
        .iter()
        .map(|(key, value)| match value {
            JsonValue::String(s) => format!("{}={}", key, s),
            other => format!("{}={}", key, other),
        })
        .collect::<Vec<_>>()
        .join("&")
}
