//! HAR (HTTP Archive) input model and log entry loader.
//!
//! Only the subset of the HAR 1.2 format needed to build test cases is
//! modelled. Unknown fields (timings, cookies, cache, ...) are ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::path::{Path, PathBuf};
use tracing::debug;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Root of a HAR document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarFile {
    pub log: HarLog,
}

/// The `log` object. Entries are kept in recorder order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarLog {
    pub entries: Vec<HarEntry>,
}

/// One captured request/response exchange.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HarEntry {
    pub request: HarRequest,
    #[serde(default)]
    pub response: HarResponse,
}

/// Captured request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarRequest {
    /// HTTP method (missing is a fatal conversion error)
    #[serde(default)]
    pub method: Option<String>,
    /// Absolute request URL (missing is a fatal conversion error)
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub query_string: Vec<NameValue>,
    #[serde(default)]
    pub headers: Vec<HarHeader>,
    #[serde(default)]
    pub post_data: Option<PostData>,
}

/// Captured response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HarResponse {
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(default)]
    pub content: Option<HarContent>,
}

/// A request or response header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarHeader {
    pub name: String,
    pub value: String,
}

/// A query string or form parameter.
///
/// Recorders are not consistent about value types, so the value is kept as
/// raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameValue {
    pub name: String,
    #[serde(default)]
    pub value: JsonValue,
}

/// Posted request body. `text` and `params` are mutually exclusive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostData {
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub params: Vec<NameValue>,
    #[serde(default)]
    pub text: Option<String>,
}

/// Response body content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarContent {
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    /// Either absent (plain text) or `base64`
    #[serde(default)]
    pub encoding: Option<String>,
}

/// Errors raised while loading HAR content.
#[derive(Debug, thiserror::Error)]
pub enum HarError {
    #[error("failed to read HAR file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HAR file content is empty")]
    Empty,

    #[error("HAR file content error: {0}")]
    Content(#[from] serde_json::Error),
}

/// Read a HAR file and return its `log.entries` list.
pub fn load_har_log_entries(path: impl AsRef<Path>) -> Result<Vec<HarEntry>, HarError> {
    let path = path.as_ref();
    let content = std::fs::read(path).map_err(|source| HarError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), bytes = content.len(), "Loaded HAR file");

    parse_har_log_entries(&content)
}

/// Decode HAR content and return its `log.entries` list.
///
/// A leading UTF-8 byte order mark is ignored. Content that is not JSON, or
/// that lacks a `log.entries` array, is an error.
pub fn parse_har_log_entries(content: &[u8]) -> Result<Vec<HarEntry>, HarError> {
    let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);

    if content.iter().all(u8::is_ascii_whitespace) {
        return Err(HarError::Empty);
    }

    let har: HarFile = serde_json::from_slice(content)?;

    debug!(entries = har.log.entries.len(), "Decoded HAR log");

    Ok(har.log.entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_HAR: &str = r#"{
        "log": {
            "version": "1.2",
            "creator": {"name": "WebInspector", "version": "537.36"},
            "entries": [
                {
                    "startedDateTime": "2017-08-07T10:18:07.105Z",
                    "time": 83,
                    "request": {
                        "method": "GET",
                        "url": "https://httprunner.top/home?v=1",
                        "httpVersion": "HTTP/1.1",
                        "headers": [{"name": "Host", "value": "httprunner.top"}],
                        "queryString": [{"name": "v", "value": "1"}],
                        "cookies": [],
                        "headersSize": -1,
                        "bodySize": 0
                    },
                    "response": {
                        "status": 200,
                        "statusText": "OK",
                        "headers": [],
                        "content": {"size": 0, "mimeType": "text/html"}
                    },
                    "cache": {},
                    "timings": {"send": 0, "wait": 83, "receive": 0}
                }
            ]
        }
    }"#;

    #[test]
    fn test_parse_entries() {
        let entries = parse_har_log_entries(MINIMAL_HAR.as_bytes()).unwrap();
        assert_eq!(entries.len(), 1);

        let request = &entries[0].request;
        assert_eq!(request.method.as_deref(), Some("GET"));
        assert_eq!(request.url.as_deref(), Some("https://httprunner.top/home?v=1"));
        assert_eq!(request.query_string[0].value, serde_json::json!("1"));
        assert_eq!(request.headers[0].name, "Host");
        assert_eq!(entries[0].response.status, Some(200));
    }

    #[test]
    fn test_parse_with_bom() {
        let mut content = UTF8_BOM.to_vec();
        content.extend_from_slice(MINIMAL_HAR.as_bytes());

        let entries = parse_har_log_entries(&content).unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_empty_content_is_error() {
        assert!(matches!(parse_har_log_entries(b""), Err(HarError::Empty)));
        assert!(matches!(parse_har_log_entries(b"  \n"), Err(HarError::Empty)));
    }

    #[test]
    fn test_missing_log_entries_is_error() {
        assert!(matches!(
            parse_har_log_entries(b"{}"),
            Err(HarError::Content(_))
        ));
        assert!(matches!(
            parse_har_log_entries(br#"{"log": {}}"#),
            Err(HarError::Content(_))
        ));
        assert!(matches!(
            parse_har_log_entries(br#"{"log": {"entries": {}}}"#),
            Err(HarError::Content(_))
        ));
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(matches!(
            parse_har_log_entries(b"not a har file"),
            Err(HarError::Content(_))
        ));
    }

    #[test]
    fn test_numeric_param_values() {
        let content = br#"{"log": {"entries": [{
            "request": {
                "method": "POST",
                "url": "https://httprunner.top/api",
                "postData": {
                    "mimeType": "application/x-www-form-urlencoded",
                    "params": [{"name": "a", "value": 1}, {"name": "b", "value": "2"}]
                }
            },
            "response": {"status": 201}
        }]}}"#;

        let entries = parse_har_log_entries(content).unwrap();
        let post_data = entries[0].request.post_data.as_ref().unwrap();
        assert_eq!(post_data.params[0].value, serde_json::json!(1));
        assert_eq!(post_data.params[1].value, serde_json::json!("2"));
        assert!(entries[0].response.content.is_none());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_har_log_entries("/nonexistent/demo.har").unwrap_err();
        assert!(matches!(err, HarError::Io { .. }));
    }
}
