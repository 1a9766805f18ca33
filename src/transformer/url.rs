//! Request URL and query parameter transformer.

use super::{convert_list_to_mapping, TransformError, Transformer};
use crate::har::HarEntry;
use crate::testcase::Mapping;
use url::Url;

/// URL part of a test case.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlParts {
    /// Test case name (the URL path)
    pub name: String,
    /// Request URL, without query component if `params` is present
    pub url: String,
    /// Query parameters from the HAR `queryString` list
    pub params: Option<Mapping>,
}

/// Splits the HAR request URL into base URL and query parameters.
///
/// When the entry has query parameters, the query component is stripped from
/// the URL and the parameters are emitted separately. Otherwise the URL is
/// kept verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlTransformer;

impl UrlTransformer {
    pub fn new() -> Self {
        Self
    }
}

impl Transformer for UrlTransformer {
    type Output = UrlParts;

    fn transform(&self, entry: &HarEntry) -> Result<UrlParts, TransformError> {
        let raw = entry
            .request
            .url
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or(TransformError::MissingUrl)?;

        let parsed = Url::parse(raw).map_err(|source| TransformError::InvalidUrl {
            url: raw.to_string(),
            source,
        })?;

        let request_params = convert_list_to_mapping(&entry.request.query_string);

        let (url, params) = if request_params.is_empty() {
            (raw.to_string(), None)
        } else {
            (without_query(&parsed), Some(request_params))
        };

        Ok(UrlParts {
            name: parsed.path().to_string(),
            url,
            params,
        })
    }

    fn name(&self) -> &'static str {
        "url_transformer"
    }
}

/// Serialize the URL with its query component removed. An empty fragment is
/// dropped as well.
fn without_query(url: &Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    if url.fragment() == Some("") {
        url.set_fragment(None);
    }
    url.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::har::{HarRequest, NameValue};
    use serde_json::json;

    fn make_entry(url: Option<&str>, query: &[(&str, &str)]) -> HarEntry {
        HarEntry {
            request: HarRequest {
                method: Some("GET".to_string()),
                url: url.map(|u| u.to_string()),
                query_string: query
                    .iter()
                    .map(|(name, value)| NameValue {
                        name: name.to_string(),
                        value: json!(value),
                    })
                    .collect(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_url_with_params() {
        let entry = make_entry(
            Some("https://httprunner.top/home?v=1&w=2"),
            &[("v", "1"), ("w", "2")],
        );
        let parts = UrlTransformer::new().transform(&entry).unwrap();

        assert_eq!(parts.url, "https://httprunner.top/home");
        assert_eq!(parts.name, "/home");
        assert_eq!(
            parts.params.unwrap(),
            json!({"v": "1", "w": "2"}).as_object().unwrap().clone()
        );
    }

    #[test]
    fn test_url_without_params_is_verbatim() {
        let entry = make_entry(Some("https://httprunner.top/api/v1/Account/Login"), &[]);
        let parts = UrlTransformer::new().transform(&entry).unwrap();

        assert_eq!(parts.url, "https://httprunner.top/api/v1/Account/Login");
        assert_eq!(parts.name, "/api/v1/Account/Login");
        assert!(parts.params.is_none());
    }

    #[test]
    fn test_query_in_url_but_empty_query_string() {
        let entry = make_entry(Some("https://httprunner.top/home?"), &[]);
        let parts = UrlTransformer::new().transform(&entry).unwrap();

        assert_eq!(parts.url, "https://httprunner.top/home?");
        assert_eq!(parts.name, "/home");
        assert!(parts.params.is_none());
    }

    #[test]
    fn test_duplicate_params_last_wins() {
        let entry = make_entry(
            Some("https://httprunner.top/search?q=a&q=b"),
            &[("q", "a"), ("q", "b")],
        );
        let parts = UrlTransformer::new().transform(&entry).unwrap();

        let params = parts.params.unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params["q"], json!("b"));
    }

    #[test]
    fn test_fragment_preserved() {
        let entry = make_entry(Some("https://httprunner.top/docs?page=2#intro"), &[("page", "2")]);
        let parts = UrlTransformer::new().transform(&entry).unwrap();

        assert_eq!(parts.url, "https://httprunner.top/docs#intro");
        assert_eq!(parts.name, "/docs");
    }

    #[test]
    fn test_url_without_path() {
        let entry = make_entry(Some("https://httprunner.top?v=1"), &[("v", "1")]);
        let parts = UrlTransformer::new().transform(&entry).unwrap();

        assert_eq!(parts.url, "https://httprunner.top/");
        assert_eq!(parts.name, "/");
    }

    #[test]
    fn test_empty_fragment_dropped() {
        let entry = make_entry(Some("http://host:8080/a/b?x=1#"), &[("x", "1")]);
        let parts = UrlTransformer::new().transform(&entry).unwrap();

        assert_eq!(parts.url, "http://host:8080/a/b");
        assert_eq!(parts.name, "/a/b");
    }

    #[test]
    fn test_missing_url() {
        let entry = make_entry(None, &[]);
        let err = UrlTransformer::new().transform(&entry).unwrap_err();
        assert!(matches!(err, TransformError::MissingUrl));

        let entry = make_entry(Some(""), &[]);
        let err = UrlTransformer::new().transform(&entry).unwrap_err();
        assert!(matches!(err, TransformError::MissingUrl));
    }

    #[test]
    fn test_relative_url_is_invalid() {
        let entry = make_entry(Some("/relative/path?x=1"), &[("x", "1")]);
        let err = UrlTransformer::new().transform(&entry).unwrap_err();
        assert!(matches!(err, TransformError::InvalidUrl { .. }));
        assert!(err.to_string().contains("/relative/path?x=1"));
    }
}
