//! Test suite document produced by a conversion.
//!
//! The document is an ordered sequence: one `config` block followed by one
//! `test` block per converted HAR entry.
//!
//! ```yaml
//! - config:
//!     name: testset description
//!     variables: []
//!     headers:
//!       User-Agent: iOS/10.3
//! - test:
//!     name: /api/v1/Account/Login
//!     request:
//!       url: https://httprunner.top/api/v1/Account/Login
//!       method: POST
//!       json:
//!         UserName: test001
//!     validate:
//!       - check: status_code
//!         expect: 200
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Insertion-ordered string-keyed mapping used for params, headers and bodies.
pub type Mapping = serde_json::Map<String, JsonValue>;

/// Check target for the response status assertion.
pub const STATUS_CODE_CHECK: &str = "status_code";

/// A complete test suite document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestSuite {
    blocks: Vec<SuiteBlock>,
}

/// A single element of the suite sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SuiteBlock {
    /// `{config: {...}}`
    Config { config: SuiteConfig },
    /// `{test: {...}}`
    Test { test: TestCase },
}

/// Shared suite defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteConfig {
    pub name: String,
    #[serde(default)]
    pub variables: Vec<JsonValue>,
    #[serde(default)]
    pub headers: Mapping,
}

/// One test derived from a HAR entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    /// URL path of the request
    pub name: String,
    pub request: TestRequest,
    /// Status code assertion first, then content assertions
    pub validate: Vec<Assertion>,
}

/// Request specification of a test case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRequest {
    /// URL without its query component when `params` is present
    pub url: String,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Mapping>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Mapping>,
    /// Serialized as either a `data` or a `json` field, never both
    #[serde(flatten)]
    pub body: Option<RequestBody>,
}

/// Request body in one of its two mutually exclusive forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestBody {
    /// Raw text, form-encoded string, or untyped mapping
    Data(JsonValue),
    /// Structured JSON body
    Json(JsonValue),
}

/// A `(check, expect)` pair validated against the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assertion {
    /// `status_code` or `content.<field>`
    pub check: String,
    pub expect: JsonValue,
}

impl TestSuite {
    /// Create a suite from its config block and test cases (in order).
    pub fn new(config: SuiteConfig, tests: Vec<TestCase>) -> Self {
        let mut blocks = Vec::with_capacity(tests.len() + 1);
        blocks.push(SuiteBlock::Config { config });
        blocks.extend(tests.into_iter().map(|test| SuiteBlock::Test { test }));
        Self { blocks }
    }

    /// All blocks in document order.
    pub fn blocks(&self) -> &[SuiteBlock] {
        &self.blocks
    }

    /// The leading config block.
    pub fn config(&self) -> Option<&SuiteConfig> {
        self.blocks.iter().find_map(|block| match block {
            SuiteBlock::Config { config } => Some(config),
            SuiteBlock::Test { .. } => None,
        })
    }

    /// Test cases in document order.
    pub fn tests(&self) -> impl Iterator<Item = &TestCase> {
        self.blocks.iter().filter_map(|block| match block {
            SuiteBlock::Test { test } => Some(test),
            SuiteBlock::Config { .. } => None,
        })
    }
}

impl SuiteConfig {
    /// Build a config block, sharing the captured User-Agent if any.
    pub fn new(name: impl Into<String>, user_agent: Option<&str>) -> Self {
        let mut headers = Mapping::new();
        if let Some(user_agent) = user_agent {
            headers.insert(
                "User-Agent".to_string(),
                JsonValue::String(user_agent.to_string()),
            );
        }

        Self {
            name: name.into(),
            variables: vec![],
            headers,
        }
    }
}

impl Assertion {
    pub fn new(check: impl Into<String>, expect: JsonValue) -> Self {
        Self {
            check: check.into(),
            expect,
        }
    }

    /// Assert the response status code.
    pub fn status_code(status: Option<i64>) -> Self {
        Self::new(STATUS_CODE_CHECK, status.map(JsonValue::from).unwrap_or_default())
    }

    /// Assert a top-level field of the JSON response body.
    pub fn content(field: &str, expect: JsonValue) -> Self {
        Self::new(format!("content.{}", field), expect)
    }
}
