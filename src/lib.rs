//! Convert HAR (HTTP Archive) logs to test cases for HTTP test runners.
//!
//! Each HAR entry becomes one test case:
//!
//! - URL and query parameters (`params`), named after the URL path
//! - Request headers, minus transport and browser noise
//! - Request body as raw `data` or structured `json`
//! - `validate` assertions: the status code, then every top-level scalar
//!   field of a JSON response body
//!
//! The first User-Agent seen is shared through the suite `config` block.
//! Entries can be selected with an include substring and `|`-separated
//! exclude substrings.
//!
//! ## Example
//!
//! ```no_run
//! use har2case::{HarConverter, ConvertConfig, OutputFormat};
//!
//! let converter = HarConverter::new(ConvertConfig::default())?;
//! let suite = converter.convert_file("demo.har")?;
//! println!("{}", OutputFormat::Yaml.render(&suite)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod context;
pub mod converter;
pub mod har;
pub mod matcher;
pub mod output;
pub mod testcase;
pub mod transformer;

pub use config::ConvertConfig;
pub use context::ConvertContext;
pub use converter::{ConvertError, ConvertedEntry, HarConverter};
pub use har::{load_har_log_entries, parse_har_log_entries, HarEntry, HarError};
pub use output::{OutputError, OutputFormat};
pub use testcase::{Assertion, RequestBody, SuiteConfig, TestCase, TestSuite};
pub use transformer::TransformError;
