//! Configuration types for HAR conversion.

use crate::output::OutputFormat;
use serde::{Deserialize, Serialize};

/// Placeholder name of the generated suite.
pub const DEFAULT_SUITE_NAME: &str = "testset description";

/// Main configuration for a conversion run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Configuration version
    pub version: String,
    /// Suite settings
    pub settings: Settings,
    /// Entry filtering
    pub filter: FilterConfig,
    /// Output rendering
    pub output: OutputConfig,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            version: "1".to_string(),
            settings: Settings::default(),
            filter: FilterConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Suite settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Name written into the suite config block
    pub suite_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            suite_name: DEFAULT_SUITE_NAME.to_string(),
        }
    }
}

/// URL filtering of HAR entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Only convert entries whose URL contains this string
    pub include: Option<String>,
    /// Skip entries whose URL contains any of these `|`-separated strings
    pub exclude: Option<String>,
}

/// Output rendering settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format (derived from the destination if not set)
    pub format: Option<OutputFormat>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConvertConfig::default();
        assert_eq!(config.version, "1");
        assert_eq!(config.settings.suite_name, "testset description");
        assert!(config.filter.include.is_none());
        assert!(config.filter.exclude.is_none());
        assert!(config.output.format.is_none());
    }

    #[test]
    fn test_config_parsing() {
        let yaml = r#"
version: "1"
settings:
  suite_name: "login flow"
filter:
  include: "httprunner"
  exclude: "static|cdn"
output:
  format: yaml
"#;
        let config: ConvertConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.settings.suite_name, "login flow");
        assert_eq!(config.filter.include.as_deref(), Some("httprunner"));
        assert_eq!(config.filter.exclude.as_deref(), Some("static|cdn"));
        assert_eq!(config.output.format, Some(OutputFormat::Yaml));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: ConvertConfig = serde_json::from_str(r#"{"filter": {"exclude": "v2"}}"#).unwrap();
        assert_eq!(config.version, "1");
        assert_eq!(config.settings.suite_name, DEFAULT_SUITE_NAME);
        assert_eq!(config.filter.exclude.as_deref(), Some("v2"));
    }
}
