//! Rendering and writing of test suite documents.

use crate::testcase::TestSuite;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Supported output formats. Both carry the same content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl OutputFormat {
    /// Derive the format from a destination file extension.
    pub fn from_path(path: &Path) -> Result<Self, OutputError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("yml") | Some("yaml") => Ok(Self::Yaml),
            _ => Err(OutputError::UnsupportedExtension(path.to_path_buf())),
        }
    }

    /// File extension used for derived destinations.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yml",
        }
    }

    /// Render a test suite document.
    pub fn render(self, suite: &TestSuite) -> Result<String, OutputError> {
        match self {
            Self::Json => {
                let mut rendered = serde_json::to_string_pretty(suite)?;
                rendered.push('\n');
                Ok(rendered)
            }
            Self::Yaml => Ok(serde_yaml::to_string(suite)?),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        };
        write!(f, "{label}")
    }
}

/// Destination derived from the HAR source path: same stem, format extension.
pub fn default_destination(source: &Path, format: OutputFormat) -> PathBuf {
    source.with_extension(format.extension())
}

/// Render the whole suite, then write it to `path`.
///
/// Nothing is written if rendering fails.
pub fn write_testsuite(
    suite: &TestSuite,
    path: &Path,
    format: OutputFormat,
) -> Result<(), OutputError> {
    let rendered = format.render(suite)?;

    debug!(path = %path.display(), %format, bytes = rendered.len(), "Writing test suite");

    std::fs::write(path, rendered).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Output errors.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("unsupported output file extension: {}", .0.display())]
    UnsupportedExtension(PathBuf),

    #[error("JSON render error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML render error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
