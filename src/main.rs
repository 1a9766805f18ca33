//! har2case CLI entry point.
//!
//! Converts a HAR file to a YAML or JSON test suite.

use anyhow::{bail, Context, Result};
use clap::Parser;
use har2case::output::{default_destination, write_testsuite};
use har2case::{ConvertConfig, HarConverter, OutputFormat};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "har2case")]
#[command(
    author,
    version,
    about = "Convert HAR (HTTP Archive) to YAML/JSON test cases"
)]
struct Args {
    /// HAR source file
    har_source_file: Option<PathBuf>,

    /// Output file path (.json, .yml or .yaml).
    /// Defaults to the source path with the output format extension.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Convert to YAML format
    #[arg(short = 'y', long = "to-yaml", visible_alias = "to-yml")]
    to_yaml: bool,

    /// Convert to JSON format (default)
    #[arg(long, conflicts_with = "to_yaml")]
    to_json: bool,

    /// Only convert entries whose URL includes this string
    #[arg(long)]
    filter: Option<String>,

    /// Skip entries whose URL includes this string; join multiple with '|'
    #[arg(long)]
    exclude: Option<String>,

    /// Configuration file path (YAML or JSON)
    #[arg(short, long, env = "HAR2CASE_CONFIG")]
    config: Option<PathBuf>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Print example configuration and exit.
    #[arg(long)]
    example_config: bool,
}

impl Args {
    /// Format requested on the command line, if any.
    fn format_flag(&self) -> Option<OutputFormat> {
        if self.to_yaml {
            Some(OutputFormat::Yaml)
        } else if self.to_json {
            Some(OutputFormat::Json)
        } else {
            None
        }
    }
}

fn print_example_config() {
    let example = r#"# har2case Configuration Example
version: "1"

settings:
  # Name written into the suite config block
  suite_name: "testset description"

filter:
  # Only convert entries whose URL contains this string
  include: "httprunner.top"
  # Skip entries whose URL contains any of these strings
  exclude: ".js|.css|.png"

output:
  # json or yaml (derived from the output extension if omitted)
  format: yaml
"#;
    println!("{}", example);
}

fn load_config(path: &Path) -> Result<ConvertConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config = if path
        .extension()
        .is_some_and(|e| e == "yaml" || e == "yml")
    {
        serde_yaml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };

    Ok(config)
}

/// Resolve output format and destination.
///
/// An explicit destination must carry a supported extension, and a format
/// flag must agree with it. Without a destination, the flag wins over the
/// configured format.
fn resolve_output(
    source: &Path,
    output: Option<&Path>,
    flag: Option<OutputFormat>,
    configured: Option<OutputFormat>,
) -> Result<(PathBuf, OutputFormat)> {
    match output {
        Some(path) => {
            let format = OutputFormat::from_path(path)?;
            if let Some(flag) = flag.filter(|f| *f != format) {
                bail!(
                    "{} output requested but {} has a {} extension",
                    flag,
                    path.display(),
                    format
                );
            }
            Ok((path.to_path_buf(), format))
        }
        None => {
            let format = flag.or(configured).unwrap_or_default();
            Ok((default_destination(source, format), format))
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    if args.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();
    }

    if args.example_config {
        print_example_config();
        return Ok(());
    }

    // Load configuration
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ConvertConfig::default(),
    };

    // Override filters from CLI
    if let Some(include) = &args.filter {
        config.filter.include = Some(include.clone());
    }
    if let Some(exclude) = &args.exclude {
        config.filter.exclude = Some(exclude.clone());
    }

    let source = match &args.har_source_file {
        Some(path) if path.extension().is_some_and(|e| e == "har") => path.clone(),
        _ => bail!("HAR file not specified."),
    };

    let (destination, format) = resolve_output(
        &source,
        args.output.as_deref(),
        args.format_flag(),
        config.output.format,
    )?;

    let converter = HarConverter::new(config)?;

    info!(source = %source.display(), "Extract info from HAR file and prepare for testcase");

    let suite = converter
        .convert_file(&source)
        .with_context(|| format!("Failed to convert HAR file: {}", source.display()))?;

    write_testsuite(&suite, &destination, format)?;

    info!(
        destination = %destination.display(),
        %format,
        testcases = suite.tests().count(),
        "Generate {} testset successfully",
        format
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from(["har2case", "demo.har", "-y", "--filter", "httprunner"]);
        assert_eq!(args.har_source_file, Some(PathBuf::from("demo.har")));
        assert_eq!(args.format_flag(), Some(OutputFormat::Yaml));
        assert_eq!(args.filter.as_deref(), Some("httprunner"));
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_format_flags_conflict() {
        assert!(Args::try_parse_from(["har2case", "demo.har", "--to-yaml", "--to-json"]).is_err());
    }

    #[test]
    fn test_resolve_default_output() {
        let (dest, format) = resolve_output(Path::new("demo.har"), None, None, None).unwrap();
        assert_eq!(dest, PathBuf::from("demo.json"));
        assert_eq!(format, OutputFormat::Json);

        let (dest, format) =
            resolve_output(Path::new("demo.har"), None, None, Some(OutputFormat::Yaml)).unwrap();
        assert_eq!(dest, PathBuf::from("demo.yml"));
        assert_eq!(format, OutputFormat::Yaml);
    }

    #[test]
    fn test_resolve_explicit_output() {
        let (dest, format) =
            resolve_output(Path::new("demo.har"), Some(Path::new("out.yaml")), None, None)
                .unwrap();
        assert_eq!(dest, PathBuf::from("out.yaml"));
        assert_eq!(format, OutputFormat::Yaml);

        let (_, format) = resolve_output(
            Path::new("demo.har"),
            Some(Path::new("out.json")),
            Some(OutputFormat::Json),
            Some(OutputFormat::Yaml),
        )
        .unwrap();
        assert_eq!(format, OutputFormat::Json);

        assert!(resolve_output(Path::new("demo.har"), Some(Path::new("out.txt")), None, None)
            .is_err());
    }

    #[test]
    fn test_format_flag_conflicting_with_extension() {
        let err = resolve_output(
            Path::new("demo.har"),
            Some(Path::new("out.yaml")),
            Some(OutputFormat::Json),
            None,
        )
        .unwrap_err();
        assert!(err.to_string().contains("out.yaml"));

        assert!(resolve_output(
            Path::new("demo.har"),
            Some(Path::new("out.json")),
            Some(OutputFormat::Yaml),
            None,
        )
        .is_err());
    }
}
