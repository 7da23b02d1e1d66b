//! TOML configuration file parsing

use super::*;
use crate::config::cli::Cli;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML configuration from string
pub fn parse_toml_string(contents: &str) -> Result<Config> {
    let config: Config = ::toml::from_str(contents)
        .context("Failed to parse TOML configuration")?;

    Ok(config)
}

/// Merge CLI arguments with TOML configuration (CLI takes precedence)
pub fn merge_cli_with_config(cli: &Cli, mut config: Config) -> Config {
    config.total_bits = cli.total_bits;

    if let Some(records) = cli.records {
        config.generator.records = records;
    }
    if let Some(max_attempts) = cli.max_attempts {
        config.generator.max_attempts = max_attempts;
    }
    if let Some(seed) = cli.seed {
        config.generator.seed = Some(seed);
    }

    if let Some(ref path) = cli.output {
        config.output.path = Some(path.clone());
    }
    if let Some(format) = cli.format {
        config.output.format = format.into();
    }
    if let Some(ref path) = cli.summary_json {
        config.output.summary_json = Some(path.clone());
    }

    config
}

/// Build the effective configuration from CLI arguments and optional file
pub fn load_config(cli: &Cli) -> Result<Config> {
    let base = match cli.config {
        Some(ref path) => parse_toml_file(path)?,
        None => Config::default(),
    };

    Ok(merge_cli_with_config(cli, base))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_parse_toml_empty() {
        let config = parse_toml_string("").unwrap();
        assert_eq!(config.generator, GeneratorConfig::default());
        assert_eq!(config.bounds, BoundsRatios::default());
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_parse_toml_basic() {
        let toml_str = r#"
[generator]
records = 50
seed = 7

[bounds]
mbu2_max_pct = 20

[output]
format = "json"
summary_json = "summary.json"
"#;

        let config = parse_toml_string(toml_str).unwrap();
        assert_eq!(config.generator.records, 50);
        assert_eq!(config.generator.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert_eq!(config.generator.seed, Some(7));
        assert_eq!(config.bounds.mbu2_min_pct, 2);
        assert_eq!(config.bounds.mbu2_max_pct, 20);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.output.summary_json, Some(PathBuf::from("summary.json")));
    }

    #[test]
    fn test_parse_toml_rejects_unknown_format() {
        assert!(parse_toml_string("[output]\nformat = \"xml\"\n").is_err());
    }

    #[test]
    fn test_merge_cli_overrides_file() {
        let file = parse_toml_string("[generator]\nrecords = 50\nseed = 7\n").unwrap();
        let args = ["flipgen", "300", "--records", "5", "--format", "json"];
        let cli = Cli::try_parse_from(args).unwrap();

        let config = merge_cli_with_config(&cli, file);
        assert_eq!(config.total_bits, 300);
        assert_eq!(config.generator.records, 5);
        assert!(config.generator.seed.is_some());
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.output_path(), PathBuf::from("error_counts_300.jsonl"));
    }

    #[test]
    fn test_load_config_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("flipgen.toml");
        fs::write(&path, "[generator]\nmax_attempts = 3\n").unwrap();

        let args = ["flipgen", "100", "--config", path.to_str().unwrap()];
        let cli = Cli::try_parse_from(args).unwrap();
        let config = load_config(&cli).unwrap();
        assert_eq!(config.total_bits, 100);
        assert_eq!(config.generator.max_attempts, 3);
        assert_eq!(config.generator.records, 1000);
    }

    #[test]
    fn test_load_config_missing_file() {
        let args = ["flipgen", "100", "--config", "/nonexistent/flipgen.toml"];
        let cli = Cli::try_parse_from(args).unwrap();
        let err = load_config(&cli).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read config file"));
    }
}
