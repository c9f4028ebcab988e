pub mod defaults;

use crate::cli::OutputFormat;
use crate::error::{CliError, Result};
use defaults::DefaultsConfig;
use serde::Deserialize;
use srw_native::core::io::config::{ExportConfig, ExportConfigBuilder};
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialOutputConfig {
    format: Option<OutputFormat>,
    precision: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialExportConfig {
    delimiter: Option<char>,
    #[serde(rename = "include-header")]
    include_header: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialCliConfig {
    output: Option<PartialOutputConfig>,
    export: Option<PartialExportConfig>,
}

/// Values given directly on the command line; these win over the config file.
#[derive(Debug, Default, Clone, Copy)]
pub struct CliOverrides {
    pub format: Option<OutputFormat>,
    pub precision: Option<usize>,
    pub delimiter: Option<char>,
    pub include_header: Option<bool>,
}

/// Fully resolved settings for one command invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub format: OutputFormat,
    pub precision: Option<usize>,
    pub export: ExportConfig,
}

impl PartialCliConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Reads the config file when one is given, then applies `--set` overrides.
    pub fn load(path: Option<&Path>, set_values: &[String]) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_set_values(set_values)?;
        Ok(config)
    }

    pub fn resolve(&self, overrides: CliOverrides) -> Result<Settings> {
        let defaults = DefaultsConfig::default();
        let output = self.output.as_ref();
        let export = self.export.as_ref();

        let format = overrides
            .format
            .or(output.and_then(|o| o.format))
            .unwrap_or(defaults.format);
        let precision = overrides
            .precision
            .or(output.and_then(|o| o.precision))
            .or(defaults.precision);
        let delimiter = overrides
            .delimiter
            .or(export.and_then(|e| e.delimiter))
            .unwrap_or(defaults.delimiter);
        let include_header = overrides
            .include_header
            .or(export.and_then(|e| e.include_header))
            .unwrap_or(defaults.include_header);

        let mut builder = ExportConfigBuilder::new()
            .delimiter(delimiter)
            .include_header(include_header);
        if let Some(digits) = precision {
            builder = builder.precision(digits);
        }

        let settings = Settings {
            format,
            precision,
            export: builder.build()?,
        };
        debug!("Resolved settings: {:?}", settings);
        Ok(settings)
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };

            match key {
                "output.format" => {
                    let format = match value_str {
                        "text" => OutputFormat::Text,
                        "json" => OutputFormat::Json,
                        _ => {
                            return Err(CliError::Config(format!(
                                "Invalid format value for {}: {} (expected 'text' or 'json')",
                                key, value_str
                            )));
                        }
                    };
                    self.output.get_or_insert_with(Default::default).format = Some(format);
                }
                "output.precision" => {
                    self.output.get_or_insert_with(Default::default).precision =
                        Some(value_str.parse().map_err(|_| {
                            CliError::Config(format!(
                                "Invalid integer value for {}: {}",
                                key, value_str
                            ))
                        })?);
                }
                "export.delimiter" => {
                    self.export.get_or_insert_with(Default::default).delimiter =
                        Some(parse_delimiter(value_str).ok_or_else(|| {
                            CliError::Config(format!(
                                "Invalid delimiter for {}: '{}' (expected a single character)",
                                key, value_str
                            ))
                        })?);
                }
                "export.include-header" => {
                    self.export.get_or_insert_with(Default::default).include_header =
                        Some(value_str.parse().map_err(|_| {
                            CliError::Config(format!(
                                "Invalid boolean value for {}: {}",
                                key, value_str
                            ))
                        })?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

fn parse_delimiter(value: &str) -> Option<char> {
    if value == "\\t" {
        return Some('\t');
    }
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::{TempDir, tempdir};

    fn write_config_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let file_path = dir.path().join(name);
        fs::write(&file_path, content).unwrap();
        file_path
    }

    fn set(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_apply_without_config_file() {
        let settings = PartialCliConfig::load(None, &[])
            .unwrap()
            .resolve(CliOverrides::default())
            .unwrap();
        assert_eq!(settings.format, OutputFormat::Text);
        assert_eq!(settings.precision, None);
        assert_eq!(settings.export.delimiter, b',');
        assert!(settings.export.include_header);
    }

    #[test]
    fn load_from_file_and_merge_with_defaults() {
        let dir = tempdir().unwrap();
        let path = write_config_file(
            &dir,
            "srw.toml",
            r#"
            [output]
            format = "json"

            [export]
            delimiter = ";"
            "#,
        );

        let settings = PartialCliConfig::load(Some(path.as_path()), &[])
            .unwrap()
            .resolve(CliOverrides::default())
            .unwrap();
        assert_eq!(settings.format, OutputFormat::Json);
        assert_eq!(settings.export.delimiter, b';');
        assert!(settings.export.include_header);
        assert_eq!(settings.precision, None);
    }

    #[test]
    fn cli_args_override_file_values() {
        let dir = tempdir().unwrap();
        let path = write_config_file(
            &dir,
            "srw.toml",
            r#"
            [output]
            format = "json"
            precision = 8

            [export]
            include-header = true
            "#,
        );

        let overrides = CliOverrides {
            format: Some(OutputFormat::Text),
            precision: Some(2),
            delimiter: Some('\t'),
            include_header: Some(false),
        };
        let settings = PartialCliConfig::load(Some(path.as_path()), &[])
            .unwrap()
            .resolve(overrides)
            .unwrap();
        assert_eq!(settings.format, OutputFormat::Text);
        assert_eq!(settings.precision, Some(2));
        assert_eq!(settings.export.precision, Some(2));
        assert_eq!(settings.export.delimiter, b'\t');
        assert!(!settings.export.include_header);
    }

    #[test]
    fn set_value_overrides_file_and_defaults() {
        let dir = tempdir().unwrap();
        let path = write_config_file(&dir, "srw.toml", "[output]\nprecision = 8\n");

        let settings = PartialCliConfig::load(
            Some(path.as_path()),
            &set(&[
                "output.precision=3",
                "output.format=json",
                "export.delimiter=\\t",
                "export.include-header=false",
            ]),
        )
        .unwrap()
        .resolve(CliOverrides::default())
        .unwrap();
        assert_eq!(settings.precision, Some(3));
        assert_eq!(settings.format, OutputFormat::Json);
        assert_eq!(settings.export.delimiter, b'\t');
        assert!(!settings.export.include_header);
    }

    #[test]
    fn unknown_set_key_is_rejected() {
        let result = PartialCliConfig::load(None, &set(&["output.colour=red"]));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn malformed_set_value_is_rejected() {
        assert!(matches!(
            PartialCliConfig::load(None, &set(&["output.precision"])),
            Err(CliError::Config(_))
        ));
        assert!(matches!(
            PartialCliConfig::load(None, &set(&["output.precision=many"])),
            Err(CliError::Config(_))
        ));
        assert!(matches!(
            PartialCliConfig::load(None, &set(&["export.delimiter=;;"])),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn unknown_fields_in_file_fail_to_parse() {
        let dir = tempdir().unwrap();
        let path = write_config_file(&dir, "bad.toml", "[output]\ncolour = \"red\"\n");
        let result = PartialCliConfig::from_file(&path);
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn missing_config_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let result = PartialCliConfig::from_file(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(CliError::Io(_))));
    }

    #[test]
    fn non_ascii_delimiter_surfaces_export_config_error() {
        let result = PartialCliConfig::default().resolve(CliOverrides {
            delimiter: Some('¦'),
            ..Default::default()
        });
        assert!(matches!(result, Err(CliError::ExportConfig(_))));
    }
}
