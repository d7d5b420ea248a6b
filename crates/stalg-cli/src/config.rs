//! `stalg.toml` loading.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::cli::{Cli, ColorMode, Entry, OutputFormat};

pub const CONFIG_FILES: &[&str] = &["stalg.toml", ".stalg.toml"];

const DEFAULT_INCLUDE: &str = "**/*.st";
const DEFAULT_MAX_PER_FILE: usize = 50;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read {}: {error}", .path.display())]
    Read { path: PathBuf, error: std::io::Error },
    #[error("invalid config {}: {error}", .path.display())]
    Parse { path: PathBuf, error: toml::de::Error },
}

/// Settings read from the config file. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub parse: ParseSection,
    pub diagnostics: DiagnosticsSection,
    pub output: OutputSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParseSection {
    pub entry: Entry,
    /// Glob patterns checked when no paths are given.
    pub include: Vec<String>,
}

impl Default for ParseSection {
    fn default() -> Self {
        Self {
            entry: Entry::default(),
            include: vec![DEFAULT_INCLUDE.to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiagnosticsSection {
    /// Diagnostics printed per file; the rest are counted only.
    pub max_per_file: usize,
}

impl Default for DiagnosticsSection {
    fn default() -> Self {
        Self {
            max_per_file: DEFAULT_MAX_PER_FILE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSection {
    pub format: OutputFormat,
    pub color: ColorMode,
}

impl Config {
    /// Loads `explicit` if given, otherwise the first config file found in
    /// `root`. No config file means defaults.
    pub fn load(explicit: Option<&Path>, root: &Path) -> Result<(Self, Option<PathBuf>), ConfigError> {
        let path = match explicit {
            Some(path) if !path.is_file() => return Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => path.to_path_buf(),
            None => match find_config_file(root) {
                Some(path) => path,
                None => {
                    tracing::debug!(root = %root.display(), "no config file, using defaults");
                    return Ok((Self::default(), None));
                }
            },
        };

        let config = Self::from_path(&path)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok((config, Some(path)))
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|error| ConfigError::Read {
            path: path.to_path_buf(),
            error,
        })?;
        Self::from_toml(&text).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

/// The config file with command-line flags applied on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub entry: Entry,
    pub include: Vec<String>,
    pub max_per_file: usize,
    pub format: OutputFormat,
    pub color: ColorMode,
}

impl Settings {
    pub fn resolve(config: Config, cli: &Cli) -> Self {
        Self {
            entry: cli.entry.unwrap_or(config.parse.entry),
            include: config.parse.include,
            max_per_file: config.diagnostics.max_per_file,
            format: cli.format.unwrap_or(config.output.format),
            color: cli.color.unwrap_or(config.output.color),
        }
    }
}

fn find_config_file(root: &Path) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir(prefix: &str) -> PathBuf {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("{prefix}-{}-{stamp}", std::process::id()));
        fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.parse.entry, Entry::Source);
        assert_eq!(config.parse.include, vec!["**/*.st".to_string()]);
        assert_eq!(config.diagnostics.max_per_file, 50);
        assert_eq!(config.output.format, OutputFormat::Text);
        assert_eq!(config.output.color, ColorMode::Auto);
    }

    #[test]
    fn test_full_file() {
        let config = Config::from_toml(
            r#"
[parse]
entry = "method"
include = ["methods/**/*.st", "*.ST"]

[diagnostics]
max_per_file = 5

[output]
format = "json"
color = "never"
"#,
        )
        .unwrap();

        assert_eq!(config.parse.entry, Entry::Method);
        assert_eq!(config.parse.include.len(), 2);
        assert_eq!(config.diagnostics.max_per_file, 5);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.output.color, ColorMode::Never);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = Config::from_toml("[parse]\nentry = \"statements\"\n").unwrap();
        assert_eq!(config.parse.entry, Entry::Statements);
        assert_eq!(config.parse.include, vec!["**/*.st".to_string()]);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(Config::from_toml("[parse]\nentry = \"source\"\nstrict = true\n").is_err());
        assert!(Config::from_toml("[lint]\nlevel = 1\n").is_err());
    }

    #[test]
    fn test_unknown_values_are_rejected() {
        assert!(Config::from_toml("[parse]\nentry = \"program\"\n").is_err());
        assert!(Config::from_toml("[output]\nformat = \"xml\"\n").is_err());
    }

    #[test]
    fn test_flags_override_file() {
        use clap::Parser;

        let config = Config::from_toml("[parse]\nentry = \"method\"\n[output]\ncolor = \"never\"\n").unwrap();
        let cli = Cli::try_parse_from(["stalg", "check", "--entry", "algorithm"]).unwrap();
        let settings = Settings::resolve(config.clone(), &cli);
        assert_eq!(settings.entry, Entry::Algorithm);
        assert_eq!(settings.color, ColorMode::Never);
        assert_eq!(settings.format, OutputFormat::Text);

        let cli = Cli::try_parse_from(["stalg", "check"]).unwrap();
        assert_eq!(Settings::resolve(config, &cli).entry, Entry::Method);
    }

    #[test]
    fn test_discovers_config_in_root() {
        let root = temp_dir("stalg-config");
        let (config, path) = Config::load(None, &root).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.is_none());

        fs::write(root.join(".stalg.toml"), "[diagnostics]\nmax_per_file = 3\n").unwrap();
        let (config, path) = Config::load(None, &root).unwrap();
        assert_eq!(config.diagnostics.max_per_file, 3);
        assert_eq!(path, Some(root.join(".stalg.toml")));

        fs::write(root.join("stalg.toml"), "[diagnostics]\nmax_per_file = 7\n").unwrap();
        let (config, _) = Config::load(None, &root).unwrap();
        assert_eq!(config.diagnostics.max_per_file, 7);

        fs::remove_dir_all(root).ok();
    }

    #[test]
    fn test_explicit_path_errors() {
        let root = temp_dir("stalg-config-explicit");
        let missing = root.join("nope.toml");
        let err = Config::load(Some(&missing), &root).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));

        let broken = root.join("broken.toml");
        fs::write(&broken, "[parse\n").unwrap();
        let err = Config::load(Some(&broken), &root).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().starts_with("invalid config "));

        fs::remove_dir_all(root).ok();
    }
}
