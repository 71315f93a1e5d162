//! Persisted credentials and presentation settings.
//!
//! The configuration lives in a YAML file, `$TCS_CONFIG` when set and
//! `~/.tcs/config.yml` otherwise.
//!
//! # Example YAML
//!
//! ```yaml
//! api_key: 0123456789abcdef
//! color: auto
//! output: table
//! headers:
//!   X-Request-Source: ci
//! ```

use std::collections::BTreeMap;
use std::io::{BufReader, BufWriter, IsTerminal};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CliError, Result};

/// Environment variable overriding the configuration file location.
pub const CONFIG_ENV: &str = "TCS_CONFIG";

const CONFIG_DIR: &str = ".tcs";
const CONFIG_FILE: &str = "config.yml";

/// When listings are colored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color only when stdout is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn enabled(self) -> bool {
        match self {
            ColorMode::Auto => std::io::stdout().is_terminal(),
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// How command results are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Contents of the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// API key sent with every request; empty until `configure` runs.
    pub api_key: String,
    pub color: ColorMode,
    pub output: OutputFormat,
    /// Extra headers sent with every request.
    pub headers: BTreeMap<String, String>,
}

impl CliConfig {
    /// Config holding only an API key.
    pub fn with_api_key(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            ..Self::default()
        }
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](CliError::IoError) if the file cannot be read, or
    /// [`YamlError`](CliError::YamlError) if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Like [`load`](Self::load), but a missing file yields the default
    /// (unconfigured) config.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Saves the configuration as YAML, replacing any existing file and
    /// creating the parent directory when needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    pub fn has_credentials(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

/// Resolves the configuration file location.
pub fn config_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    let home = dirs::home_dir().ok_or(CliError::NoHomeDirectory)?;
    Ok(home.join(CONFIG_DIR).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_complete() {
        let yaml = r#"
api_key: secret
color: never
output: json
headers:
  X-Request-Source: ci
"#;
        let config: CliConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.color, ColorMode::Never);
        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(config.headers["X-Request-Source"], "ci");
    }

    #[test]
    fn test_deserialize_minimal() {
        let config: CliConfig = serde_yaml::from_str("api_key: secret\n").unwrap();
        assert!(config.has_credentials());
        assert_eq!(config.color, ColorMode::Auto);
        assert_eq!(config.output, OutputFormat::Table);
        assert!(config.headers.is_empty());
    }

    #[test]
    fn test_missing_file_is_unconfigured() {
        let dir = tempfile::tempdir().unwrap();
        let config = CliConfig::load_or_default(dir.path().join("absent.yml")).unwrap();
        assert!(!config.has_credentials());
    }

    #[test]
    fn test_save_creates_parent_and_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yml");

        let mut first = CliConfig::with_api_key("first");
        first.color = ColorMode::Always;
        first.save(&path).unwrap();
        CliConfig::with_api_key("second").save(&path).unwrap();

        let loaded = CliConfig::load(&path).unwrap();
        assert_eq!(loaded, CliConfig::with_api_key("second"));
    }

    #[test]
    fn test_color_mode_fixed_values() {
        assert!(ColorMode::Always.enabled());
        assert!(!ColorMode::Never.enabled());
        // Auto depends on terminal, can't reliably test
    }
}
