//! Configuration management

use crate::view::errors::{Result, ViewError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Log level used when `RUST_LOG` is not set
    pub log_level: String,
    /// Let later definitions replace earlier ones with the same id
    pub allow_duplicates: bool,
    /// Scan definition directories recursively
    pub recursive: bool,
    /// Glob patterns for directories skipped during recursive scans
    pub exclude: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            allow_duplicates: false,
            recursive: false,
            exclude: Vec::new(),
        }
    }
}

impl Config {
    /// Loads configuration from a YAML file. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Io`] if the file cannot be read and
    /// [`ViewError::Parse`] if it is not valid YAML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
            .map_err(|e| ViewError::Parse(format!("{}: {e}", path.display())))
    }

    /// Parses configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Parse`] if the text is not valid YAML.
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.log_level, "info");
        assert!(!config.allow_duplicates);
        assert!(config.exclude.is_empty());
    }

    #[test]
    fn test_config_partial_yaml() {
        let config = Config::from_yaml("allow-duplicates: true\nexclude: [old*]\n").unwrap();
        assert!(config.allow_duplicates);
        assert_eq!(config.exclude, vec!["old*".to_string()]);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_config_empty_file() {
        assert_eq!(Config::from_yaml("").unwrap(), Config::default());
    }

    #[test]
    fn test_config_invalid() {
        assert!(matches!(
            Config::from_yaml("log-level: [a"),
            Err(ViewError::Parse(_))
        ));
    }

    #[test]
    fn test_config_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("views.yaml");
        std::fs::write(&path, "log-level: debug\n").unwrap();
        assert_eq!(Config::load(&path).unwrap().log_level, "debug");
    }
}
