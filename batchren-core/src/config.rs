use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::transform::NumberWidth;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub numbering: NumberingConfig,

    #[serde(default)]
    pub remove: RemoveConfig,

    #[serde(default)]
    pub replace: ReplaceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DefaultsConfig {
    /// Default preview format: "table", "summary", "json", or "none"
    #[serde(default = "default_preview")]
    pub preview_format: String,

    /// How many plan entries a preview shows before summarising the rest
    #[serde(default = "default_preview_limit")]
    pub preview_limit: usize,

    /// Whether to use color output by default (None = auto-detect)
    #[serde(default)]
    pub use_color: Option<bool>,

    /// Append executed renames to this file
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// List files whose name starts with a dot
    #[serde(default)]
    pub include_hidden: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            preview_format: default_preview(),
            preview_limit: default_preview_limit(),
            use_color: None,
            log_file: None,
            include_hidden: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NumberingConfig {
    #[serde(default = "default_one")]
    pub start: u64,

    #[serde(default = "default_one")]
    pub step: u64,

    #[serde(default)]
    pub width: NumberWidth,

    #[serde(default = "default_separator")]
    pub separator: String,
}

impl Default for NumberingConfig {
    fn default() -> Self {
        Self {
            start: 1,
            step: 1,
            width: NumberWidth::default(),
            separator: default_separator(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RemoveConfig {
    /// Characters removed by remove-start / remove-end when no count is given
    #[serde(default = "default_remove_count")]
    pub count: usize,
}

impl Default for RemoveConfig {
    fn default() -> Self {
        Self {
            count: default_remove_count(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReplaceConfig {
    #[serde(default = "default_true")]
    pub case_sensitive: bool,
}

impl Default for ReplaceConfig {
    fn default() -> Self {
        Self {
            case_sensitive: true,
        }
    }
}

fn default_preview() -> String {
    "table".to_string()
}

fn default_preview_limit() -> usize {
    10
}

fn default_one() -> u64 {
    1
}

fn default_separator() -> String {
    "_".to_string()
}

fn default_remove_count() -> usize {
    3
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load config from .batchren/config.toml, then the user config directory
    pub fn load() -> Result<Self> {
        if let Ok(cwd) = std::env::current_dir() {
            let config_path = cwd.join(".batchren").join("config.toml");
            if config_path.exists() {
                return Self::load_from_path(&config_path);
            }
        }

        if let Some(config_path) = Self::user_config_path() {
            if config_path.exists() {
                return Self::load_from_path(&config_path);
            }
        }

        // Return default config if no config file exists
        Ok(Self::default())
    }

    /// `<config dir>/batchren/config.toml`, if the platform has a config dir
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("batchren").join("config.toml"))
    }

    /// Load config from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.defaults.preview_format, "table");
        assert_eq!(config.defaults.preview_limit, 10);
        assert_eq!(config.defaults.use_color, None);
        assert!(!config.defaults.include_hidden);
        assert_eq!(config.numbering.start, 1);
        assert_eq!(config.numbering.step, 1);
        assert_eq!(config.numbering.width, NumberWidth::Two);
        assert_eq!(config.numbering.separator, "_");
        assert_eq!(config.remove.count, 3);
        assert!(config.replace.case_sensitive);
    }

    #[test]
    fn test_load_written_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.defaults.preview_format = "summary".to_string();
        config.defaults.use_color = Some(false);
        config.numbering.width = NumberWidth::Four;
        config.numbering.separator = " - ".to_string();
        config.remove.count = 5;

        fs::create_dir_all(config_path.parent().unwrap()).unwrap();
        fs::write(&config_path, toml::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = Config::load_from_path(&config_path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_config() {
        let toml_content = r#"
[numbering]
width = 3
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.numbering.width, NumberWidth::Three);
        // Other fields should have their defaults
        assert_eq!(config.numbering.start, 1);
        assert_eq!(config.numbering.separator, "_");
        assert_eq!(config.defaults.preview_format, "table");
    }

    #[test]
    fn test_invalid_width_is_rejected() {
        let toml_content = r#"
[numbering]
width = 7
"#;

        let result: Result<Config, _> = toml::from_str(toml_content);
        assert!(result.is_err());
    }
}
