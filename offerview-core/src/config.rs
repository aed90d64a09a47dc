//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/offerview/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/offerview/` (~/.config/offerview/)
//! - Data: `$XDG_DATA_HOME/offerview/` (~/.local/share/offerview/)
//! - State/Logs: `$XDG_STATE_HOME/offerview/` (~/.local/state/offerview/)

use crate::error::{Error, Result};
use crate::layout::LayoutMode;
use crate::types::DesignConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_DATA_HOME or ~/.local/share
fn xdg_data_home() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/share"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Preview defaults
    #[serde(default)]
    pub preview: PreviewConfig,

    /// Design values applied under every offer's own design config
    #[serde(default)]
    pub design: DesignConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Preview defaults
#[derive(Debug, Deserialize, Default)]
pub struct PreviewConfig {
    /// Layout mode used when none is given on the command line
    #[serde(default)]
    pub default_mode: LayoutMode,

    /// Catalog file to open when none is given on the command line
    pub catalog_path: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Catalog to open: the explicit path if given, then the configured
    /// one, then `$XDG_DATA_HOME/offerview/offers.json`.
    pub fn resolve_catalog_path(&self, explicit: Option<&Path>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| self.preview.catalog_path.clone())
            .unwrap_or_else(Self::default_catalog_path)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/offerview/config.toml` (~/.config/offerview/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("offerview").join("config.toml")
    }

    /// Returns the data directory path (for catalogs)
    ///
    /// `$XDG_DATA_HOME/offerview/` (~/.local/share/offerview/)
    pub fn data_dir() -> PathBuf {
        xdg_data_home().join("offerview")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/offerview/` (~/.local/state/offerview/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("offerview")
    }

    /// Returns the default catalog file path
    ///
    /// `$XDG_DATA_HOME/offerview/offers.json` (~/.local/share/offerview/offers.json)
    pub fn default_catalog_path() -> PathBuf {
        Self::data_dir().join("offers.json")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/offerview/offerview.log` (~/.local/state/offerview/offerview.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("offerview.log")
    }

    /// Ensure XDG base directory environment variables are set.
    ///
    /// This is mainly for CLI binaries that want explicit, stable path behavior
    /// before invoking other components that read these env vars.
    pub fn ensure_xdg_env() {
        let home = home_dir();

        if std::env::var("XDG_DATA_HOME").is_err() {
            std::env::set_var("XDG_DATA_HOME", home.join(".local/share"));
        }

        if std::env::var("XDG_STATE_HOME").is_err() {
            std::env::set_var("XDG_STATE_HOME", home.join(".local/state"));
        }

        if std::env::var("XDG_CONFIG_HOME").is_err() {
            std::env::set_var("XDG_CONFIG_HOME", home.join(".config"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.preview.default_mode, LayoutMode::TriFocus);
        assert!(config.preview.catalog_path.is_none());
        assert_eq!(config.design, DesignConfig::default());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.max_files, 5);
    }

    #[test]
    fn test_parse_config() {
        let toml = r##"
[preview]
default_mode = "single_focus"
catalog_path = "/tmp/offers.json"

[design]
slot_background_color = "#1e293b"
ctaColor = "#f97316"

[logging]
level = "debug"
"##;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.preview.default_mode, LayoutMode::SingleFocus);
        assert_eq!(
            config.preview.catalog_path.as_deref(),
            Some(Path::new("/tmp/offers.json"))
        );
        assert_eq!(
            config.design.slot_background_color.as_deref(),
            Some("#1e293b")
        );
        assert_eq!(config.design.cta_color.as_deref(), Some("#f97316"));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_invalid_mode_is_rejected() {
        let toml = r#"
[preview]
default_mode = "diagonal"
"#;
        assert!(toml::from_str::<Config>(toml).is_err());
    }

    #[test]
    fn test_resolve_catalog_path_precedence() {
        let mut config = Config::default();
        assert_eq!(
            config.resolve_catalog_path(None),
            Config::default_catalog_path()
        );

        config.preview.catalog_path = Some(PathBuf::from("/srv/offers.json"));
        assert_eq!(
            config.resolve_catalog_path(None),
            PathBuf::from("/srv/offers.json")
        );
        assert_eq!(
            config.resolve_catalog_path(Some(Path::new("local.json"))),
            PathBuf::from("local.json")
        );
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = Config::load_from(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
