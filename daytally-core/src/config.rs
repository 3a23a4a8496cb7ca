//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/daytally/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/daytally/` (~/.config/daytally/)
//! - State/Logs: `$XDG_STATE_HOME/daytally/` (~/.local/state/daytally/)

use crate::analytics::{SummaryFormatter, ViewOptions};
use crate::error::{Error, Result};
use crate::period::PeriodKind;
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

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Dashboard defaults
    #[serde(default)]
    pub dashboard: DashboardConfig,

    /// Summary text options
    #[serde(default)]
    pub summary: SummaryConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Dashboard defaults
#[derive(Debug, Deserialize)]
pub struct DashboardConfig {
    /// Period shown when none is requested (day, week, month, year)
    #[serde(default = "default_period")]
    pub default_period: String,

    /// Category left out of display by default (e.g. "Sleep")
    #[serde(default)]
    pub hidden_category: Option<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_period: default_period(),
            hidden_category: None,
        }
    }
}

impl DashboardConfig {
    /// Parsed default period kind.
    pub fn period(&self) -> Result<PeriodKind> {
        self.default_period.parse()
    }
}

fn default_period() -> String {
    "week".to_string()
}

/// Summary text options
#[derive(Debug, Deserialize)]
pub struct SummaryConfig {
    /// Distinct notes listed per activity line
    #[serde(default = "default_max_notes")]
    pub max_notes: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            max_notes: default_max_notes(),
        }
    }
}

fn default_max_notes() -> usize {
    3
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

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        self.dashboard.period().map_err(|_| {
            Error::Config(format!(
                "dashboard.default_period must be day, week, month or year, got {:?}",
                self.dashboard.default_period
            ))
        })?;
        if self.summary.max_notes == 0 {
            return Err(Error::Config(
                "summary.max_notes must be at least 1".to_string(),
            ));
        }
        if matches!(&self.dashboard.hidden_category, Some(c) if c.trim().is_empty()) {
            return Err(Error::Config(
                "dashboard.hidden_category must not be blank".to_string(),
            ));
        }
        Ok(())
    }

    /// View options derived from the dashboard and summary sections.
    pub fn view_options(&self) -> ViewOptions {
        ViewOptions {
            hidden_category: self.dashboard.hidden_category.clone(),
            summary: SummaryFormatter::new(self.summary.max_notes),
        }
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/daytally/config.toml` (~/.config/daytally/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("daytally").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/daytally/` (~/.local/state/daytally/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("daytally")
    }
}
