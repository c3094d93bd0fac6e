//! Configuration System
//!
//! Loads the store configuration from a TOML file with environment
//! variable overrides. Every section falls back to defaults.

use crate::charts::BivariatePalette;
use crate::stats::{ThresholdMode, Thresholds, EDU_THRESHOLDS, INCOME_THRESHOLDS};
use crate::store::DEFAULT_YEAR;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "choropleth.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub selection: SelectionConfig,

    #[serde(default)]
    pub binning: BinningConfig,

    #[serde(default)]
    pub palette: BivariatePalette,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Dataset locations
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_income_csv")]
    pub income_csv: PathBuf,

    #[serde(default = "default_education_csv")]
    pub education_csv: PathBuf,
}

fn default_income_csv() -> PathBuf {
    PathBuf::from("./usa_personal-income-by-state_2006-2019.csv")
}

fn default_education_csv() -> PathBuf {
    PathBuf::from("./usa_ba-degree-or-higher_2006-2019.csv")
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            income_csv: default_income_csv(),
            education_csv: default_education_csv(),
        }
    }
}

/// Initial selection
#[derive(Debug, Clone, Deserialize)]
pub struct SelectionConfig {
    #[serde(default = "default_year")]
    pub year: i32,
}

fn default_year() -> i32 {
    DEFAULT_YEAR
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            year: default_year(),
        }
    }
}

/// Threshold selection for both variables
#[derive(Debug, Clone, Deserialize)]
pub struct BinningConfig {
    #[serde(default)]
    pub mode: ThresholdMode,

    #[serde(default = "default_income_thresholds")]
    pub income: Thresholds,

    #[serde(default = "default_edu_thresholds")]
    pub education: Thresholds,
}

fn default_income_thresholds() -> Thresholds {
    INCOME_THRESHOLDS
}

fn default_edu_thresholds() -> Thresholds {
    EDU_THRESHOLDS
}

impl Default for BinningConfig {
    fn default() -> Self {
        Self {
            mode: ThresholdMode::default(),
            income: default_income_thresholds(),
            education: default_edu_thresholds(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::from_toml(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })
    }

    /// Load from `path` if it exists, otherwise start from defaults;
    /// then apply environment overrides.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            Self::load(path)?
        } else {
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply `CHOROPLETH_*` overrides from a variable lookup.
    ///
    /// An unparseable year is ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("CHOROPLETH_INCOME_CSV") {
            self.data.income_csv = PathBuf::from(path);
        }
        if let Some(path) = lookup("CHOROPLETH_EDUCATION_CSV") {
            self.data.education_csv = PathBuf::from(path);
        }
        if let Some(year) = lookup("CHOROPLETH_YEAR").and_then(|y| y.trim().parse().ok()) {
            self.selection.year = year;
        }
        if let Some(level) = lookup("CHOROPLETH_LOG") {
            self.logging.level = level;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}
