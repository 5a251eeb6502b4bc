//! Dashboard Configuration
//! Optional TOML settings file; every field falls back to a default.

use crate::stats::DEFAULT_TOP_N;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid TOML in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Catalog CSV to load.
    pub data_path: PathBuf,
    /// Genres kept in each ranking.
    pub top_n: usize,
    /// Countries shown in the country chart.
    pub country_limit: usize,
    pub export: ExportConfig,
}

/// Static PNG export settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/netflix_titles.csv"),
            top_n: DEFAULT_TOP_N,
            country_limit: 20,
            export: ExportConfig::default(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("charts"),
            width: 1200,
            height: 800,
        }
    }
}

impl DashboardConfig {
    /// Read and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_n == 0 {
            return Err(ConfigError::Invalid("top_n must be at least 1".to_string()));
        }
        if self.country_limit == 0 {
            return Err(ConfigError::Invalid(
                "country_limit must be at least 1".to_string(),
            ));
        }
        if self.export.width == 0 || self.export.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "export size {}x{} must be non-zero",
                self.export.width, self.export.height
            )));
        }
        Ok(())
    }
}
