//! TOML configuration for the estimator.
//!
//! Every section and key is optional:
//!
//! ```toml
//! [rates]
//! employment_net_factor = "0.71"
//! youth_net_factor = "0.75"
//! standard_contribution = "1600"
//! relief_contribution = "380"
//! income_tax_rate = "0.19"
//!
//! [wizard]
//! delay_ms = 1200
//!
//! [logging]
//! level = "warn"
//! file = "salary-estimator.log"
//! ```

use std::{
    fs,
    io,
    path::{Path, PathBuf},
    time::Duration,
};

use salary_core::{RateConfigError, SalaryRates};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid rates in '{path}': {source}")]
    Rates {
        path: PathBuf,
        #[source]
        source: RateConfigError,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub rates: SalaryRates,
    pub wizard: WizardConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    /// Pause on the "calculating" screen, in milliseconds.
    pub delay_ms: u64,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self { delay_ms: 1200 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directives, e.g. `"info"` or `"warn,salary_core=debug"`.
    pub level: Option<String>,
    /// File to append log records to.
    pub file: Option<PathBuf>,
}

impl AppConfig {
    /// Parses configuration text without validating the rates.
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Reads, parses and validates a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.rates.validate().map_err(|source| ConfigError::Rates {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Loads `path` when given, otherwise returns the built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn loading_delay(&self) -> Duration {
        Duration::from_millis(self.wizard.delay_ms)
    }
}
