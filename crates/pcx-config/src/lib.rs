//! # pcx-config
//!
//! Layered configuration loading for the PCX engine using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`PCX_*` prefix, `__` as separator)
//! 2. Project-level `.pcx/config.toml`
//! 3. User-level `~/.config/pcx/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `PCX_VARIANCE__MINOR_DELAY_DAYS` -> `variance.minor_delay_days`,
//! `PCX_WBS__WEIGHTAGE_TOLERANCE` -> `wbs.weightage_tolerance`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use pcx_config::PcxConfig;
//!
//! let config = PcxConfig::load().expect("config");
//! println!("minor delay threshold: {} days", config.variance.minor_delay_days);
//! ```

mod error;
mod general;
mod variance;
mod wbs;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use variance::VarianceConfig;
pub use wbs::WbsConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PcxConfig {
    #[serde(default)]
    pub wbs: WbsConfig,
    #[serde(default)]
    pub variance: VarianceConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl PcxConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// `.env` files are the caller's concern; the CLI reads one before this.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source cannot be parsed and
    /// [`ConfigError::InvalidValue`] when a threshold is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load defaults, then one explicit TOML file, then `PCX_*` env vars.
    ///
    /// Used when the caller names a config file directly (e.g. `pcx --config`).
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("PCX_").split("__"))
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".pcx/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("PCX_").split("__"))
    }

    /// Reject thresholds the engine cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let tolerance = self.wbs.weightage_tolerance;
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "wbs.weightage_tolerance".into(),
                reason: format!("must be a finite non-negative number, got {tolerance}"),
            });
        }
        if self.variance.minor_delay_days < 0 {
            return Err(ConfigError::InvalidValue {
                field: "variance.minor_delay_days".into(),
                reason: format!(
                    "must be zero or more days, got {}",
                    self.variance.minor_delay_days
                ),
            });
        }
        if self.general.currency.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "general.currency".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("pcx").join("config.toml"))
    }
}
