use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::constants::{
    DEFAULT_API_URL, DEFAULT_POSITION_TIMEOUT_SECS, DEFAULT_REGIONS_URL, DEFAULT_REQUEST_TIMEOUT_SECS,
};
use crate::error::{EcoletaError, Result};

pub const CONFIG_PATH_ENV: &str = "ECOLETA_CONFIG";
pub const API_URL_ENV: &str = "ECOLETA_API_URL";
pub const REGIONS_URL_ENV: &str = "ECOLETA_REGIONS_URL";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub regions: RegionsConfig,
    pub location: LocationConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RegionsConfig {
    pub base_url: String,
}

impl Default for RegionsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_REGIONS_URL.to_string(),
        }
    }
}

/// Position source for hosts without a location sensor. No coordinates means permission is denied.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    pub position_timeout_secs: u64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            position_timeout_secs: DEFAULT_POSITION_TIMEOUT_SECS,
            latitude: None,
            longitude: None,
        }
    }
}

impl Config {
    /// Reads `$ECOLETA_CONFIG` (or `config.toml`), then applies URL overrides from the environment
    pub fn load() -> Result<Self> {
        let config_path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "config.toml".to_string());
        let mut config = if Path::new(&config_path).exists() {
            Self::from_file(&config_path)?
        } else {
            Self::default()
        };

        if let Ok(url) = std::env::var(API_URL_ENV) {
            config.api.base_url = url;
        }
        if let Ok(url) = std::env::var(REGIONS_URL_ENV) {
            config.regions.base_url = url;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            EcoletaError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.api.request_timeout_secs == 0 || self.location.position_timeout_secs == 0 {
            return Err(EcoletaError::Config("timeouts must be at least one second".to_string()));
        }
        if self.location.latitude.is_some() != self.location.longitude.is_some() {
            return Err(EcoletaError::Config(
                "location.latitude and location.longitude must be set together".to_string(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.request_timeout_secs)
    }

    pub fn position_timeout(&self) -> Duration {
        Duration::from_secs(self.location.position_timeout_secs)
    }
}
