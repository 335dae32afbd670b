//! # Cart Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     ROCKET_INVENTORY_URL=http://localhost:3333/                        │
//! │     ROCKET_INVENTORY_TIMEOUT_SECS=10                                   │
//! │     ROCKET_DATA_DIR=/var/lib/rocket-cart                               │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/rocket-cart/cart.toml (Linux)                            │
//! │     ~/Library/Application Support/com.rocketshoes.rocket-cart/cart.toml│
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # cart.toml
//! [inventory]
//! base_url = "http://localhost:3333/"
//! timeout_secs = 10
//!
//! [storage]
//! data_dir = "/var/lib/rocket-cart"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::ConfigError;

/// Default inventory endpoint (the storefront's local json-server).
pub const DEFAULT_INVENTORY_URL: &str = "http://localhost:3333/";

// =============================================================================
// Sections
// =============================================================================

/// Inventory endpoint settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryConfig {
    /// Base URL; `products/{id}` and `stock/{id}` are resolved against it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_INVENTORY_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for InventoryConfig {
    fn default() -> Self {
        InventoryConfig {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl InventoryConfig {
    /// Parses the base URL, adding the trailing slash `Url::join` needs so
    /// that `http://host/api` resolves `stock/1` to `http://host/api/stock/1`.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidUrl(e.to_string()))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl(format!(
                "Inventory URL must use http or https, got: {}",
                self.base_url
            )));
        }

        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(url)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Snapshot storage settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding snapshot files. Defaults to the platform data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

// =============================================================================
// CartConfig
// =============================================================================

/// Complete configuration for a cart session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartConfig {
    #[serde(default)]
    pub inventory: InventoryConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

impl CartConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (explicit path, else `cart.toml` in the config dir)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading cart config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML config file without applying overrides.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.inventory.base_url()?;

        if self.inventory.timeout_secs == 0 {
            return Err(ConfigError::InvalidConfig(
                "inventory.timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Resolves the directory snapshots are written to.
    pub fn data_dir(&self) -> Result<PathBuf, ConfigError> {
        if let Some(dir) = &self.storage.data_dir {
            return Ok(dir.clone());
        }

        project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or(ConfigError::NoDataDir)
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `ROCKET_*` overrides from any key lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("ROCKET_INVENTORY_URL") {
            debug!(url = %url, "Overriding inventory URL from environment");
            self.inventory.base_url = url;
        }

        if let Some(timeout) = lookup("ROCKET_INVENTORY_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.inventory.timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring non-numeric inventory timeout"),
            }
        }

        if let Some(dir) = lookup("ROCKET_DATA_DIR") {
            self.storage.data_dir = Some(PathBuf::from(dir));
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("cart.toml"))
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "rocketshoes", "rocket-cart")
}
