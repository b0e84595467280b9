//! # Service Config Module
//!
//! ## Purpose
//! Centralized management of the remote-service settings (endpoint URL, bearer
//! token) and the optional catalog override file. This eliminates hardcoded
//! endpoints throughout the codebase and lets a deployment point the client at
//! a different service instance without rebuilding.
//!
//! ## Architecture
//! - **ServiceConfig**: serializable configuration structure
//! - **ConfigManager**: validation and persistence (chemprops_config.json)
//! - **Global Access**: thread-safe singleton with test isolation
//!
//! ## Configuration Format
//! ```json
//! {
//!   "endpoint": "https://w972i5rc5l.execute-api.us-east-2.amazonaws.com/v0/",
//!   "bearer_token": "e53c49c7df86fb1bc9c0361ff31a709d9d7eea12",
//!   "catalog_path": "my_catalog.json"
//! }
//! ```
//!
//! ## Usage
//! ```rust
//! use chemprops::config::with_config;
//!
//! let endpoint = with_config(|config| config.endpoint().to_string());
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::{Mutex, OnceLock};
use url::Url;

/// Production endpoint of the chemical-properties service.
pub const DEFAULT_ENDPOINT: &str = "https://w972i5rc5l.execute-api.us-east-2.amazonaws.com/v0/";
/// Static bearer credential passed with every request.
pub const DEFAULT_BEARER_TOKEN: &str = "e53c49c7df86fb1bc9c0361ff31a709d9d7eea12";

const CONFIG_FILE: &str = "chemprops_config.json";

/// Configuration for the remote service and the typeahead catalog.
///
/// # Fields
/// * `endpoint` - Base URL of the chemical-properties service
/// * `bearer_token` - Credential sent in the Authorization header
/// * `catalog_path` - Optional catalog file overriding the bundled one
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub endpoint: String,
    pub bearer_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            bearer_token: DEFAULT_BEARER_TOKEN.to_string(),
            catalog_path: None,
        }
    }
}

/// Manager handling loading, validation and persistence of the service config.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: ServiceConfig,
    config_file: String,
}

impl ConfigManager {
    /// Creates a manager backed by `chemprops_config.json` in the current
    /// directory. A missing or invalid file yields the default configuration.
    pub fn new() -> Self {
        Self::with_config_file(CONFIG_FILE)
    }

    /// Creates a manager backed by a custom configuration file path. Primarily
    /// used for testing.
    pub fn with_config_file(config_file: &str) -> Self {
        let config = Self::load_config(config_file).unwrap_or_default();
        Self {
            config,
            config_file: config_file.to_string(),
        }
    }

    fn load_config(config_file: &str) -> Result<ServiceConfig, Box<dyn std::error::Error>> {
        if Path::new(config_file).exists() {
            let content = fs::read_to_string(config_file)?;
            let config: ServiceConfig = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(ServiceConfig::default())
        }
    }

    /// Saves the current configuration to the config file.
    ///
    /// During tests this does nothing to prevent pollution of the real config
    /// file.
    pub fn save_config(&self) -> Result<(), Box<dyn std::error::Error>> {
        #[cfg(test)]
        {
            return Ok(());
        }

        #[cfg(not(test))]
        {
            let content = serde_json::to_string_pretty(&self.config)?;
            fs::write(&self.config_file, content)?;
            Ok(())
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    pub fn bearer_token(&self) -> &str {
        &self.config.bearer_token
    }

    pub fn catalog_path(&self) -> Option<&str> {
        self.config.catalog_path.as_deref()
    }

    pub fn get_config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Updates the service endpoint.
    ///
    /// Validates that the new value parses as a URL before updating, then saves
    /// the configuration.
    ///
    /// # Arguments
    /// * `endpoint` - New base URL of the chemical-properties service
    ///
    /// # Returns
    /// * `Ok(())` - If the URL is valid and the update was saved
    /// * `Err(Box<dyn std::error::Error>)` - If the URL is invalid or save failed
    pub fn set_endpoint(&mut self, endpoint: &str) -> Result<(), Box<dyn std::error::Error>> {
        Url::parse(endpoint)?;
        self.config.endpoint = endpoint.to_string();
        self.save_config()?;
        Ok(())
    }

    pub fn set_bearer_token(&mut self, token: &str) -> Result<(), Box<dyn std::error::Error>> {
        self.config.bearer_token = token.to_string();
        self.save_config()?;
        Ok(())
    }

    /// Updates the catalog override file path.
    ///
    /// Validates that the file exists before updating the configuration.
    ///
    /// # Arguments
    /// * `path` - New catalog file path, or `None` to use the bundled catalog
    pub fn set_catalog_path(
        &mut self,
        path: Option<&str>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(path) = path {
            if !Path::new(path).exists() {
                return Err(format!("File does not exist: {}", path).into());
            }
        }
        self.config.catalog_path = path.map(|p| p.to_string());
        self.save_config()?;
        Ok(())
    }

    /// Resets all settings to their default values and saves the changes.
    pub fn reset_to_defaults(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.config = ServiceConfig::default();
        self.save_config()?;
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Global singleton instance of ConfigManager using thread-safe OnceLock pattern
static GLOBAL_CONFIG_MANAGER: OnceLock<Mutex<ConfigManager>> = OnceLock::new();

/// Returns a mutex guard to the global ConfigManager instance.
///
/// # Panics
/// Panics if the mutex is poisoned (should not happen in normal operation)
pub fn get_config_manager() -> std::sync::MutexGuard<'static, ConfigManager> {
    GLOBAL_CONFIG_MANAGER
        .get_or_init(|| Mutex::new(ConfigManager::new()))
        .lock()
        .unwrap()
}

/// Executes a closure with read-only access to the ConfigManager.
pub fn with_config<F, R>(f: F) -> R
where
    F: FnOnce(&ConfigManager) -> R,
{
    let manager = get_config_manager();
    f(&*manager)
}

/// Executes a closure with mutable access to the ConfigManager.
pub fn with_config_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut ConfigManager) -> R,
{
    let mut manager = get_config_manager();
    f(&mut *manager)
}
