//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults give a fully in-memory
//! storefront suitable for tests and demos.
//!
//! - `TECHSTORE_STORAGE_PATH` - Path to the JSON session-storage file.
//!   Absent means in-memory storage (nothing survives the process).
//! - `TECHSTORE_ADDRESS_API_URL` - Base URL of the address lookup API
//!   (default: <https://provinces.open-api.vn/api>)
//! - `TECHSTORE_LOGIN_DELAY_MS` - Artificial login latency in milliseconds
//!   (default: 1000)
//! - `TECHSTORE_CHECKOUT_DELAY_MS` - Artificial checkout submission latency
//!   in milliseconds (default: 1500)

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::storage::{JsonFileStorage, KeyValueStorage, MemoryStorage, StorageError};

const DEFAULT_ADDRESS_API_URL: &str = "https://provinces.open-api.vn/api";
const DEFAULT_LOGIN_DELAY_MS: u64 = 1000;
const DEFAULT_CHECKOUT_DELAY_MS: u64 = 1500;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Failed to open storage: {0}")]
    Storage(#[from] StorageError),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Session storage file. `None` keeps everything in memory.
    pub storage_path: Option<PathBuf>,
    /// Base URL of the province/district/ward lookup API.
    pub address_api_url: String,
    /// Simulated login latency.
    pub login_delay: Duration,
    /// Simulated checkout submission latency.
    pub checkout_delay: Duration,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            storage_path: None,
            address_api_url: DEFAULT_ADDRESS_API_URL.to_string(),
            login_delay: Duration::from_millis(DEFAULT_LOGIN_DELAY_MS),
            checkout_delay: Duration::from_millis(DEFAULT_CHECKOUT_DELAY_MS),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a delay variable is present but not a valid
    /// integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let storage_path = get_optional_env("TECHSTORE_STORAGE_PATH").map(PathBuf::from);
        let address_api_url =
            get_env_or_default("TECHSTORE_ADDRESS_API_URL", DEFAULT_ADDRESS_API_URL);
        let login_delay = get_delay_ms("TECHSTORE_LOGIN_DELAY_MS", DEFAULT_LOGIN_DELAY_MS)?;
        let checkout_delay =
            get_delay_ms("TECHSTORE_CHECKOUT_DELAY_MS", DEFAULT_CHECKOUT_DELAY_MS)?;

        Ok(Self {
            storage_path,
            address_api_url,
            login_delay,
            checkout_delay,
        })
    }

    /// A zero-delay configuration for tests.
    #[must_use]
    pub fn for_tests() -> Self {
        Self {
            login_delay: Duration::ZERO,
            checkout_delay: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Open the storage backend this configuration describes.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage file exists but cannot be read.
    pub fn open_storage(&self) -> Result<Arc<dyn KeyValueStorage>, ConfigError> {
        match &self.storage_path {
            Some(path) => Ok(Arc::new(JsonFileStorage::open(path)?)),
            None => Ok(Arc::new(MemoryStorage::new())),
        }
    }
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn get_delay_ms(key: &str, default: u64) -> Result<Duration, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        Err(_) => Ok(Duration::from_millis(default)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::default();
        assert!(config.storage_path.is_none());
        assert_eq!(config.address_api_url, DEFAULT_ADDRESS_API_URL);
        assert_eq!(config.login_delay, Duration::from_millis(1000));
        assert_eq!(config.checkout_delay, Duration::from_millis(1500));
    }

    #[test]
    fn test_for_tests_has_no_delays() {
        let config = StorefrontConfig::for_tests();
        assert_eq!(config.login_delay, Duration::ZERO);
        assert_eq!(config.checkout_delay, Duration::ZERO);
    }

    #[test]
    fn test_open_storage_defaults_to_memory() {
        let storage = StorefrontConfig::for_tests().open_storage().unwrap();
        assert!(storage.get("user").unwrap().is_none());
    }
}
