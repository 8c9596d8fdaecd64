//! Shared configuration structures.

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use domain::{
    DEFAULT_LOW_STOCK_THRESHOLD, DEFAULT_MAX_LOGIN_ATTEMPTS, DEFAULT_PRODUCTS_DB_PATH,
    DEFAULT_USERS_DB_PATH,
};

/// Locations of the backing JSON files.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// User store file (JSON array)
    pub users_path: PathBuf,
    /// Product catalog file (JSON object keyed by product id)
    pub products_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            users_path: PathBuf::from(DEFAULT_USERS_DB_PATH),
            products_path: PathBuf::from(DEFAULT_PRODUCTS_DB_PATH),
        }
    }
}

/// Login policy.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Consecutive failures before further attempts are refused
    pub max_login_attempts: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            max_login_attempts: DEFAULT_MAX_LOGIN_ATTEMPTS,
        }
    }
}

/// Inventory reporting settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InventoryConfig {
    /// Quantity below which a product is reported as low on stock
    pub low_stock_threshold: f64,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub auth: AuthConfig,
    pub inventory: InventoryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables (and `.env`, if any).
    ///
    /// Unset or unparsable variables fall back to the defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        Self {
            storage: StorageConfig {
                users_path: env::var("USERS_DB_PATH")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.storage.users_path),
                products_path: env::var("PRODUCTS_DB_PATH")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.storage.products_path),
            },
            auth: AuthConfig {
                max_login_attempts: env::var("MAX_LOGIN_ATTEMPTS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .filter(|n| *n > 0)
                    .unwrap_or(defaults.auth.max_login_attempts),
            },
            inventory: InventoryConfig {
                low_stock_threshold: env::var("LOW_STOCK_THRESHOLD")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .filter(|n: &f64| n.is_finite() && *n >= 0.0)
                    .unwrap_or(defaults.inventory.low_stock_threshold),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.storage.users_path, PathBuf::from("users_database.json"));
        assert_eq!(config.storage.products_path, PathBuf::from("product_catalog.json"));
        assert_eq!(config.auth.max_login_attempts, 5);
        assert_eq!(config.inventory.low_stock_threshold, 5.0);
    }
}
