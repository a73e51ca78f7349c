//! Shop configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `GIFTSHELF_NETWORK` - Network ledger actions apply to: `main` or `test` (default: main)
//! - `GIFTSHELF_STATE_PATH` - Snapshot file (default: giftshelf-state.json)
//! - `GIFTSHELF_ANALYTICS_ENABLED` - Enable analytics: `true`/`false`/`1`/`0` (default: false)

use std::path::PathBuf;

use giftshelf_core::NetworkId;
use thiserror::Error;

const DEFAULT_STATE_PATH: &str = "giftshelf-state.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Shop configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopConfig {
    /// Network every scoped ledger action is applied to
    pub network: NetworkId,
    /// Where the snapshot is persisted
    pub state_path: PathBuf,
    /// Whether queued analytics calls are ever delivered
    pub analytics_enabled: bool,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            network: NetworkId::Main,
            state_path: PathBuf::from(DEFAULT_STATE_PATH),
            analytics_enabled: false,
        }
    }
}

impl ShopConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let network = match lookup("GIFTSHELF_NETWORK") {
            Some(value) => value.parse::<NetworkId>().map_err(|e| {
                ConfigError::InvalidEnvVar("GIFTSHELF_NETWORK".to_string(), e.to_string())
            })?,
            None => defaults.network,
        };
        let state_path = lookup("GIFTSHELF_STATE_PATH")
            .filter(|p| !p.trim().is_empty())
            .map_or(defaults.state_path, PathBuf::from);
        let analytics_enabled = match lookup("GIFTSHELF_ANALYTICS_ENABLED") {
            Some(value) => parse_bool("GIFTSHELF_ANALYTICS_ENABLED", &value)?,
            None => defaults.analytics_enabled,
        };

        Ok(Self {
            network,
            state_path,
            analytics_enabled,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a boolean flag leniently.
fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got `{other}`"),
        )),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<ShopConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ShopConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        assert_eq!(config(&[]).unwrap(), ShopConfig::default());
    }

    #[test]
    fn test_overrides() {
        let cfg = config(&[
            ("GIFTSHELF_NETWORK", "testnet"),
            ("GIFTSHELF_STATE_PATH", "/tmp/shop.json"),
            ("GIFTSHELF_ANALYTICS_ENABLED", "1"),
        ])
        .unwrap();
        assert_eq!(cfg.network, NetworkId::Test);
        assert_eq!(cfg.state_path, PathBuf::from("/tmp/shop.json"));
        assert!(cfg.analytics_enabled);
    }

    #[test]
    fn test_invalid_network() {
        let err = config(&[("GIFTSHELF_NETWORK", "regtest")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "GIFTSHELF_NETWORK"));
    }

    #[test]
    fn test_invalid_bool() {
        assert!(config(&[("GIFTSHELF_ANALYTICS_ENABLED", "maybe")]).is_err());
    }
}
