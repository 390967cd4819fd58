//! Configuration Module
//!
//! Handles loading and managing daemon configuration from environment variables.

use std::env;

/// Daemon configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the persistent store file; `None` keeps the store in memory
    pub store_path: Option<String>,
    /// HTTP server port for the admin API
    pub server_port: u16,
    /// Background sweep interval in seconds, 0 disables it
    pub sweep_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `STORE_PATH` - Store file path (default: cache_store.json, empty = in-memory)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds (default: 3600)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            store_path: match env::var("STORE_PATH") {
                Ok(path) if path.is_empty() => None,
                Ok(path) => Some(path),
                Err(_) => defaults.store_path,
            },
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            sweep_interval: env::var("SWEEP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.sweep_interval),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: Some("cache_store.json".to_string()),
            server_port: 3000,
            sweep_interval: 3600,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.store_path.as_deref(), Some("cache_store.json"));
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.sweep_interval, 3600);
    }

    #[test]
    fn test_config_from_env() {
        // Single test mutates the environment to avoid races between tests
        env::remove_var("STORE_PATH");
        env::remove_var("SERVER_PORT");
        env::remove_var("SWEEP_INTERVAL");

        let config = Config::from_env();
        assert_eq!(config.store_path.as_deref(), Some("cache_store.json"));
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.sweep_interval, 3600);

        env::set_var("STORE_PATH", "");
        env::set_var("SERVER_PORT", "not-a-port");
        env::set_var("SWEEP_INTERVAL", "60");

        let config = Config::from_env();
        assert_eq!(config.store_path, None);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.sweep_interval, 60);

        env::remove_var("STORE_PATH");
        env::remove_var("SERVER_PORT");
        env::remove_var("SWEEP_INTERVAL");
    }
}
