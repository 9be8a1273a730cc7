//! Configuration Module
//!
//! Handles loading and managing proxy configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

// == Backend Kind ==
/// Which cache backend the proxy runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// In-memory TTL store with a background expiry sweep
    Memory,
    /// Disk-persistent store, entries live until cleared
    Disk,
}

impl std::str::FromStr for BackendKind {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(BackendKind::Memory),
            "disk" => Ok(BackendKind::Disk),
            _ => Err(()),
        }
    }
}

// == Config ==
/// Proxy configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Base URL of the upstream origin requests are forwarded to
    pub origin: String,
    /// TTL in seconds applied to cached responses (memory backend)
    pub cache_ttl: u64,
    /// Background sweep interval in seconds
    pub cleanup_interval: u64,
    /// Active cache backend
    pub backend: BackendKind,
    /// Root directory for the disk backend
    pub cache_dir: PathBuf,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `ORIGIN` - Upstream origin base URL (default: http://dummyjson.com)
    /// - `CACHE_TTL` - Response TTL in seconds (default: 3600)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: same as TTL)
    /// - `CACHE_BACKEND` - `memory` or `disk` (default: memory)
    /// - `CACHE_DIR` - Disk backend root directory (default: cache)
    pub fn from_env() -> Self {
        let cache_ttl = env::var("CACHE_TTL")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3600);

        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
            origin: env::var("ORIGIN").unwrap_or_else(|_| "http://dummyjson.com".to_string()),
            cache_ttl,
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(cache_ttl),
            backend: env::var("CACHE_BACKEND")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(BackendKind::Memory),
            cache_dir: env::var("CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("cache")),
        }
    }

    /// TTL applied to cached responses.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    /// Interval between background sweeps of the memory backend.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8080,
            origin: "http://dummyjson.com".to_string(),
            cache_ttl: 3600,
            cleanup_interval: 3600,
            backend: BackendKind::Memory,
            cache_dir: PathBuf::from("cache"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.origin, "http://dummyjson.com");
        assert_eq!(config.cache_ttl, 3600);
        assert_eq!(config.cleanup_interval, 3600);
        assert_eq!(config.backend, BackendKind::Memory);
        assert_eq!(config.cache_dir, PathBuf::from("cache"));
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("SERVER_PORT");
        env::remove_var("ORIGIN");
        env::remove_var("CACHE_TTL");
        env::remove_var("CLEANUP_INTERVAL");
        env::remove_var("CACHE_BACKEND");
        env::remove_var("CACHE_DIR");

        let config = Config::from_env();
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.origin, "http://dummyjson.com");
        assert_eq!(config.cache_ttl, 3600);
        assert_eq!(config.cleanup_interval, 3600);
        assert_eq!(config.backend, BackendKind::Memory);
        assert_eq!(config.cache_dir, PathBuf::from("cache"));
    }

    #[test]
    fn test_backend_kind_parse() {
        assert_eq!("memory".parse(), Ok(BackendKind::Memory));
        assert_eq!("disk".parse(), Ok(BackendKind::Disk));
        assert_eq!("DISK".parse(), Ok(BackendKind::Disk));
        assert_eq!("sqlite".parse::<BackendKind>(), Err(()));
    }

    #[test]
    fn test_duration_helpers() {
        let config = Config {
            cache_ttl: 60,
            cleanup_interval: 15,
            ..Config::default()
        };
        assert_eq!(config.ttl(), Duration::from_secs(60));
        assert_eq!(config.sweep_interval(), Duration::from_secs(15));
    }
}
