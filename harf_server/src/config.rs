//! Server configuration management.
//!
//! Consolidates all environment variable reads and provides validated
//! configuration. CLI arguments take priority over environment variables,
//! which take priority over the built-in defaults.

use std::net::SocketAddr;

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address
    pub bind: SocketAddr,
    /// Path to the newline-delimited center word list
    pub center_words_path: String,
    /// Path to the newline-delimited validity word list
    pub valid_words_path: String,
    /// Room deadline sweep period in milliseconds
    pub sweep_interval_ms: u64,
}

impl ServerConfig {
    /// Load configuration, with CLI overrides taking priority over
    /// environment variables.
    pub fn from_env(
        bind_override: Option<SocketAddr>,
        center_words_override: Option<String>,
        valid_words_override: Option<String>,
    ) -> Result<Self, ConfigError> {
        let bind = bind_override
            .or_else(|| {
                std::env::var("SERVER_BIND")
                    .ok()
                    .and_then(|s| s.parse().ok())
            })
            .unwrap_or_else(|| {
                "127.0.0.1:4000"
                    .parse()
                    .expect("Default bind address is valid")
            });

        let center_words_path = center_words_override
            .or_else(|| std::env::var("CENTER_WORDS_PATH").ok())
            .unwrap_or_else(|| "data/center_words.txt".to_string());

        let valid_words_path = valid_words_override
            .or_else(|| std::env::var("VALID_WORDS_PATH").ok())
            .unwrap_or_else(|| "data/valid_words.txt".to_string());

        let sweep_interval_ms = parse_env_or("SWEEP_INTERVAL_MS", 500);

        let config = ServerConfig {
            bind,
            center_words_path,
            valid_words_path,
            sweep_interval_ms,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sweep_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                var: "SWEEP_INTERVAL_MS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        // A sweep slower than the shortest configurable timer would let
        // deadlines slip by whole turns.
        if self.sweep_interval_ms > 5_000 {
            return Err(ConfigError::Invalid {
                var: "SWEEP_INTERVAL_MS".to_string(),
                reason: "Must be at most 5000 ms".to_string(),
            });
        }

        if self.center_words_path.is_empty() {
            return Err(ConfigError::Invalid {
                var: "CENTER_WORDS_PATH".to_string(),
                reason: "Must not be empty".to_string(),
            });
        }

        if self.valid_words_path.is_empty() {
            return Err(ConfigError::Invalid {
                var: "VALID_WORDS_PATH".to_string(),
                reason: "Must not be empty".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
