//! Configuration module - environment variable parsing

use std::env;

/// Application configuration loaded from environment variables
#[derive(Clone, Debug)]
pub struct Config {
    /// WebSocket URL of the game server
    pub server_url: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Registration token; when set the bot registers authenticated
    pub token: Option<String>,
    /// Team name used for unauthenticated registration
    pub team_name: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let server_url =
            env::var("SERVER_ADDRESS").unwrap_or_else(|_| "ws://127.0.0.1:8765".to_string());

        if !server_url.starts_with("ws://") && !server_url.starts_with("wss://") {
            return Err(ConfigError::InvalidServerUrl(server_url));
        }

        Ok(Self {
            server_url,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            token: env::var("TOKEN").ok().filter(|t| !t.is_empty()),
            team_name: env::var("TEAM_NAME").unwrap_or_else(|_| "MyBot Rust".to_string()),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid server URL (expected ws:// or wss://): {0}")]
    InvalidServerUrl(String),
}
