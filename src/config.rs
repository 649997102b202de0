use crate::domain::Rate;
use std::collections::HashMap;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_path: String,
    /// Rate applied when a purchaser is self-registered as an affiliate.
    pub default_commission_rate: Rate,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let database_path = env_map
            .get("DATABASE_PATH")
            .cloned()
            .ok_or_else(|| ConfigError::MissingEnv("DATABASE_PATH".to_string()))?;

        let default_commission_rate = Rate::from_str(
            env_map
                .get("DEFAULT_COMMISSION_RATE")
                .map(|s| s.as_str())
                .unwrap_or("0.1"),
        )
        .map_err(|e| {
            ConfigError::InvalidValue("DEFAULT_COMMISSION_RATE".to_string(), e.to_string())
        })?;

        Ok(Config {
            port,
            database_path,
            default_commission_rate,
        })
    }
}
