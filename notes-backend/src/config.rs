use std::env;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable names - single source of truth
pub mod env_vars {
    /// Root directory every file operation is confined to
    pub const NOTES_BASE_DIR: &str = "NOTES_BASE_DIR";
    pub const BIND_ADDRESS: &str = "BIND_ADDRESS";
    pub const PORT: &str = "PORT";
    /// Set to "true", "1" or "yes" to create the base directory on boot.
    /// Default: off, a missing base directory is a startup error.
    pub const CREATE_BASE_DIR: &str = "NOTES_CREATE_BASE_DIR";
}

/// Default values
pub mod defaults {
    pub const NOTES_BASE_DIR: &str = "./vault";
    pub const BIND_ADDRESS: &str = "127.0.0.1";
    pub const PORT: u16 = 8080;
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a valid port number, got '{value}'")]
    InvalidPort { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub base_dir: PathBuf,
    pub bind_address: String,
    pub port: u16,
    pub create_base_dir: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Resolve settings through `lookup`; unset and blank values fall back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let port = match var(env_vars::PORT) {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidPort {
                name: env_vars::PORT,
                value,
            })?,
            None => defaults::PORT,
        };

        Ok(Self {
            base_dir: PathBuf::from(
                var(env_vars::NOTES_BASE_DIR).unwrap_or_else(|| defaults::NOTES_BASE_DIR.to_string()),
            ),
            bind_address: var(env_vars::BIND_ADDRESS)
                .unwrap_or_else(|| defaults::BIND_ADDRESS.to_string()),
            port,
            create_base_dir: var(env_vars::CREATE_BASE_DIR)
                .map(|v| is_truthy(&v))
                .unwrap_or(false),
        })
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes"
    )
}
