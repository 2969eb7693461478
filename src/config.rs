use crate::constants::{
    DEFAULT_PROMPT, DIAL_TIMEOUT_SECONDS, FTP_SERVER_DEFAULT_PORT, RESPONSE_BUFFER_SIZE,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    pub default_port: u16,
    pub dial_timeout_secs: u64,
    pub response_buffer_size: usize,
    pub prompt: String,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub client: ClientConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            default_port: FTP_SERVER_DEFAULT_PORT,
            dial_timeout_secs: DIAL_TIMEOUT_SECONDS,
            response_buffer_size: RESPONSE_BUFFER_SIZE,
            prompt: String::from(DEFAULT_PROMPT),
        }
    }
}

impl ClientConfig {
    pub fn dial_timeout(&self) -> Duration {
        Duration::from_secs(self.dial_timeout_secs)
    }
}

impl Config {
    pub fn load_from_file(path: &str) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path))?;
        Self::from_toml(&config_str)
            .with_context(|| format!("Failed to parse configuration file: {}", path))
    }

    pub fn from_toml(config_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(config_str)?;
        if config.client.response_buffer_size == 0 {
            anyhow::bail!("response_buffer_size must be greater than zero");
        }
        Ok(config)
    }
}
