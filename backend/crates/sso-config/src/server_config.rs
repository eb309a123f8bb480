use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_HOST, DEFAULT_MAX_CONNECTIONS, DEFAULT_PORT,
    MAX_MAX_CONNECTIONS, MIN_MAX_CONNECTIONS, MIN_PORT,
};

use serde::Deserialize;

/// Listener settings for the HTTP surface
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    /// 0 lets the OS pick
    pub port: u16,
    /// Requests served at once; the rest wait
    pub max_connections: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::server("host is empty"));
        }

        if (1..MIN_PORT).contains(&self.port) {
            return Err(ConfigError::server(format!(
                "port {} is privileged, use 0 or {}+",
                self.port, MIN_PORT
            )));
        }

        if !(MIN_MAX_CONNECTIONS..=MAX_MAX_CONNECTIONS).contains(&self.max_connections) {
            return Err(ConfigError::server(format!(
                "max_connections {} outside {}..={}",
                self.max_connections, MIN_MAX_CONNECTIONS, MAX_MAX_CONNECTIONS
            )));
        }

        Ok(())
    }
}
