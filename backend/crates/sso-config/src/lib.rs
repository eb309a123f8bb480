mod config;
mod database_config;
mod error;
mod log_level;
mod logging_config;
mod provider_config;
mod server_config;
mod site_config;

pub use config::Config;
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, ConfigErrorResult, Section};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use provider_config::ProviderConfig;
pub use server_config::ServerConfig;
pub use site_config::SiteConfig;

const CONFIG_DIR_ENV: &str = "SSO_CONFIG_DIR";
const DEFAULT_CONFIG_DIRECTORY: &str = ".sso";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 4567;
const MIN_PORT: u16 = 1024;
const DEFAULT_MAX_CONNECTIONS: usize = 1000;
const MIN_MAX_CONNECTIONS: usize = 1;
const MAX_MAX_CONNECTIONS: usize = 100_000;
const DEFAULT_DATABASE_FILENAME: &str = "sso.db";
const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
const DEFAULT_SITE_URL: &str = "http://localhost:4567";

#[cfg(test)]
mod tests;
