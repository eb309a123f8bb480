use crate::{
    CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult, DEFAULT_CONFIG_DIRECTORY,
    DatabaseConfig, LogLevel, LoggingConfig, ProviderConfig, ServerConfig, SiteConfig,
};

use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub site: SiteConfig,
    pub provider: ProviderConfig,
}

/// Applies one `SSO_*` variable; `Err` carries a reason for the warning.
type Override = fn(&mut Config, String) -> Result<(), String>;

const ENV_OVERRIDES: &[(&str, Override)] = &[
    ("SSO_SERVER_HOST", |c, v| {
        c.server.host = v;
        Ok(())
    }),
    ("SSO_SERVER_PORT", |c, v| {
        c.server.port = parse(&v)?;
        Ok(())
    }),
    ("SSO_SERVER_MAX_CONNECTIONS", |c, v| {
        c.server.max_connections = parse(&v)?;
        Ok(())
    }),
    ("SSO_DATABASE_PATH", |c, v| {
        c.database.path = v;
        Ok(())
    }),
    ("SSO_LOG_LEVEL", |c, v| {
        c.logging.level = LogLevel::parse_lossy(&v);
        Ok(())
    }),
    ("SSO_LOG_COLORED", |c, v| {
        c.logging.colored = flag(&v)?;
        Ok(())
    }),
    ("SSO_LOG_DIR", |c, v| {
        c.logging.dir = v;
        Ok(())
    }),
    ("SSO_LOG_FILE", |c, v| {
        c.logging.file = (!v.is_empty()).then_some(v);
        Ok(())
    }),
    ("SSO_SITE_URL", |c, v| {
        c.site.url = v;
        Ok(())
    }),
    ("SSO_SITE_RELATIVE_PATH", |c, v| {
        c.site.relative_path = v;
        Ok(())
    }),
    ("SSO_SITE_ADMIN_UIDS", |c, v| {
        c.site.admin_uids = v
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(parse::<i64>)
            .collect::<Result<_, _>>()?;
        Ok(())
    }),
    ("SSO_PROVIDER_NAME", |c, v| {
        c.provider.name = v;
        Ok(())
    }),
    ("SSO_PROVIDER_SLUG", |c, v| {
        c.provider.slug = v;
        Ok(())
    }),
    ("SSO_PROVIDER_ICON", |c, v| {
        c.provider.icon = v;
        Ok(())
    }),
    ("SSO_PROVIDER_NOREPLY_DOMAIN", |c, v| {
        c.provider.noreply_domain = v;
        Ok(())
    }),
    ("SSO_PROVIDER_SCOPE", |c, v| {
        c.provider.scope = v;
        Ok(())
    }),
    ("SSO_PROVIDER_AUTHORIZE_URL", |c, v| {
        c.provider.authorize_url = v;
        Ok(())
    }),
    ("SSO_PROVIDER_TOKEN_URL", |c, v| {
        c.provider.token_url = v;
        Ok(())
    }),
    ("SSO_PROVIDER_API_URL", |c, v| {
        c.provider.api_url = v;
        Ok(())
    }),
];

impl Config {
    /// Read `config.toml` from the config dir (defaults when absent) and
    /// layer `SSO_*` environment variables on top.
    ///
    /// The config dir is created if missing. Does not validate.
    pub fn load() -> ConfigErrorResult<Self> {
        let dir = Self::config_dir()?;
        std::fs::create_dir_all(&dir).map_err(|source| ConfigError::Io {
            path: dir.clone(),
            source,
        })?;

        let file = dir.join(CONFIG_FILENAME);
        let mut config = if file.is_file() {
            Self::from_file(&file)?
        } else {
            Self::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn from_file(path: &Path) -> ConfigErrorResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&text).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `$SSO_CONFIG_DIR`, or `./.sso`
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) => Ok(PathBuf::from(dir)),
            None => std::env::current_dir()
                .map(|cwd| cwd.join(DEFAULT_CONFIG_DIRECTORY))
                .map_err(|e| ConfigError::config(format!("no working directory: {}", e))),
        }
    }

    /// Check every section; the first failure wins.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.database.validate()?;
        self.site.validate()?;
        self.provider.validate()
    }

    pub fn database_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.database.path))
    }

    /// `None` means stdout.
    pub fn log_file_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        let Some(file) = &self.logging.file else {
            return Ok(None);
        };

        Ok(Some(Self::config_dir()?.join(&self.logging.dir).join(file)))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Print the effective settings. OAuth credentials live in the database
    /// and never pass through here.
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  server: {} (max {} concurrent requests)",
            self.bind_addr(),
            self.server.max_connections
        );
        info!("  database: {}", self.database.path);
        info!(
            "  logging: {} -> {}{}",
            *self.logging.level,
            self.logging.file.as_deref().unwrap_or("stdout"),
            if self.logging.colored { " (colored)" } else { "" }
        );
        info!(
            "  site: {}{} ({} admin uid(s))",
            self.site.url,
            self.site.relative_path,
            self.site.admin_uids.len()
        );
        info!(
            "  provider: {} [sso-{}], noreply domain {}",
            self.provider.name, self.provider.slug, self.provider.noreply_domain
        );
    }

    fn apply_env_overrides(&mut self) {
        for (var, apply) in ENV_OVERRIDES {
            let Ok(value) = std::env::var(var) else {
                continue;
            };

            if let Err(reason) = apply(self, value) {
                warn!("Ignoring {}: {}", var, reason);
            }
        }
    }
}

fn parse<T>(value: &str) -> Result<T, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| format!("'{}' ({})", value, e))
}

fn flag(value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(format!("'{}' is not a boolean", other)),
    }
}
