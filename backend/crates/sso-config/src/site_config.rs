use crate::{ConfigError, ConfigErrorResult, DEFAULT_SITE_URL};

use serde::Deserialize;

/// Where the forum is reachable, for links and redirects.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Absolute base URL including any sub-path, e.g. `https://example.com/forum`
    pub url: String,
    /// Sub-path the site is mounted under, e.g. `/forum`. Empty at the root.
    pub relative_path: String,
    /// Users allowed to manage SSO settings
    pub admin_uids: Vec<i64>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            url: String::from(DEFAULT_SITE_URL),
            relative_path: String::new(),
            admin_uids: Vec::new(),
        }
    }
}

impl SiteConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(ConfigError::site(format!(
                "site.url must start with http:// or https://, got '{}'",
                self.url
            )));
        }

        if !self.relative_path.is_empty()
            && (!self.relative_path.starts_with('/') || self.relative_path.ends_with('/'))
        {
            return Err(ConfigError::site(format!(
                "site.relative_path must be empty or look like '/path', got '{}'",
                self.relative_path
            )));
        }

        if let Some(uid) = self.admin_uids.iter().find(|uid| **uid <= 0) {
            return Err(ConfigError::site(format!(
                "site.admin_uids must be positive, got {}",
                uid
            )));
        }

        Ok(())
    }

    pub fn is_admin(&self, uid: i64) -> bool {
        self.admin_uids.contains(&uid)
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// Local redirect target, e.g. `/forum/me/edit`
    pub fn local_path(&self, path: &str) -> String {
        format!("{}{}", self.relative_path, path)
    }
}
