use crate::{ConfigError, ConfigErrorResult};

use sso_core::Provider;

use serde::Deserialize;

/// Identity provider settings. Defaults describe GitHub.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub name: String,
    pub slug: String,
    pub icon: String,
    pub noreply_domain: String,
    pub scope: String,
    pub authorize_url: String,
    pub token_url: String,
    pub api_url: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        let github = Provider::github();
        Self {
            name: github.name,
            slug: github.slug,
            icon: github.icon,
            noreply_domain: github.noreply_domain,
            scope: github.scope,
            authorize_url: github.authorize_url,
            token_url: github.token_url,
            api_url: github.api_url,
        }
    }
}

impl ProviderConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::provider("provider.name cannot be empty"));
        }

        let slug_ok = !self.slug.is_empty()
            && self
                .slug
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if !slug_ok {
            return Err(ConfigError::provider(format!(
                "provider.slug must be lowercase letters, digits or '-', got '{}'",
                self.slug
            )));
        }

        if self.noreply_domain.is_empty() || self.noreply_domain.contains('@') {
            return Err(ConfigError::provider(format!(
                "provider.noreply_domain must be a bare domain, got '{}'",
                self.noreply_domain
            )));
        }

        for (key, url) in [
            ("authorize_url", &self.authorize_url),
            ("token_url", &self.token_url),
            ("api_url", &self.api_url),
        ] {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(ConfigError::provider(format!(
                    "provider.{} must be an http(s) URL, got '{}'",
                    key, url
                )));
            }
        }

        Ok(())
    }

    pub fn provider(&self) -> Provider {
        Provider {
            name: self.name.clone(),
            slug: self.slug.clone(),
            icon: self.icon.clone(),
            noreply_domain: self.noreply_domain.clone(),
            scope: self.scope.clone(),
            authorize_url: self.authorize_url.clone(),
            token_url: self.token_url.clone(),
            api_url: self.api_url.trim_end_matches('/').to_string(),
        }
    }
}
