//! Identity provider descriptor.
//!
//! Everything route- or display-related about a provider derives from its
//! `slug`, so one descriptor drives URLs, log tags and storage namespaces.

use serde::{Deserialize, Serialize};

const GITHUB_NAME: &str = "GitHub";
const GITHUB_SLUG: &str = "github";
const GITHUB_ICON: &str = "fa-github";
const GITHUB_NOREPLY_DOMAIN: &str = "users.noreply.github.com";
const GITHUB_SCOPE: &str = "user:email";
const GITHUB_AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";
const GITHUB_TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
const GITHUB_API_URL: &str = "https://api.github.com";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    /// Display name, e.g. "GitHub"
    pub name: String,
    /// Lowercase route segment, e.g. "github"
    pub slug: String,
    pub icon: String,
    /// Domain for synthesized placeholder emails
    pub noreply_domain: String,
    /// OAuth scope requested at login
    pub scope: String,
    /// Where the browser is sent to approve the login
    pub authorize_url: String,
    /// Code-for-token exchange endpoint
    pub token_url: String,
    /// REST API base for the profile lookup, without a trailing slash
    pub api_url: String,
}

impl Default for Provider {
    fn default() -> Self {
        Self::github()
    }
}

impl Provider {
    pub fn github() -> Self {
        Self {
            name: String::from(GITHUB_NAME),
            slug: String::from(GITHUB_SLUG),
            icon: String::from(GITHUB_ICON),
            noreply_domain: String::from(GITHUB_NOREPLY_DOMAIN),
            scope: String::from(GITHUB_SCOPE),
            authorize_url: String::from(GITHUB_AUTHORIZE_URL),
            token_url: String::from(GITHUB_TOKEN_URL),
            api_url: String::from(GITHUB_API_URL),
        }
    }

    /// Prefix for log lines, e.g. `[sso-github]`
    pub fn log_tag(&self) -> String {
        format!("[sso-{}]", self.slug)
    }

    /// Settings namespace and admin plugin id, e.g. `sso-github`
    pub fn plugin_id(&self) -> String {
        format!("sso-{}", self.slug)
    }

    pub fn auth_path(&self) -> String {
        format!("/auth/{}", self.slug)
    }

    pub fn callback_path(&self) -> String {
        format!("/auth/{}/callback", self.slug)
    }

    pub fn deauth_path(&self) -> String {
        format!("/deauth/{}", self.slug)
    }

    pub fn admin_route(&self) -> String {
        format!("/plugins/{}", self.plugin_id())
    }
}
