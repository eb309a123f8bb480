use sso_core::{Provider, SsoSettings};

use serde::Serialize;

/// Login button / route registration offered to the host login page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginStrategy {
    pub name: String,
    pub url: String,
    pub callback_url: String,
    pub icon: String,
    pub scope: String,
}

impl LoginStrategy {
    /// `None` until an administrator has entered the OAuth credentials.
    pub fn for_provider(provider: &Provider, settings: &SsoSettings) -> Option<Self> {
        if !settings.is_configured() {
            return None;
        }

        Some(Self {
            name: provider.slug.clone(),
            url: provider.auth_path(),
            callback_url: provider.callback_path(),
            icon: provider.icon.clone(),
            scope: provider.scope.clone(),
        })
    }
}
