use sso_core::SsoSettings;

use serde::Serialize;

/// Admin settings page data. The client secret is never sent back.
#[derive(Debug, Serialize)]
pub struct AdminSettingsResponse {
    /// URL to register with the provider's OAuth application
    pub callback_url: String,
    pub client_id: Option<String>,
    pub client_secret_set: bool,
    pub disable_registration: bool,
}

impl AdminSettingsResponse {
    pub fn new(callback_url: String, settings: &SsoSettings) -> Self {
        Self {
            callback_url,
            client_id: settings.client_id.clone(),
            client_secret_set: settings
                .client_secret
                .as_deref()
                .is_some_and(|s| !s.is_empty()),
            disable_registration: settings.disable_registration,
        }
    }
}
