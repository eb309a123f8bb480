use serde::{Deserialize, Serialize};

/// Administrator-controlled settings for one SSO provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SsoSettings {
    /// OAuth application id
    pub client_id: Option<String>,
    /// OAuth application secret. Never serialized back to clients.
    #[serde(skip_serializing)]
    pub client_secret: Option<String>,
    /// Refuse to provision new accounts through this provider
    pub disable_registration: bool,
}

impl SsoSettings {
    /// Login through the provider is offered only once both credentials exist.
    pub fn is_configured(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        present(&self.client_id) && present(&self.client_secret)
    }
}
