//! Verified identity handed over by the OAuth provider after the handshake.

use serde::{Deserialize, Serialize};

/// Profile of an external account, as verified by the identity provider.
///
/// Produced once per OAuth callback and consumed by the linker; never stored
/// as-is. Any field except `external_id` may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ExternalIdentity {
    /// Stable account id at the provider
    pub external_id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub avatar_url: String,
}

impl ExternalIdentity {
    /// The email to match and register with.
    ///
    /// Providers may withhold the address; fall back to a non-routable
    /// `username@<noreply_domain>` so every account still has a matching key.
    pub fn email_or_placeholder(&self, noreply_domain: &str) -> String {
        if self.email.is_empty() {
            format!("{}@{}", self.username, noreply_domain)
        } else {
            self.email.clone()
        }
    }
}
