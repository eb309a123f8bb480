//! Provider profile as returned by the OAuth client after the handshake.
//!
//! Follows the common normalized profile shape (`id`, `displayName`,
//! `username`, `emails[]`, `photos[]`). Only the first email and first photo
//! are used.

use sso_core::ExternalIdentity;

use serde::{Deserialize, Serialize};

/// Providers disagree on whether ids are numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProfileId {
    Number(u64),
    Text(String),
}

impl std::fmt::Display for ProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileValue {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderProfile {
    pub id: ProfileId,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub emails: Vec<ProfileValue>,
    #[serde(default)]
    pub photos: Vec<ProfileValue>,
}

impl From<ProviderProfile> for ExternalIdentity {
    fn from(profile: ProviderProfile) -> Self {
        let first = |values: Vec<ProfileValue>| {
            values
                .into_iter()
                .next()
                .map(|v| v.value)
                .unwrap_or_default()
        };

        ExternalIdentity {
            external_id: profile.id.to_string(),
            display_name: profile.display_name.unwrap_or_default(),
            username: profile.username.unwrap_or_default(),
            email: first(profile.emails),
            avatar_url: first(profile.photos),
        }
    }
}
