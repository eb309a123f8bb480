use serde::Deserialize;

/// Admin settings form. An absent secret keeps the stored one.
#[derive(Debug, Deserialize)]
pub struct UpdateSettingsRequest {
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default)]
    pub disable_registration: bool,
}
