use serde::Deserialize;

/// Query string the provider appends when redirecting back
#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    /// Set instead of `code` when the user declined, e.g. `access_denied`
    pub error: Option<String>,
    pub error_description: Option<String>,
}
