use sso_core::Uid;
use sso_link::ResolutionKind;

use serde::Serialize;

/// Result of a completed provider callback
#[derive(Debug, Serialize)]
pub struct CallbackResponse {
    pub uid: Uid,
    pub kind: ResolutionKind,
    /// Present when the request was anonymous and a new session was started
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
}
