use serde::Serialize;

/// Data for the "disconnect account" confirmation page
#[derive(Debug, Serialize)]
pub struct DeauthView {
    pub service: String,
}
