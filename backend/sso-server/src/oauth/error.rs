use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Failures while completing the authorization-code handshake
#[derive(Error, Debug)]
pub enum OAuthError {
    #[error("OAuth client credentials are not configured {location}")]
    NotConfigured { location: ErrorLocation },

    /// The provider refused the code: expired, reused or forged.
    #[error("Authorization code rejected: {message} {location}")]
    InvalidCode {
        message: String,
        location: ErrorLocation,
    },

    #[error("Provider request failed: {message} {location}")]
    Provider {
        message: String,
        location: ErrorLocation,
        #[source]
        source: Option<reqwest::Error>,
    },
}

impl OAuthError {
    #[track_caller]
    pub fn not_configured() -> Self {
        OAuthError::NotConfigured {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_code<S: Into<String>>(message: S) -> Self {
        OAuthError::InvalidCode {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn provider<S: Into<String>>(message: S) -> Self {
        OAuthError::Provider {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
            source: None,
        }
    }
}

impl From<reqwest::Error> for OAuthError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        OAuthError::Provider {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: Some(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, OAuthError>;
