use sso_core::{StoreError, Uid};

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LinkError {
    /// A collaborator read or write failed.
    #[error("Storage error{}: {source} {location}", uid_suffix(.uid))]
    Storage {
        uid: Option<Uid>,
        #[source]
        source: StoreError,
        location: ErrorLocation,
    },

    /// Administrative policy refuses new accounts through this provider.
    #[error("Registration via {provider} SSO is disabled {location}")]
    RegistrationDisabled {
        provider: String,
        location: ErrorLocation,
    },

    /// Lost a race with a concurrent account creation for the same email.
    #[error("An account with email '{email}' was created concurrently {location}")]
    Duplicate {
        email: String,
        location: ErrorLocation,
    },

    #[error("Invalid external identity: {message} {location}")]
    InvalidIdentity {
        message: String,
        location: ErrorLocation,
    },
}

impl LinkError {
    /// Wrap a store failure, keeping the uid for diagnostics.
    #[track_caller]
    pub fn storage(source: StoreError, uid: Option<Uid>) -> Self {
        match source {
            StoreError::Duplicate {
                field: "email",
                value,
                ..
            } => Self::Duplicate {
                email: value,
                location: ErrorLocation::from(Location::caller()),
            },
            source => Self::Storage {
                uid,
                source,
                location: ErrorLocation::from(Location::caller()),
            },
        }
    }

    #[track_caller]
    pub fn registration_disabled<S: Into<String>>(provider: S) -> Self {
        Self::RegistrationDisabled {
            provider: provider.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Whether repeating the whole operation may succeed: backend outages
    /// and lost creation races are, missing users and policy refusals are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Duplicate { .. } => true,
            Self::Storage { source, .. } => matches!(source, StoreError::Backend { .. }),
            Self::RegistrationDisabled { .. } | Self::InvalidIdentity { .. } => false,
        }
    }

    /// Stable short name for logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Storage { .. } => "storage",
            Self::RegistrationDisabled { .. } => "registration_disabled",
            Self::Duplicate { .. } => "duplicate",
            Self::InvalidIdentity { .. } => "invalid_identity",
        }
    }

    pub fn uid(&self) -> Option<Uid> {
        match self {
            Self::Storage { uid, .. } => *uid,
            _ => None,
        }
    }
}

impl From<StoreError> for LinkError {
    #[track_caller]
    fn from(source: StoreError) -> Self {
        Self::storage(source, None)
    }
}

fn uid_suffix(uid: &Option<Uid>) -> String {
    uid.map(|u| format!(" for uid {}", u)).unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, LinkError>;
