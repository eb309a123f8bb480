use crate::Uid;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Failure reported by a storage collaborator.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage backend error: {message} {location}")]
    Backend {
        message: String,
        location: ErrorLocation,
    },

    #[error("Duplicate {field}: '{value}' already exists {location}")]
    Duplicate {
        field: &'static str,
        value: String,
        location: ErrorLocation,
    },

    #[error("User {uid} not found {location}")]
    UserNotFound { uid: Uid, location: ErrorLocation },
}

impl StoreError {
    #[track_caller]
    pub fn backend<S: Into<String>>(message: S) -> Self {
        Self::Backend {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn duplicate<S: Into<String>>(field: &'static str, value: S) -> Self {
        Self::Duplicate {
            field,
            value: value.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn user_not_found(uid: Uid) -> Self {
        Self::UserNotFound {
            uid,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
