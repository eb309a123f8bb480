use sso_core::{StoreError, Uid};

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLx error: {source} {location}")]
    Sqlx {
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Migration error: {message} {location}")]
    Migration {
        message: String,
        location: ErrorLocation,
    },

    #[error("Database initialization failed: {message} {location}")]
    Initialization {
        message: String,
        location: ErrorLocation,
    },

    #[error("Unique constraint violated on {field}: '{value}' {location}")]
    UniqueViolation {
        field: &'static str,
        value: String,
        location: ErrorLocation,
    },

    #[error("User {uid} not found {location}")]
    UserNotFound { uid: Uid, location: ErrorLocation },

    #[error("Invalid row data: {message} {location}")]
    InvalidRow {
        message: String,
        location: ErrorLocation,
    },
}

impl From<sqlx::Error> for DbError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        Self::Sqlx {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl DbError {
    /// Map a write error, turning UNIQUE violations into [`DbError::UniqueViolation`].
    #[track_caller]
    pub(crate) fn from_write(source: sqlx::Error, field: &'static str, value: &str) -> Self {
        let unique = matches!(
            &source,
            sqlx::Error::Database(db_err) if db_err.is_unique_violation()
        );

        if unique {
            Self::UniqueViolation {
                field,
                value: value.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        } else {
            Self::Sqlx {
                source,
                location: ErrorLocation::from(Location::caller()),
            }
        }
    }
}

impl From<DbError> for StoreError {
    #[track_caller]
    fn from(e: DbError) -> Self {
        match e {
            DbError::UniqueViolation { field, value, .. } => StoreError::duplicate(field, value),
            DbError::UserNotFound { uid, .. } => StoreError::user_not_found(uid),
            other => {
                log::error!("Database error: {}", other);
                StoreError::backend(other.to_string())
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
