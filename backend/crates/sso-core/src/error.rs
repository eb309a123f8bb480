use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid uid: {value} {location}")]
    InvalidUid {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid user field: {value} {location}")]
    InvalidUserField {
        value: String,
        location: ErrorLocation,
    },
}

pub type Result<T> = StdResult<T, CoreError>;
