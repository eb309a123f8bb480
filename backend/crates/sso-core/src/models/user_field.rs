use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// User record fields the linker reads or writes individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserField {
    Username,
    Email,
    EmailConfirmed,
    Fullname,
    Picture,
    UploadedPicture,
    ExternalId,
}

impl UserField {
    /// Storage column / wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Email => "email",
            Self::EmailConfirmed => "email_confirmed",
            Self::Fullname => "fullname",
            Self::Picture => "picture",
            Self::UploadedPicture => "uploaded_picture",
            Self::ExternalId => "external_id",
        }
    }

    /// Fields that may be cleared. Identity fields are mandatory.
    pub fn is_nullable(&self) -> bool {
        !matches!(self, Self::Username | Self::Email | Self::EmailConfirmed)
    }
}

impl FromStr for UserField {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreErrorResult<Self> {
        match s {
            "username" => Ok(Self::Username),
            "email" => Ok(Self::Email),
            "email_confirmed" => Ok(Self::EmailConfirmed),
            "fullname" => Ok(Self::Fullname),
            "picture" => Ok(Self::Picture),
            "uploaded_picture" => Ok(Self::UploadedPicture),
            "external_id" => Ok(Self::ExternalId),
            _ => Err(CoreError::InvalidUserField {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl std::fmt::Display for UserField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
