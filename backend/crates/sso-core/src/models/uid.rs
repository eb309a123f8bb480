use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Local user identifier.
///
/// Always strictly positive. A uid of `0` (or below) is what the host uses for
/// "not logged in", so it is never a valid account reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Uid(i64);

impl Uid {
    #[track_caller]
    pub fn new(value: i64) -> CoreErrorResult<Self> {
        if value <= 0 {
            return Err(CoreError::InvalidUid {
                value: value.to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(Self(value))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for Uid {
    type Error = CoreError;

    #[track_caller]
    fn try_from(value: i64) -> CoreErrorResult<Self> {
        Self::new(value)
    }
}

impl From<Uid> for i64 {
    fn from(uid: Uid) -> Self {
        uid.0
    }
}

impl FromStr for Uid {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreErrorResult<Self> {
        let value = s.trim().parse::<i64>().map_err(|_| CoreError::InvalidUid {
            value: s.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;
        Self::new(value)
    }
}

impl std::fmt::Display for Uid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
