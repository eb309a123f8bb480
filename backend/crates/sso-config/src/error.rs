use std::fmt;
use std::panic::Location;
use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

/// Config file section an invalid value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    General,
    Server,
    Database,
    Site,
    Provider,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::General => "config",
            Self::Server => "[server]",
            Self::Database => "[database]",
            Self::Site => "[site]",
            Self::Provider => "[provider]",
        })
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {section}: {message} {location}")]
    Invalid {
        section: Section,
        message: String,
        location: ErrorLocation,
    },

    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[track_caller]
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::invalid(Section::General, message)
    }

    #[track_caller]
    pub fn database<S: Into<String>>(message: S) -> Self {
        Self::invalid(Section::Database, message)
    }

    #[track_caller]
    pub fn server<S: Into<String>>(message: S) -> Self {
        Self::invalid(Section::Server, message)
    }

    #[track_caller]
    pub fn site<S: Into<String>>(message: S) -> Self {
        Self::invalid(Section::Site, message)
    }

    #[track_caller]
    pub fn provider<S: Into<String>>(message: S) -> Self {
        Self::invalid(Section::Provider, message)
    }

    #[track_caller]
    fn invalid<S: Into<String>>(section: Section, message: S) -> Self {
        Self::Invalid {
            section,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Section at fault, `None` for I/O and parse errors
    pub fn section(&self) -> Option<Section> {
        match self {
            Self::Invalid { section, .. } => Some(*section),
            _ => None,
        }
    }
}

pub type ConfigErrorResult<T> = std::result::Result<T, ConfigError>;
