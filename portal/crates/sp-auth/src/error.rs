use crate::Role;

use std::panic::Location;
use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Unknown role '{value}' {location}")]
    UnknownRole {
        value: String,
        location: ErrorLocation,
    },

    #[error("Role {role} is not held by the signed-in user {location}")]
    RoleNotHeld { role: Role, location: ErrorLocation },

    #[error("Invalid session: {message} {location}")]
    InvalidSession {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid tenant slug '{value}' {location}")]
    InvalidTenant {
        value: String,
        location: ErrorLocation,
    },

    #[error("Storage IO error at {path}: {source} {location}")]
    StorageIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Failed to serialize persisted state: {source} {location}")]
    Serialization {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },
}

impl AuthError {
    #[track_caller]
    pub fn invalid_session<S: Into<String>>(message: S) -> Self {
        Self::InvalidSession {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn storage_io(path: PathBuf, source: std::io::Error) -> Self {
        Self::StorageIo {
            path,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for AuthError {
    #[track_caller]
    fn from(source: serde_json::Error) -> Self {
        Self::Serialization {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
