use crate::{AuthError, Result as AuthErrorResult};

use std::fmt;
use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Order in which a user's roles are tried when picking a dashboard to send
/// them to after a role mismatch. `PlatformAdmin` is not part of it.
pub const REDIRECT_PRIORITY: [Role; 3] = [Role::Admin, Role::Professor, Role::Responsavel];

/// Permission class of a portal user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    Admin,
    Professor,
    Responsavel,
    PlatformAdmin,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Admin,
        Role::Professor,
        Role::Responsavel,
        Role::PlatformAdmin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Professor => "PROFESSOR",
            Self::Responsavel => "RESPONSAVEL",
            Self::PlatformAdmin => "PLATFORM_ADMIN",
        }
    }

    /// Root of the portal section owned by this role.
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Self::Admin => "/admin/dashboard",
            Self::Professor => "/professor/dashboard",
            Self::Responsavel => "/responsavel/dashboard",
            Self::PlatformAdmin => "/platform/dashboard",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Admin => "Administrador",
            Self::Professor => "Professor",
            Self::Responsavel => "Responsável",
            Self::PlatformAdmin => "Administrador da Plataforma",
        }
    }

    /// Parse a list of role names, failing on the first unknown one.
    pub fn parse_list<S: AsRef<str>>(names: &[S]) -> AuthErrorResult<Vec<Role>> {
        names.iter().map(|n| n.as_ref().parse()).collect()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthError;

    #[track_caller]
    fn from_str(s: &str) -> AuthErrorResult<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Self::Admin),
            "PROFESSOR" => Ok(Self::Professor),
            "RESPONSAVEL" => Ok(Self::Responsavel),
            "PLATFORM_ADMIN" => Ok(Self::PlatformAdmin),
            _ => Err(AuthError::UnknownRole {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
