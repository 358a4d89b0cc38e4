use crate::{AuthError, Result as AuthErrorResult, Role};

use std::collections::BTreeSet;
use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Identity of the signed-in user as returned by the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub roles: BTreeSet<Role>,
    /// Set until the user replaces the password they were provisioned with
    #[serde(default)]
    pub is_first_access: bool,
}

/// Authenticated identity plus bearer token.
///
/// The role set is fixed at login. `active_role` is a UI selection among those
/// roles and is never re-authenticated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user: SessionUser,
    pub token: String,
    #[serde(default)]
    pub active_role: Option<Role>,
}

impl Session {
    /// Build a session from a login result.
    #[track_caller]
    pub fn new(user: SessionUser, token: impl Into<String>) -> AuthErrorResult<Self> {
        let session = Self {
            user,
            token: token.into(),
            active_role: None,
        };
        session.validate()?;
        Ok(session)
    }

    /// Check the invariants a usable session must hold.
    #[track_caller]
    pub fn validate(&self) -> AuthErrorResult<()> {
        if self.token.trim().is_empty() {
            return Err(AuthError::invalid_session("bearer token is empty"));
        }
        if self.user.roles.is_empty() {
            return Err(AuthError::invalid_session("user holds no roles"));
        }
        if let Some(active) = self.active_role
            && !self.user.roles.contains(&active)
        {
            return Err(AuthError::invalid_session(format!(
                "active role {active} is not among the user's roles"
            )));
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn roles(&self) -> &BTreeSet<Role> {
        &self.user.roles
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.user.roles.contains(&role)
    }

    /// Any-overlap check against a required-role list.
    pub fn has_any_role(&self, allowed: &[Role]) -> bool {
        allowed.iter().any(|role| self.has_role(*role))
    }

    /// Select the role the UI routes by.
    #[track_caller]
    pub fn switch_role(&mut self, role: Role) -> AuthErrorResult<()> {
        if !self.has_role(role) {
            return Err(AuthError::RoleNotHeld {
                role,
                location: ErrorLocation::from(Location::caller()),
            });
        }
        self.active_role = Some(role);
        Ok(())
    }

    /// Role used for landing pages: the active one, else the first held role in `Role::ALL` order.
    pub fn home_role(&self) -> Option<Role> {
        self.active_role.or_else(|| {
            Role::ALL
                .iter()
                .copied()
                .find(|role| self.user.roles.contains(role))
        })
    }

    pub fn mark_password_changed(&mut self) {
        self.user.is_first_access = false;
    }
}
