//! Page-level authorization by role.
//!
//! `evaluate` is the pure transition: given the current session and the
//! page's allowed roles it decides between rendering and redirecting.
//! `RouteGuard` keeps the resulting state for one mounted page and issues the
//! client-side navigation when a redirect is decided.

use crate::{
    LOGIN_PATH, Navigator, REDIRECT_PRIORITY, ROOT_PATH, Result as AuthErrorResult, Role, Session,
};

use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// Not evaluated yet; nothing is rendered
    Pending,
    Authorized,
    Unauthorized,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    Redirect(String),
}

/// Decide whether a page may render for `session`.
///
/// - no valid session: redirect to the login page
/// - any held role in `allowed`: render
/// - otherwise: redirect to the user's own dashboard
pub fn evaluate(session: Option<&Session>, allowed: &[Role]) -> GuardDecision {
    let Some(session) = session.filter(|s| s.is_valid()) else {
        return GuardDecision::Redirect(LOGIN_PATH.to_string());
    };

    if session.has_any_role(allowed) {
        GuardDecision::Render
    } else {
        GuardDecision::Redirect(fallback_path(session).to_string())
    }
}

/// Dashboard for a user who landed on a page their roles don't allow.
pub fn fallback_path(session: &Session) -> &'static str {
    REDIRECT_PRIORITY
        .iter()
        .find(|role| session.has_role(**role))
        .map(Role::dashboard_path)
        .unwrap_or(ROOT_PATH)
}

/// Authorization state of one mounted page.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    allowed: Vec<Role>,
    state: GuardState,
    redirected_to: Option<String>,
}

impl RouteGuard {
    pub fn new(allowed: impl IntoIterator<Item = Role>) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
            state: GuardState::Pending,
            redirected_to: None,
        }
    }

    /// Build from role names as written in route tables; case is ignored.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> AuthErrorResult<Self> {
        Ok(Self::new(Role::parse_list(names)?))
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    pub fn should_render(&self) -> bool {
        self.state == GuardState::Authorized
    }

    pub fn allowed_roles(&self) -> &[Role] {
        &self.allowed
    }

    /// Replace the allowed roles. Takes effect on the next `evaluate`.
    pub fn set_allowed_roles(&mut self, allowed: impl IntoIterator<Item = Role>) {
        self.allowed = allowed.into_iter().collect();
    }

    /// Re-run the transition. Called whenever the session, tenant or allowed
    /// roles change.
    ///
    /// A redirect is pushed once per distinct target; repeating an evaluation
    /// with the same outcome does not navigate again.
    pub fn evaluate(&mut self, session: Option<&Session>, navigator: &dyn Navigator) -> GuardState {
        match evaluate(session, &self.allowed) {
            GuardDecision::Render => {
                self.state = GuardState::Authorized;
                self.redirected_to = None;
            }
            GuardDecision::Redirect(path) => {
                self.state = GuardState::Unauthorized;
                if self.redirected_to.as_deref() != Some(path.as_str()) {
                    debug!("Route guard redirecting to {path}");
                    navigator.push(&path);
                    self.redirected_to = Some(path);
                }
            }
        }

        self.state
    }
}
