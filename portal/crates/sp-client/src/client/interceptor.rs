use crate::ApiResponse;

use sp_auth::{
    LOGIN_TENANT_MISMATCH_PATH, LOGIN_UNAUTHORIZED_PATH, Navigator, SessionStore, TenantResolver,
};

use std::sync::Arc;

use log::{debug, warn};
use reqwest::StatusCode;

/// What the client knows about the call a response belongs to.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext<'a> {
    pub endpoint: &'a str,
    pub is_login: bool,
}

/// Observes every completed response before it is returned to the caller.
pub trait ResponseInterceptor: Send + Sync {
    fn on_response(&self, context: &RequestContext<'_>, response: &ApiResponse);
}

/// Authorization failures that end the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    /// 403: the token belongs to another tenant.
    TenantMismatch,
    /// 401: the token is missing, expired or revoked.
    SessionExpired,
}

impl AuthFailure {
    pub fn from_status(status: StatusCode) -> Option<Self> {
        match status {
            StatusCode::FORBIDDEN => Some(AuthFailure::TenantMismatch),
            StatusCode::UNAUTHORIZED => Some(AuthFailure::SessionExpired),
            _ => None,
        }
    }

    pub fn redirect_path(&self) -> &'static str {
        match self {
            AuthFailure::TenantMismatch => LOGIN_TENANT_MISMATCH_PATH,
            AuthFailure::SessionExpired => LOGIN_UNAUTHORIZED_PATH,
        }
    }
}

/// Signs the user out on 401/403 and hard-navigates to the login page.
///
/// A 403 also forgets the tenant. Responses from the login endpoint are
/// ignored so failed credentials stay on the login form.
pub struct AuthFailureInterceptor {
    session: SessionStore,
    tenant: TenantResolver,
    navigator: Arc<dyn Navigator>,
}

impl AuthFailureInterceptor {
    pub fn new(session: SessionStore, tenant: TenantResolver, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            session,
            tenant,
            navigator,
        }
    }
}

impl ResponseInterceptor for AuthFailureInterceptor {
    fn on_response(&self, context: &RequestContext<'_>, response: &ApiResponse) {
        let Some(failure) = response.auth_failure() else {
            return;
        };

        if context.is_login {
            debug!(
                "Login endpoint returned {}, leaving session untouched",
                response.status()
            );
            return;
        }

        warn!(
            "{} returned {}, signing out",
            context.endpoint,
            response.status()
        );

        if let Err(e) = self.session.clear() {
            warn!("Failed to clear session: {e}");
        }

        if failure == AuthFailure::TenantMismatch
            && let Err(e) = self.tenant.clear()
        {
            warn!("Failed to clear tenant: {e}");
        }

        self.navigator.hard_navigate(failure.redirect_path());
    }
}
