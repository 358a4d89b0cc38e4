//! Session, tenant and route authorization for the school portal client.
//!
//! Nothing here performs network I/O. State that must survive restarts goes
//! through a `Storage` implementation injected by the caller.

pub mod error;
pub mod navigation;
pub mod role;
pub mod route_guard;
pub mod session;
pub mod session_store;
pub mod storage;
pub mod tenant_resolver;

pub use error::{AuthError, Result};
pub use navigation::{
    LOGIN_PATH, LOGIN_TENANT_MISMATCH_PATH, LOGIN_UNAUTHORIZED_PATH, Navigation, NavigationKind,
    Navigator, ROOT_PATH, RecordingNavigator,
};
pub use role::{REDIRECT_PRIORITY, Role};
pub use route_guard::{GuardDecision, GuardState, RouteGuard, evaluate, fallback_path};
pub use session::{Session, SessionUser};
pub use session_store::{SESSION_STORAGE_KEY, SessionStore};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use tenant_resolver::{
    HostnameSource, RESERVED_HOST_LABELS, StaticHostname, TENANT_STORAGE_KEY, TenantContext,
    TenantResolver, slug_from_hostname,
};

#[cfg(test)]
mod tests;
