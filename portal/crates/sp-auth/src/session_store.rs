use crate::{AuthError, Result as AuthErrorResult, Role, Session, Storage};

use std::sync::{Arc, RwLock};

use log::{info, warn};

/// Fixed key the session is persisted under.
pub const SESSION_STORAGE_KEY: &str = "auth-storage";

/// Shared handle to the current session and its persisted copy.
///
/// Clones share the same state.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionStoreInner>,
}

struct SessionStoreInner {
    storage: Arc<dyn Storage>,
    current: RwLock<Option<Session>>,
}

impl SessionStore {
    /// Empty store; nothing is read from storage.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            inner: Arc::new(SessionStoreInner {
                storage,
                current: RwLock::new(None),
            }),
        }
    }

    /// Load the persisted session, if any.
    ///
    /// An unreadable document is quarantined and a document that fails
    /// validation is removed; both rehydrate as signed out.
    pub fn rehydrate(storage: Arc<dyn Storage>) -> AuthErrorResult<Self> {
        let store = Self::new(storage);

        let Some(raw) = store.inner.storage.get(SESSION_STORAGE_KEY)? else {
            info!("No persisted session");
            return Ok(store);
        };

        match serde_json::from_str::<Session>(&raw) {
            Ok(session) => match session.validate() {
                Ok(()) => {
                    info!(
                        "Rehydrated session for {} ({} roles)",
                        session.user.email,
                        session.user.roles.len()
                    );
                    store.set_current(Some(session));
                }
                Err(e) => {
                    warn!("Discarding persisted session: {e}");
                    store.inner.storage.remove(SESSION_STORAGE_KEY)?;
                }
            },
            Err(e) => {
                warn!("Persisted session is corrupted: {e}");
                store.inner.storage.quarantine(SESSION_STORAGE_KEY)?;
            }
        }

        Ok(store)
    }

    pub fn current(&self) -> Option<Session> {
        self.inner
            .current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn token(&self) -> Option<String> {
        self.inner
            .current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .map(|s| s.token.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner
            .current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .is_some_and(Session::is_valid)
    }

    /// Install a freshly created session and persist it.
    pub fn establish(&self, session: Session) -> AuthErrorResult<()> {
        session.validate()?;
        self.persist(&session)?;
        info!("Session established for {}", session.user.email);
        self.set_current(Some(session));
        Ok(())
    }

    /// Select the active role; returns the updated session.
    pub fn switch_role(&self, role: Role) -> AuthErrorResult<Session> {
        self.modify(|session| session.switch_role(role))
    }

    pub fn mark_password_changed(&self) -> AuthErrorResult<Session> {
        self.modify(|session| {
            session.mark_password_changed();
            Ok(())
        })
    }

    /// Drop the session from memory and storage.
    ///
    /// Memory is cleared even when the storage removal fails.
    pub fn clear(&self) -> AuthErrorResult<()> {
        let had_session = self
            .inner
            .current
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .take()
            .is_some();

        if had_session {
            info!("Session cleared");
        }

        self.inner.storage.remove(SESSION_STORAGE_KEY)
    }

    fn modify<F>(&self, change: F) -> AuthErrorResult<Session>
    where
        F: FnOnce(&mut Session) -> AuthErrorResult<()>,
    {
        let mut current = self
            .inner
            .current
            .write()
            .unwrap_or_else(|e| e.into_inner());

        let Some(session) = current.as_mut() else {
            return Err(AuthError::invalid_session("no signed-in user"));
        };

        let mut updated = session.clone();
        change(&mut updated)?;
        self.persist(&updated)?;
        *session = updated.clone();

        Ok(updated)
    }

    fn persist(&self, session: &Session) -> AuthErrorResult<()> {
        let json = serde_json::to_string(session)?;
        self.inner.storage.set(SESSION_STORAGE_KEY, &json)
    }

    fn set_current(&self, session: Option<Session>) {
        *self
            .inner
            .current
            .write()
            .unwrap_or_else(|e| e.into_inner()) = session;
    }
}
