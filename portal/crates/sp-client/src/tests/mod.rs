mod client;

use sp_auth::{
    MemoryStorage, RecordingNavigator, Role, Session, SessionStore, SessionUser, StaticHostname,
    TenantResolver,
};

use std::sync::Arc;

pub(crate) fn session_with_roles(roles: &[Role]) -> Session {
    let user = SessionUser {
        id: "user-1".to_string(),
        name: "Maria Souza".to_string(),
        email: "maria@escola1.com".to_string(),
        roles: roles.iter().copied().collect(),
        is_first_access: false,
    };
    Session::new(user, "token-abc").expect("valid session")
}

pub(crate) struct Fixture {
    pub storage: Arc<MemoryStorage>,
    pub session: SessionStore,
    pub tenant: TenantResolver,
    pub navigator: Arc<RecordingNavigator>,
}

pub(crate) fn fixture(hostname: StaticHostname) -> Fixture {
    let storage = Arc::new(MemoryStorage::new());
    Fixture {
        session: SessionStore::new(storage.clone()),
        tenant: TenantResolver::new(storage.clone(), hostname),
        navigator: Arc::new(RecordingNavigator::new()),
        storage,
    }
}

pub(crate) fn school_host() -> StaticHostname {
    StaticHostname::new("escola1.dominio.com")
}
