mod session;

use crate::{Role, Session, SessionUser};

pub(crate) fn user_with_roles(roles: &[Role]) -> SessionUser {
    SessionUser {
        id: "42".to_string(),
        name: "Maria Souza".to_string(),
        email: "maria@escola1.com".to_string(),
        roles: roles.iter().copied().collect(),
        is_first_access: false,
    }
}

pub(crate) fn session_with_roles(roles: &[Role]) -> Session {
    Session::new(user_with_roles(roles), "token-abc").unwrap()
}
