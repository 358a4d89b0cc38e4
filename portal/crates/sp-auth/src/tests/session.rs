use crate::tests::{session_with_roles, user_with_roles};
use crate::{AuthError, Role, Session};

#[test]
fn given_empty_token_when_new_then_invalid_session() {
    let result = Session::new(user_with_roles(&[Role::Admin]), "  ");
    assert!(matches!(result, Err(AuthError::InvalidSession { .. })));
}

#[test]
fn given_no_roles_when_new_then_invalid_session() {
    let result = Session::new(user_with_roles(&[]), "token");
    assert!(matches!(result, Err(AuthError::InvalidSession { .. })));
}

#[test]
fn given_held_role_when_switch_role_then_active_role_set() {
    let mut session = session_with_roles(&[Role::Admin, Role::Professor]);

    session.switch_role(Role::Professor).unwrap();

    assert_eq!(session.active_role, Some(Role::Professor));
    assert_eq!(session.home_role(), Some(Role::Professor));
}

#[test]
fn given_role_not_held_when_switch_role_then_error_and_unchanged() {
    let mut session = session_with_roles(&[Role::Professor]);

    let result = session.switch_role(Role::Admin);

    assert!(matches!(result, Err(AuthError::RoleNotHeld { role: Role::Admin, .. })));
    assert_eq!(session.active_role, None);
}

#[test]
fn given_active_role_outside_role_set_when_validate_then_error() {
    let mut session = session_with_roles(&[Role::Responsavel]);
    session.active_role = Some(Role::Admin);

    assert!(!session.is_valid());
}

#[test]
fn given_several_roles_when_has_any_role_then_overlap_semantics() {
    let session = session_with_roles(&[Role::Admin, Role::Professor]);

    assert!(session.has_any_role(&[Role::Professor]));
    assert!(session.has_any_role(&[Role::Responsavel, Role::Admin]));
    assert!(!session.has_any_role(&[Role::Responsavel]));
    assert!(!session.has_any_role(&[]));
}

#[test]
fn given_login_payload_when_deserialized_then_camel_case_fields_read() {
    let json = r#"{
        "user": {
            "id": "7",
            "name": "João",
            "email": "joao@escola1.com",
            "roles": ["responsavel"],
            "isFirstAccess": true
        },
        "token": "jwt"
    }"#;

    let session: Session = serde_json::from_str(json).unwrap();

    assert!(session.user.is_first_access);
    assert!(session.has_role(Role::Responsavel));
    assert_eq!(session.active_role, None);
    assert!(session.is_valid());
}

#[test]
fn given_first_access_when_password_changed_then_flag_cleared() {
    let mut user = user_with_roles(&[Role::Professor]);
    user.is_first_access = true;
    let mut session = Session::new(user, "token").unwrap();

    session.mark_password_changed();

    assert!(!session.user.is_first_access);
}
