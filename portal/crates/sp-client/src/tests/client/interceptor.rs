use crate::tests::{Fixture, fixture, school_host, session_with_roles};
use crate::{ApiResponse, AuthFailureInterceptor, RequestContext, ResponseInterceptor};

use sp_auth::{Navigation, NavigationKind, Role, Storage, TENANT_STORAGE_KEY};

use reqwest::StatusCode;
use reqwest::header::HeaderMap;

fn signed_in() -> (Fixture, AuthFailureInterceptor) {
    let f = fixture(school_host());
    f.session
        .establish(session_with_roles(&[Role::Professor]))
        .unwrap();
    assert_eq!(f.tenant.resolve_tenant().as_deref(), Some("escola1"));

    let interceptor =
        AuthFailureInterceptor::new(f.session.clone(), f.tenant.clone(), f.navigator.clone());
    (f, interceptor)
}

fn respond(interceptor: &AuthFailureInterceptor, endpoint: &str, is_login: bool, status: StatusCode) {
    let context = RequestContext { endpoint, is_login };
    let response = ApiResponse::new(status, HeaderMap::new(), Vec::new());
    interceptor.on_response(&context, &response);
}

#[test]
fn given_403_from_api_when_intercepted_then_session_and_tenant_are_cleared() {
    let (f, interceptor) = signed_in();

    respond(&interceptor, "/api/v1/alunos", false, StatusCode::FORBIDDEN);

    assert!(f.session.current().is_none());
    assert!(f.storage.get(TENANT_STORAGE_KEY).unwrap().is_none());
    assert_eq!(
        f.navigator.last(),
        Some(Navigation {
            kind: NavigationKind::Hard,
            path: "/login?error=tenant-mismatch".to_string(),
        })
    );
}

#[test]
fn given_401_from_api_when_intercepted_then_session_cleared_and_tenant_kept() {
    let (f, interceptor) = signed_in();

    respond(&interceptor, "/api/v1/alunos", false, StatusCode::UNAUTHORIZED);

    assert!(f.session.current().is_none());
    assert!(f.storage.get(TENANT_STORAGE_KEY).unwrap().is_some());
    assert_eq!(f.tenant.resolve_tenant().as_deref(), Some("escola1"));
    assert_eq!(
        f.navigator.last(),
        Some(Navigation {
            kind: NavigationKind::Hard,
            path: "/login?error=unauthorized".to_string(),
        })
    );
}

#[test]
fn given_auth_failure_from_login_endpoint_when_intercepted_then_nothing_happens() {
    let (f, interceptor) = signed_in();

    respond(&interceptor, "/api/v1/login", true, StatusCode::UNAUTHORIZED);
    respond(&interceptor, "/api/v1/login", true, StatusCode::FORBIDDEN);

    assert!(f.session.current().is_some());
    assert!(f.navigator.history().is_empty());
}

#[test]
fn given_other_statuses_when_intercepted_then_session_is_untouched() {
    let (f, interceptor) = signed_in();

    for status in [
        StatusCode::OK,
        StatusCode::NOT_FOUND,
        StatusCode::INTERNAL_SERVER_ERROR,
    ] {
        respond(&interceptor, "/api/v1/alunos", false, status);
    }

    assert!(f.session.current().is_some());
    assert!(f.navigator.history().is_empty());
}

#[test]
fn given_no_session_when_403_intercepted_then_still_navigates() {
    let f = fixture(school_host());
    let interceptor =
        AuthFailureInterceptor::new(f.session.clone(), f.tenant.clone(), f.navigator.clone());

    respond(&interceptor, "/api/v1/alunos", false, StatusCode::FORBIDDEN);

    assert_eq!(f.navigator.history().len(), 1);
}
