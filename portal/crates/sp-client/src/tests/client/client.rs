use crate::tests::{fixture, school_host, session_with_roles};
use crate::{Client, RequestOptions, TENANT_HEADER};

use sp_auth::{Role, StaticHostname};

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::json;

fn client_for(hostname: StaticHostname) -> (Client, crate::tests::Fixture) {
    let f = fixture(hostname);
    let client = Client::new("http://localhost:3333", f.session.clone(), f.tenant.clone());
    (client, f)
}

#[test]
fn given_trailing_slash_when_creating_client_then_base_url_is_trimmed() {
    let f = fixture(StaticHostname::unknown());
    let client = Client::new("http://localhost:3333/", f.session, f.tenant);
    assert_eq!(client.base_url, "http://localhost:3333");
}

#[test]
fn given_relative_endpoint_when_building_url_then_slash_is_inserted() {
    let (client, _f) = client_for(StaticHostname::unknown());
    assert_eq!(client.url("/api/v1/alunos"), "http://localhost:3333/api/v1/alunos");
    assert_eq!(client.url("api/v1/alunos"), "http://localhost:3333/api/v1/alunos");
}

#[test]
fn given_default_client_when_checking_login_endpoint_then_query_and_trailing_slash_are_ignored() {
    let (client, _f) = client_for(StaticHostname::unknown());

    assert!(client.is_login_endpoint("/api/v1/login"));
    assert!(client.is_login_endpoint("/api/v1/login/"));
    assert!(client.is_login_endpoint("/api/v1/login?redirect=/admin"));
    assert!(client.is_login_endpoint("api/v1/login"));
    assert!(!client.is_login_endpoint("/api/v1/login-history"));
    assert!(!client.is_login_endpoint("/api/v1/alunos"));
}

#[test]
fn given_custom_login_endpoint_when_checking_then_only_it_matches() {
    let (client, _f) = client_for(StaticHostname::unknown());
    let client = client.with_login_endpoint("/auth/sessions");

    assert!(client.is_login_endpoint("/auth/sessions"));
    assert!(!client.is_login_endpoint("/api/v1/login"));
}

#[test]
fn given_resolvable_tenant_when_building_headers_for_login_then_tenant_header_is_absent() {
    let (client, _f) = client_for(school_host());

    let headers = client
        .build_headers("/api/v1/login", &HeaderMap::new())
        .unwrap();

    assert!(headers.get(TENANT_HEADER).is_none());
    assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
}

#[test]
fn given_resolvable_tenant_when_building_headers_for_other_endpoint_then_tenant_header_is_set() {
    let (client, _f) = client_for(school_host());

    let headers = client
        .build_headers("/api/v1/alunos", &HeaderMap::new())
        .unwrap();

    assert_eq!(headers.get(TENANT_HEADER).unwrap(), "escola1");
}

#[test]
fn given_unresolvable_tenant_when_building_headers_then_tenant_header_is_omitted() {
    let (client, _f) = client_for(StaticHostname::new("localhost:3000"));

    let headers = client
        .build_headers("/api/v1/alunos", &HeaderMap::new())
        .unwrap();

    assert!(headers.get(TENANT_HEADER).is_none());
}

#[test]
fn given_no_session_when_building_headers_then_authorization_is_absent() {
    let (client, _f) = client_for(school_host());

    let headers = client
        .build_headers("/api/v1/alunos", &HeaderMap::new())
        .unwrap();

    assert!(headers.get(AUTHORIZATION).is_none());
}

#[test]
fn given_session_when_caller_passes_authorization_then_session_token_wins() {
    let (client, f) = client_for(school_host());
    f.session
        .establish(session_with_roles(&[Role::Professor]))
        .unwrap();

    let mut caller = HeaderMap::new();
    caller.insert(AUTHORIZATION, HeaderValue::from_static("Bearer forged"));
    caller.insert(TENANT_HEADER, HeaderValue::from_static("escola2"));
    caller.insert("x-request-id", HeaderValue::from_static("req-1"));

    let headers = client.build_headers("/api/v1/alunos", &caller).unwrap();

    assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer token-abc");
    assert_eq!(headers.get(TENANT_HEADER).unwrap(), "escola1");
    assert_eq!(headers.get("x-request-id").unwrap(), "req-1");
}

#[test]
fn given_login_path_without_leading_slash_when_building_headers_then_tenant_header_is_absent() {
    let (client, _f) = client_for(school_host());

    let headers = client
        .build_headers("api/v1/login", &HeaderMap::new())
        .unwrap();

    assert!(headers.get(TENANT_HEADER).is_none());
}

#[test]
fn given_caller_tenant_header_when_calling_login_then_it_is_dropped() {
    let (client, _f) = client_for(school_host());

    let mut caller = HeaderMap::new();
    caller.insert(TENANT_HEADER, HeaderValue::from_static("escola2"));

    let headers = client.build_headers("/api/v1/login", &caller).unwrap();

    assert!(headers.get(TENANT_HEADER).is_none());
}

#[test]
fn given_caller_content_type_when_building_headers_then_json_is_forced() {
    let (client, _f) = client_for(StaticHostname::unknown());

    let mut caller = HeaderMap::new();
    caller.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));

    let headers = client.build_headers("/api/v1/alunos", &caller).unwrap();

    assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
}

#[test]
fn given_no_session_when_switching_role_then_not_authenticated() {
    let (client, _f) = client_for(StaticHostname::unknown());

    let result = client.switch_role(Role::Admin);

    assert!(matches!(
        result,
        Err(crate::ClientError::NotAuthenticated { .. })
    ));
}

#[test]
fn given_held_role_when_switching_then_dashboard_path_is_returned() {
    let (client, f) = client_for(StaticHostname::unknown());
    f.session
        .establish(session_with_roles(&[Role::Admin, Role::Professor]))
        .unwrap();

    let dashboard = client.switch_role(Role::Professor).unwrap();

    assert_eq!(dashboard, "/professor/dashboard");
    assert_eq!(
        f.session.current().unwrap().active_role,
        Some(Role::Professor)
    );
}

#[test]
fn given_post_options_when_built_then_method_and_body_are_set() {
    let options = RequestOptions::post(&json!({ "nome": "Turma A" })).unwrap();

    assert_eq!(options.method, Method::POST);
    assert_eq!(options.body, Some(json!({ "nome": "Turma A" })));
    assert!(options.headers.is_empty());
}

#[test]
fn given_default_options_then_method_is_get_without_body() {
    let options = RequestOptions::get();

    assert_eq!(options.method, Method::GET);
    assert!(options.body.is_none());
}
