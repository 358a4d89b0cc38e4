use crate::{ApiResponse, AuthFailure, ClientError};

use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde_json::json;

fn response(status: StatusCode, body: &str) -> ApiResponse {
    ApiResponse::new(status, HeaderMap::new(), body.as_bytes().to_vec())
}

#[test]
fn given_error_envelope_when_converting_then_code_and_message_are_used() {
    let body = json!({ "error": { "code": "NOT_FOUND", "message": "Aluno not found" } });
    let resp = response(StatusCode::NOT_FOUND, &body.to_string());

    match resp.to_api_error() {
        ClientError::Api {
            status,
            code,
            message,
            ..
        } => {
            assert_eq!(status, 404);
            assert_eq!(code, "NOT_FOUND");
            assert_eq!(message, "Aluno not found");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[test]
fn given_top_level_message_when_converting_then_it_is_used() {
    let resp = response(
        StatusCode::BAD_REQUEST,
        r#"{"message":"Invalid credentials"}"#,
    );

    let err = resp.to_api_error();

    assert_eq!(err.status(), Some(400));
    assert!(err.to_string().contains("Invalid credentials"));
    assert!(err.to_string().contains("HTTP_400"));
}

#[test]
fn given_non_json_body_when_converting_then_status_line_is_used() {
    let resp = response(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");

    let err = resp.to_api_error();

    assert!(err.to_string().contains("Internal Server Error"));
    assert!(err.to_string().contains("HTTP_500"));
}

#[test]
fn given_statuses_when_classifying_then_only_401_and_403_are_auth_failures() {
    assert_eq!(
        response(StatusCode::FORBIDDEN, "").auth_failure(),
        Some(AuthFailure::TenantMismatch)
    );
    assert_eq!(
        response(StatusCode::UNAUTHORIZED, "").auth_failure(),
        Some(AuthFailure::SessionExpired)
    );
    assert_eq!(response(StatusCode::NOT_FOUND, "").auth_failure(), None);
    assert_eq!(response(StatusCode::OK, "").auth_failure(), None);
}

#[test]
fn given_auth_failures_then_redirect_paths_carry_error_reason() {
    assert_eq!(
        AuthFailure::TenantMismatch.redirect_path(),
        "/login?error=tenant-mismatch"
    );
    assert_eq!(
        AuthFailure::SessionExpired.redirect_path(),
        "/login?error=unauthorized"
    );
}

#[test]
fn given_json_body_when_parsing_then_value_is_returned() {
    let resp = response(StatusCode::OK, r#"{"alunos":[]}"#);

    let value: serde_json::Value = resp.json().unwrap();

    assert!(resp.ok());
    assert!(value["alunos"].is_array());
}
