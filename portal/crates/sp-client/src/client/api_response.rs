use crate::{AuthFailure, ClientError, ClientResult};

use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Raw response returned to the caller in every case, including after an
/// authorization failure has already signed the user out.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Status is 2xx.
    pub fn ok(&self) -> bool {
        self.status.is_success()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> ClientResult<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    pub fn auth_failure(&self) -> Option<AuthFailure> {
        AuthFailure::from_status(self.status)
    }

    /// Build the error for a non-success response.
    ///
    /// Reads `{"error": {"code", "message"}}` or a top-level `message`, and
    /// falls back to the status line.
    #[track_caller]
    pub fn to_api_error(&self) -> ClientError {
        let body: Option<Value> = serde_json::from_slice(&self.body).ok();
        let error = body.as_ref().and_then(|b| b.get("error"));

        let code = error
            .and_then(|e| e.get("code"))
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP_{}", self.status.as_u16()));

        let message = error
            .and_then(|e| e.get("message"))
            .or_else(|| body.as_ref().and_then(|b| b.get("message")))
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| {
                self.status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            });

        ClientError::api_error(self.status.as_u16(), code, message)
    }
}
