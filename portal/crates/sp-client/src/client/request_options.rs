use crate::ClientResult;

use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde_json::Value;

/// Per-call request settings.
///
/// Headers given here are sent unless the client computes the same header
/// itself (content type, authorization, tenant).
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn delete() -> Self {
        Self {
            method: Method::DELETE,
            ..Self::default()
        }
    }

    pub fn post<T: Serialize>(body: &T) -> ClientResult<Self> {
        Self::with_json(Method::POST, body)
    }

    pub fn put<T: Serialize>(body: &T) -> ClientResult<Self> {
        Self::with_json(Method::PUT, body)
    }

    pub fn with_json<T: Serialize>(method: Method, body: &T) -> ClientResult<Self> {
        Ok(Self {
            method,
            headers: HeaderMap::new(),
            body: Some(serde_json::to_value(body)?),
        })
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}
