use crate::{
    ApiResponse, ClientError, ClientResult, RequestContext, RequestOptions, ResponseInterceptor,
};

use sp_auth::{Role, Session, SessionStore, SessionUser, TenantResolver};
use sp_config::DEFAULT_LOGIN_ENDPOINT;

use std::sync::Arc;

use log::{debug, info};
use reqwest::Client as ReqwestClient;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Header carrying the tenant slug on every non-login request.
pub const TENANT_HEADER: &str = "x-tenant-id";

pub const CHANGE_PASSWORD_ENDPOINT: &str = "/api/v1/auth/change-password";

#[derive(Debug, Deserialize)]
struct LoginResponse {
    user: SessionUser,
    token: String,
}

/// HTTP client for the school portal API.
///
/// Every request carries the session token and tenant slug. Responses pass
/// through the registered interceptors and are then returned unchanged.
pub struct Client {
    pub base_url: String,
    pub login_endpoint: String,
    session: SessionStore,
    tenant: TenantResolver,
    interceptors: Vec<Arc<dyn ResponseInterceptor>>,
    client: ReqwestClient,
}

impl Client {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - Server URL (e.g., "http://127.0.0.1:3333")
    /// * `session` - Session store supplying the bearer token
    /// * `tenant` - Resolver supplying the `x-tenant-id` value
    pub fn new(base_url: &str, session: SessionStore, tenant: TenantResolver) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            login_endpoint: DEFAULT_LOGIN_ENDPOINT.to_string(),
            session,
            tenant,
            interceptors: Vec::new(),
            client: ReqwestClient::new(),
        }
    }

    pub fn with_login_endpoint(mut self, endpoint: &str) -> Self {
        self.login_endpoint = endpoint.to_string();
        self
    }

    pub fn with_interceptor(mut self, interceptor: Arc<dyn ResponseInterceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn tenant(&self) -> &TenantResolver {
        &self.tenant
    }

    /// Whether `endpoint` is the login endpoint, ignoring query string and
    /// leading or trailing slashes.
    pub fn is_login_endpoint(&self, endpoint: &str) -> bool {
        fn normalize(path: &str) -> &str {
            let path = path.split(['?', '#']).next().unwrap_or(path);
            path.trim_matches('/')
        }
        normalize(endpoint) == normalize(&self.login_endpoint)
    }

    /// Headers sent for `endpoint`.
    ///
    /// Caller headers are kept except content type, authorization and tenant,
    /// which the client always controls. The tenant header is left out for
    /// the login endpoint and when no tenant resolves.
    pub fn build_headers(&self, endpoint: &str, caller: &HeaderMap) -> ClientResult<HeaderMap> {
        let mut headers = caller.clone();
        headers.remove(AUTHORIZATION);
        headers.remove(TENANT_HEADER);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = self.session.token() {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| ClientError::invalid_header(AUTHORIZATION.as_str(), e))?;
            headers.insert(AUTHORIZATION, value);
        }

        if !self.is_login_endpoint(endpoint)
            && let Some(slug) = self.tenant.resolve_tenant()
        {
            let value = HeaderValue::from_str(&slug)
                .map_err(|e| ClientError::invalid_header(TENANT_HEADER, e))?;
            headers.insert(TENANT_HEADER, value);
        }

        Ok(headers)
    }

    pub fn url(&self, endpoint: &str) -> String {
        if endpoint.starts_with('/') {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}/{}", self.base_url, endpoint)
        }
    }

    /// Send a request and return the raw response.
    ///
    /// Non-success statuses are not errors here; only transport failures are.
    /// 401/403 side effects happen in the interceptors before this returns.
    pub async fn request(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> ClientResult<ApiResponse> {
        let headers = self.build_headers(endpoint, &options.headers)?;
        let url = self.url(endpoint);
        debug!("{} {}", options.method, url);

        let mut req = self.client.request(options.method, &url).headers(headers);
        if let Some(body) = options.body {
            req = req.json(&body);
        }

        let response = req.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();
        let response = ApiResponse::new(status, headers, body);

        let context = RequestContext {
            endpoint,
            is_login: self.is_login_endpoint(endpoint),
        };
        for interceptor in &self.interceptors {
            interceptor.on_response(&context, &response);
        }

        Ok(response)
    }

    /// GET `endpoint` and parse the body; non-success becomes `ClientError::Api`.
    pub async fn get_json(&self, endpoint: &str) -> ClientResult<Value> {
        let response = self.request(endpoint, RequestOptions::get()).await?;
        Self::into_json(response)
    }

    pub async fn send_json<B: Serialize>(
        &self,
        method: reqwest::Method,
        endpoint: &str,
        body: &B,
    ) -> ClientResult<Value> {
        let options = RequestOptions::with_json(method, body)?;
        let response = self.request(endpoint, options).await?;
        Self::into_json(response)
    }

    fn into_json(response: ApiResponse) -> ClientResult<Value> {
        if !response.ok() {
            return Err(response.to_api_error());
        }
        if response.body().is_empty() {
            return Ok(Value::Null);
        }
        response.json()
    }

    // =========================================================================
    // Session Operations
    // =========================================================================

    /// Sign in and persist the returned session.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<Session> {
        #[derive(Serialize)]
        struct LoginRequest<'a> {
            email: &'a str,
            password: &'a str,
        }

        let endpoint = self.login_endpoint.clone();
        let options = RequestOptions::post(&LoginRequest { email, password })?;
        let response = self.request(&endpoint, options).await?;
        if !response.ok() {
            return Err(response.to_api_error());
        }

        let LoginResponse { user, token } = response.json()?;
        let session = Session::new(user, token)?;
        self.session.establish(session.clone())?;
        info!("Signed in as {}", session.user.email);

        Ok(session)
    }

    /// Sign out locally. The tenant is kept.
    pub fn logout(&self) -> ClientResult<()> {
        self.session.clear()?;
        Ok(())
    }

    /// Change the password and clear the first-access flag.
    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> ClientResult<Session> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct ChangePasswordRequest<'a> {
            current_password: &'a str,
            new_password: &'a str,
        }

        if !self.session.is_authenticated() {
            return Err(ClientError::not_authenticated());
        }

        let body = ChangePasswordRequest {
            current_password,
            new_password,
        };
        self.send_json(reqwest::Method::POST, CHANGE_PASSWORD_ENDPOINT, &body)
            .await?;

        Ok(self.session.mark_password_changed()?)
    }

    /// Make `role` active and return its dashboard path.
    pub fn switch_role(&self, role: Role) -> ClientResult<&'static str> {
        if !self.session.is_authenticated() {
            return Err(ClientError::not_authenticated());
        }
        self.session.switch_role(role)?;
        Ok(role.dashboard_path())
    }
}
