use crate::{ConfigError, ConfigErrorResult, DEFAULT_API_BASE_URL, DEFAULT_LOGIN_ENDPOINT};

use serde::Deserialize;

/// Configuration for the backend REST API
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Backend base URL (e.g., "https://api.escola.com.br")
    pub base_url: String,
    /// Path of the credentials endpoint; never carries the tenant header
    pub login_endpoint: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            login_endpoint: DEFAULT_LOGIN_ENDPOINT.to_string(),
        }
    }
}

impl ApiConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::api(format!(
                "api.base_url must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }

        if !self.login_endpoint.starts_with('/') {
            return Err(ConfigError::api(format!(
                "api.login_endpoint must be an absolute path, got '{}'",
                self.login_endpoint
            )));
        }

        Ok(())
    }
}
