use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

/// Where the tenant slug comes from when nothing is persisted yet
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TenantConfig {
    /// Hostname the portal is served from (e.g., "escola1.dominio.com")
    pub hostname: Option<String>,
}

impl TenantConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if let Some(hostname) = &self.hostname
            && (hostname.trim().is_empty() || hostname.contains('/'))
        {
            return Err(ConfigError::tenant(format!(
                "tenant.hostname must be a bare hostname, got '{hostname}'"
            )));
        }

        Ok(())
    }
}
