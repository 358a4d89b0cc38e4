//! Tenant slug resolution.
//!
//! The slug identifies one school in the multi-tenant deployment. It is taken
//! from persisted state when available, otherwise derived from the first label
//! of a `<tenant>.<domain>.<tld>` hostname and persisted for later calls.

use crate::{AuthError, Result as AuthErrorResult, Storage};

use std::net::IpAddr;
use std::panic::Location;
use std::sync::{Arc, RwLock};

use error_location::ErrorLocation;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// Fixed key the tenant is persisted under.
pub const TENANT_STORAGE_KEY: &str = "tenant-id";

/// Labels that never name a tenant, even in first position.
pub const RESERVED_HOST_LABELS: &[&str] = &["www"];

const MIN_HOST_LABELS: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantContext {
    pub tenant_slug: Option<String>,
}

/// Supplies the hostname the portal is being served from.
pub trait HostnameSource: Send + Sync {
    fn hostname(&self) -> Option<String>;
}

/// Hostname fixed at construction (configuration, command line).
#[derive(Debug, Clone, Default)]
pub struct StaticHostname(Option<String>);

impl StaticHostname {
    pub fn new(hostname: impl Into<String>) -> Self {
        Self(Some(hostname.into()))
    }

    /// No hostname available; only persisted or explicit tenants resolve.
    pub fn unknown() -> Self {
        Self(None)
    }
}

impl From<Option<String>> for StaticHostname {
    fn from(hostname: Option<String>) -> Self {
        Self(hostname)
    }
}

impl HostnameSource for StaticHostname {
    fn hostname(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Derive a tenant slug from a hostname.
///
/// Returns `None` for IP addresses, hosts with fewer than three labels, empty
/// labels, or a reserved first label.
pub fn slug_from_hostname(hostname: &str) -> Option<String> {
    let host = hostname.trim().trim_end_matches('.').to_ascii_lowercase();

    if host.is_empty() || host.starts_with('[') || host.parse::<IpAddr>().is_ok() {
        return None;
    }

    let host = match host.rsplit_once(':') {
        Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name.to_string(),
        Some(_) => return None,
        None => host,
    };

    if host.parse::<IpAddr>().is_ok() {
        return None;
    }

    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() < MIN_HOST_LABELS || labels.iter().any(|l| l.is_empty()) {
        return None;
    }

    let first = labels[0];
    if RESERVED_HOST_LABELS.contains(&first) || !is_valid_slug(first) {
        return None;
    }

    Some(first.to_string())
}

fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Shared handle resolving and caching the tenant slug.
///
/// Clones share the same state.
#[derive(Clone)]
pub struct TenantResolver {
    inner: Arc<TenantResolverInner>,
}

struct TenantResolverInner {
    storage: Arc<dyn Storage>,
    hostname: Box<dyn HostnameSource>,
    cached: RwLock<Option<String>>,
}

impl TenantResolver {
    pub fn new(storage: Arc<dyn Storage>, hostname: impl HostnameSource + 'static) -> Self {
        Self {
            inner: Arc::new(TenantResolverInner {
                storage,
                hostname: Box::new(hostname),
                cached: RwLock::new(None),
            }),
        }
    }

    /// Resolve the tenant slug.
    ///
    /// Persisted state wins; the hostname is only consulted when nothing is
    /// persisted. Storage failures are logged and never surface here.
    pub fn resolve_tenant(&self) -> Option<String> {
        if let Some(slug) = self.cached() {
            return Some(slug);
        }

        if let Some(slug) = self.load_persisted() {
            self.set_cached(Some(slug.clone()));
            return Some(slug);
        }

        let hostname = self.inner.hostname.hostname()?;
        let Some(slug) = slug_from_hostname(&hostname) else {
            debug!("No tenant in hostname '{hostname}'");
            return None;
        };

        if let Err(e) = self.persist(&slug) {
            warn!("Failed to persist tenant '{slug}': {e}");
        }
        info!("Resolved tenant '{slug}' from hostname '{hostname}'");
        self.set_cached(Some(slug.clone()));

        Some(slug)
    }

    pub fn context(&self) -> TenantContext {
        TenantContext {
            tenant_slug: self.resolve_tenant(),
        }
    }

    /// Explicitly select a tenant and persist it.
    #[track_caller]
    pub fn set_tenant(&self, slug: &str) -> AuthErrorResult<()> {
        let slug = slug.trim().to_ascii_lowercase();
        if !is_valid_slug(&slug) {
            return Err(AuthError::InvalidTenant {
                value: slug,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        self.persist(&slug)?;
        info!("Tenant set to '{slug}'");
        self.set_cached(Some(slug));
        Ok(())
    }

    /// Forget the tenant; the next resolution derives it again.
    pub fn clear(&self) -> AuthErrorResult<()> {
        self.set_cached(None);
        self.inner.storage.remove(TENANT_STORAGE_KEY)?;
        info!("Tenant cleared");
        Ok(())
    }

    fn load_persisted(&self) -> Option<String> {
        let raw = match self.inner.storage.get(TENANT_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to read persisted tenant: {e}");
                return None;
            }
        };

        match serde_json::from_str::<TenantContext>(&raw) {
            Ok(context) => context.tenant_slug.filter(|slug| is_valid_slug(slug)),
            Err(e) => {
                warn!("Persisted tenant is corrupted: {e}");
                None
            }
        }
    }

    fn persist(&self, slug: &str) -> AuthErrorResult<()> {
        let context = TenantContext {
            tenant_slug: Some(slug.to_string()),
        };
        let json = serde_json::to_string(&context)?;
        self.inner.storage.set(TENANT_STORAGE_KEY, &json)
    }

    fn cached(&self) -> Option<String> {
        self.inner
            .cached
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn set_cached(&self, slug: Option<String>) {
        *self.inner.cached.write().unwrap_or_else(|e| e.into_inner()) = slug;
    }
}
