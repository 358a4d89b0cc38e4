mod api_config;
mod config;
mod error;
mod log_level;
mod logging_config;
mod storage_config;
mod tenant_config;

#[cfg(test)]
mod tests;

pub use api_config::ApiConfig;
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use storage_config::StorageConfig;
pub use tenant_config::TenantConfig;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:3333";
pub const DEFAULT_LOGIN_ENDPOINT: &str = "/api/v1/login";
const DEFAULT_CONFIG_DIRECTORY: &str = ".sp";
const DEFAULT_STORAGE_DIRECTORY: &str = "storage";
const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_COLORED: bool = true;
