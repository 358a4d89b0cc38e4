use crate::ClientError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(#[from] sp_config::ConfigError),

    #[error("{0}")]
    Auth(#[from] sp_auth::AuthError),

    #[error("{0}")]
    Client(#[from] ClientError),

    #[error("Logger error: {message}")]
    Logger { message: String },
}

pub type Result<T> = std::result::Result<T, AppError>;
