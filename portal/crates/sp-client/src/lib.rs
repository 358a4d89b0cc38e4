//! sp-client library
//!
//! Authenticated HTTP client for the school portal API and the pieces of the
//! `sp` command line that are exercised by tests.

pub mod app;
pub mod cli;
pub(crate) mod client;
pub mod commands;
pub mod error;
pub mod logger;
pub mod tenant_commands;

#[cfg(test)]
mod tests;

pub use app::App;
pub use client::{
    ApiResponse, AuthFailure, AuthFailureInterceptor, CHANGE_PASSWORD_ENDPOINT, Client,
    ClientError, ClientResult, RequestContext, RequestOptions, ResponseInterceptor, TENANT_HEADER,
};
pub use error::{AppError, Result as AppErrorResult};
