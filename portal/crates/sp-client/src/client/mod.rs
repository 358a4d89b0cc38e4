pub(crate) mod api_response;
pub(crate) mod client;
pub(crate) mod error;
pub(crate) mod interceptor;
pub(crate) mod request_options;

pub use api_response::ApiResponse;
pub use client::{CHANGE_PASSWORD_ENDPOINT, Client, TENANT_HEADER};
pub use error::{ClientError, Result as ClientResult};
pub use interceptor::{AuthFailure, AuthFailureInterceptor, RequestContext, ResponseInterceptor};
pub use request_options::RequestOptions;
