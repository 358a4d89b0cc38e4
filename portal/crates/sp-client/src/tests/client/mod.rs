mod api_response;
mod client;
mod interceptor;
