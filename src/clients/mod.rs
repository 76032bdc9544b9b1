//! Transport for the Yoolk API.
//!
//! - [`HttpClient`]: sends [`ApiRequest`]s and retries 429/500 answers
//! - [`ApiRequest`]: a GET path with query parameters and an attempt budget
//! - [`ApiResponse`]: status, request id, `Retry-After` and the JSON body
//! - [`rest::RestClient`]: normalizes paths and applies the configured tries
//!
//! The API is only read from here; there are no write requests.

mod errors;
mod http_client;
mod request;
mod response;
pub mod rest;

pub use errors::{ApiStatusError, HttpError, RetriesExhaustedError};
pub use http_client::{HttpClient, RETRY_WAIT_TIME, SDK_VERSION};
pub use request::ApiRequest;
pub use response::ApiResponse;

pub use rest::{RestClient, RestError};
