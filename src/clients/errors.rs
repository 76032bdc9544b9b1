//! Transport errors.
//!
//! [`HttpError`] covers everything that can go wrong between building an
//! [`ApiRequest`](crate::clients::ApiRequest) and holding a successful
//! [`ApiResponse`](crate::clients::ApiResponse).
//!
//! # Example
//!
//! ```rust,ignore
//! use yoolk_api::clients::HttpError;
//!
//! match client.http_client().get(&request).await {
//!     Ok(response) => println!("{}", response.body),
//!     Err(HttpError::Status(e)) => println!("API said {}: {}", e.status, e.message),
//!     Err(HttpError::RetriesExhausted(e)) => println!("gave up after {} tries", e.tries),
//!     Err(e) => println!("{e}"),
//! }
//! ```

use thiserror::Error;

/// A non-2xx response that was not retried.
#[derive(Debug, Error)]
#[error("API responded with status {status}: {message}")]
pub struct ApiStatusError {
    /// HTTP status code.
    pub status: u16,
    /// Error text extracted from the body.
    pub message: String,
    /// Value of the `X-Request-Id` header, if any.
    pub request_id: Option<String>,
}

/// The last response of a request whose retries ran out.
#[derive(Debug, Error)]
#[error("Gave up after {tries} tries, last status {status}: {message}")]
pub struct RetriesExhaustedError {
    /// Status code of the last attempt.
    pub status: u16,
    /// Number of attempts made.
    pub tries: u32,
    /// Error text extracted from the last body.
    pub message: String,
    /// Value of the `X-Request-Id` header of the last attempt, if any.
    pub request_id: Option<String>,
}

/// Error type for the HTTP layer.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The API answered with an error status.
    #[error(transparent)]
    Status(#[from] ApiStatusError),

    /// Every allowed attempt hit a retryable status.
    #[error(transparent)]
    RetriesExhausted(#[from] RetriesExhaustedError),

    /// A request was built with zero allowed attempts.
    #[error("A request must be attempted at least once")]
    ZeroTries,

    /// A configured value cannot be sent as an HTTP header.
    #[error("Value for header '{name}' is not a valid HTTP header value")]
    InvalidHeader {
        /// The header name.
        name: &'static str,
    },

    /// The connection failed or the body could not be read.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns the HTTP status, when the error came from a response.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status(e) => Some(e.status),
            Self::RetriesExhausted(e) => Some(e.status),
            Self::ZeroTries | Self::InvalidHeader { .. } | Self::Network(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let error = ApiStatusError {
            status: 404,
            message: "Not found".to_string(),
            request_id: None,
        };
        assert_eq!(error.to_string(), "API responded with status 404: Not found");
    }

    #[test]
    fn test_retries_exhausted_message() {
        let error = RetriesExhaustedError {
            status: 429,
            tries: 3,
            message: "slow down".to_string(),
            request_id: Some("req-1".to_string()),
        };
        let message = error.to_string();
        assert!(message.contains("3 tries"));
        assert!(message.contains("429"));
    }

    #[test]
    fn test_status_code_accessor() {
        let status = HttpError::Status(ApiStatusError {
            status: 403,
            message: String::new(),
            request_id: None,
        });
        assert_eq!(status.status_code(), Some(403));
        assert_eq!(HttpError::ZeroTries.status_code(), None);
        assert_eq!(
            HttpError::InvalidHeader { name: "Authorization" }.status_code(),
            None
        );
    }
}
