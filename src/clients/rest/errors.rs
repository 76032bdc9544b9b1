//! REST-specific error types.

use crate::clients::HttpError;
use thiserror::Error;

/// Error type for REST API operations.
///
/// # Example
///
/// ```rust
/// use yoolk_api::clients::rest::RestError;
///
/// let error = RestError::InvalidPath { path: "".to_string() };
/// assert!(error.to_string().contains("Invalid"));
/// ```
#[derive(Debug, Error)]
pub enum RestError {
    /// The path is empty after normalization.
    #[error("Invalid REST API path: '{path}'")]
    InvalidPath {
        /// The rejected path.
        path: String,
    },

    /// The request failed in the HTTP layer.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl RestError {
    /// Returns the HTTP status, when the error came from a response.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status_code(),
            Self::InvalidPath { .. } => None,
        }
    }
}
