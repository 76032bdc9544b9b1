//! Error types for the Yoolk API client.
//!
//! This module contains the configuration error type returned by the
//! validated newtypes and the [`ApiConfig`](crate::ApiConfig) builder.
//!
//! # Example
//!
//! ```rust
//! use yoolk_api::{AccessToken, ConfigError};
//!
//! let result = AccessToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAccessToken)));
//! ```

use thiserror::Error;

/// Errors that can occur while building client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Access token cannot be empty.
    #[error("Access token cannot be empty. Omit it instead of passing an empty string.")]
    EmptyAccessToken,

    /// Domain name is invalid.
    #[error("Invalid domain name '{domain}'. Expected 'host', 'host:port' or 'http(s)://host[:port]'.")]
    InvalidDomainName {
        /// The invalid domain that was provided.
        domain: String,
    },

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected format: 'v<number>' (e.g., 'v1').")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// Requests must be attempted at least once.
    #[error("request_tries must be at least 1.")]
    InvalidRequestTries,

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}
