//! Configuration types for the Yoolk API client.
//!
//! # Overview
//!
//! - [`ApiConfig`]: the configuration passed to [`RestClient`](crate::RestClient)
//! - [`ApiConfigBuilder`]: a builder for constructing [`ApiConfig`] instances
//! - [`DomainName`]: a validated API domain (host, optional port and scheme)
//! - [`AccessToken`]: a validated access token with masked debug output
//! - [`ApiVersion`]: the API version used as the request base path
//!
//! # Example
//!
//! ```rust
//! use yoolk_api::{ApiConfig, ApiVersion, DomainName};
//!
//! let config = ApiConfig::builder()
//!     .domain_name(DomainName::new("yellowpages-cambodia.dev:3000").unwrap())
//!     .api_version(ApiVersion::latest())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.domain_name().host(), "yellowpages-cambodia.dev:3000");
//! ```

mod newtypes;
mod version;

pub use newtypes::{AccessToken, DomainName};
pub use version::ApiVersion;

use crate::error::ConfigError;

/// Configuration for the Yoolk API client.
///
/// There is no global setup: build one of these and hand it to the client.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    domain_name: DomainName,
    access_token: Option<AccessToken>,
    api_version: ApiVersion,
    user_agent_prefix: Option<String>,
    request_tries: u32,
}

impl ApiConfig {
    /// Creates a new builder for constructing an `ApiConfig`.
    #[must_use]
    pub fn builder() -> ApiConfigBuilder {
        ApiConfigBuilder::new()
    }

    /// Returns the API domain name.
    #[must_use]
    pub const fn domain_name(&self) -> &DomainName {
        &self.domain_name
    }

    /// Returns the access token, if configured.
    #[must_use]
    pub const fn access_token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref()
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns how many attempts each request gets on 429/500 answers.
    #[must_use]
    pub const fn request_tries(&self) -> u32 {
        self.request_tries
    }
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiConfig>();
};

/// Builder for constructing [`ApiConfig`] instances.
///
/// `domain_name` is required. The API version defaults to
/// [`ApiVersion::latest`]; everything else is optional.
#[derive(Debug, Default)]
pub struct ApiConfigBuilder {
    domain_name: Option<DomainName>,
    access_token: Option<AccessToken>,
    api_version: Option<ApiVersion>,
    user_agent_prefix: Option<String>,
    request_tries: Option<u32>,
}

impl ApiConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API domain name (required).
    #[must_use]
    pub fn domain_name(mut self, domain_name: DomainName) -> Self {
        self.domain_name = Some(domain_name);
        self
    }

    /// Sets the access token sent as a bearer token.
    #[must_use]
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Sets the API version.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets how many attempts a request gets when the API answers 429 or
    /// 500. Defaults to 1 (no retries).
    #[must_use]
    pub const fn request_tries(mut self, tries: u32) -> Self {
        self.request_tries = Some(tries);
        self
    }

    /// Builds the [`ApiConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `domain_name` is not
    /// set and [`ConfigError::InvalidRequestTries`] if `request_tries` is 0.
    pub fn build(self) -> Result<ApiConfig, ConfigError> {
        let domain_name = self.domain_name.ok_or(ConfigError::MissingRequiredField {
            field: "domain_name",
        })?;

        let request_tries = self.request_tries.unwrap_or(1);
        if request_tries == 0 {
            return Err(ConfigError::InvalidRequestTries);
        }

        Ok(ApiConfig {
            domain_name,
            access_token: self.access_token,
            api_version: self.api_version.unwrap_or_else(ApiVersion::latest),
            user_agent_prefix: self.user_agent_prefix,
            request_tries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_domain_name() {
        let result = ApiConfigBuilder::new().build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "domain_name"
            })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = ApiConfig::builder()
            .domain_name(DomainName::new("yellowpages-cambodia.com").unwrap())
            .build()
            .unwrap();

        assert_eq!(config.api_version(), &ApiVersion::latest());
        assert!(config.access_token().is_none());
        assert!(config.user_agent_prefix().is_none());
        assert_eq!(config.request_tries(), 1);
    }

    #[test]
    fn test_builder_rejects_zero_tries() {
        let result = ApiConfig::builder()
            .domain_name(DomainName::new("yellowpages-cambodia.com").unwrap())
            .request_tries(0)
            .build();

        assert!(matches!(result, Err(ConfigError::InvalidRequestTries)));
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = ApiConfig::builder()
            .domain_name(DomainName::new("http://localhost:3000").unwrap())
            .access_token(AccessToken::new("token").unwrap())
            .api_version("v2".parse().unwrap())
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();

        assert_eq!(config.domain_name().base_uri(), "http://localhost:3000");
        assert_eq!(config.access_token().unwrap().as_ref(), "token");
        assert_eq!(config.api_version().to_string(), "v2");
        assert_eq!(config.user_agent_prefix(), Some("MyApp/1.0"));
    }

    #[test]
    fn test_config_debug_does_not_leak_token() {
        let config = ApiConfig::builder()
            .domain_name(DomainName::new("yellowpages-cambodia.com").unwrap())
            .access_token(AccessToken::new("very-secret").unwrap())
            .build()
            .unwrap();

        let debug_str = format!("{config:?}");
        assert!(debug_str.contains("ApiConfig"));
        assert!(!debug_str.contains("very-secret"));
    }
}
