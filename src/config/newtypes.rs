//! Validated newtype wrappers for configuration values.
//!
//! These wrappers validate their contents on construction. Invalid values
//! are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated API access token.
///
/// The `Debug` implementation masks the token so it never ends up in logs.
///
/// # Example
///
/// ```rust
/// use yoolk_api::AccessToken;
///
/// let token = AccessToken::new("my-token").unwrap();
/// assert_eq!(token.as_ref(), "my-token");
/// assert_eq!(format!("{:?}", token), "AccessToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Creates a new validated access token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccessToken`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.is_empty() {
            return Err(ConfigError::EmptyAccessToken);
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(*****)")
    }
}

/// A validated API domain name.
///
/// Accepts a bare host (`yellowpages-cambodia.com`), a host with a port
/// (`yellowpages-cambodia.dev:3000`), or either of those prefixed with an
/// `http://` or `https://` scheme. Bare hosts default to `https`.
///
/// # Example
///
/// ```rust
/// use yoolk_api::DomainName;
///
/// let domain = DomainName::new("yellowpages-cambodia.dev:3000").unwrap();
/// assert_eq!(domain.host(), "yellowpages-cambodia.dev:3000");
/// assert_eq!(domain.base_uri(), "https://yellowpages-cambodia.dev:3000");
///
/// let local = DomainName::new("http://127.0.0.1:8080").unwrap();
/// assert_eq!(local.scheme(), "http");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomainName {
    scheme: &'static str,
    host: String,
}

impl DomainName {
    /// Creates a new validated domain name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDomainName`] if the domain is invalid.
    pub fn new(domain: impl Into<String>) -> Result<Self, ConfigError> {
        let domain = domain.into();
        let trimmed = domain.trim().to_lowercase();

        let (scheme, rest) = if let Some(rest) = trimmed.strip_prefix("https://") {
            ("https", rest)
        } else if let Some(rest) = trimmed.strip_prefix("http://") {
            ("http", rest)
        } else if trimmed.contains("://") {
            return Err(ConfigError::InvalidDomainName { domain });
        } else {
            ("https", trimmed.as_str())
        };

        let host = rest.trim_end_matches('/');
        if !Self::is_valid_host(host) {
            return Err(ConfigError::InvalidDomainName { domain });
        }

        Ok(Self {
            scheme,
            host: host.to_string(),
        })
    }

    /// Returns the URL scheme (`http` or `https`).
    #[must_use]
    pub const fn scheme(&self) -> &str {
        self.scheme
    }

    /// Returns the host, including the port when one was given.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns `scheme://host[:port]`.
    #[must_use]
    pub fn base_uri(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }

    fn is_valid_host(host: &str) -> bool {
        let (name, port) = match host.rsplit_once(':') {
            Some((name, port)) => (name, Some(port)),
            None => (host, None),
        };

        if let Some(port) = port {
            if port.is_empty() || port.parse::<u16>().is_err() {
                return false;
            }
        }

        if name.is_empty() || name.starts_with(['.', '-']) || name.ends_with(['.', '-']) {
            return false;
        }

        name.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
    }
}

impl AsRef<str> for DomainName {
    fn as_ref(&self) -> &str {
        &self.host
    }
}

impl Serialize for DomainName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.base_uri())
    }
}

impl<'de> Deserialize<'de> for DomainName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}
