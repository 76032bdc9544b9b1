//! Yoolk API version definitions.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Yoolk API version.
///
/// The API is versioned by path segment (`/v1/...`). Known versions have
/// their own variant; any other `v<number>` string parses into `Custom`.
///
/// # Example
///
/// ```rust
/// use yoolk_api::ApiVersion;
///
/// let version: ApiVersion = "v1".parse().unwrap();
/// assert_eq!(version, ApiVersion::V1);
/// assert_eq!(version.to_string(), "v1");
/// assert_eq!(ApiVersion::latest(), ApiVersion::V1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// API version 1.
    V1,
    /// Any other `v<number>` version string.
    Custom(String),
}

impl ApiVersion {
    /// Returns the latest known API version.
    #[must_use]
    pub const fn latest() -> Self {
        Self::V1
    }

    /// Returns the base path requests are made under (e.g. `/v1`).
    #[must_use]
    pub fn base_path(&self) -> String {
        format!("/{self}")
    }

    fn is_valid_version_format(s: &str) -> bool {
        s.strip_prefix('v')
            .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::latest()
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V1 => f.write_str("v1"),
            Self::Custom(s) => f.write_str(s),
        }
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();

        match s.as_str() {
            "v1" => Ok(Self::V1),
            _ if Self::is_valid_version_format(&s) => Ok(Self::Custom(s)),
            _ => Err(ConfigError::InvalidApiVersion { version: s }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_version() {
        assert_eq!("v1".parse::<ApiVersion>().unwrap(), ApiVersion::V1);
        assert_eq!(" V1 ".parse::<ApiVersion>().unwrap(), ApiVersion::V1);
    }

    #[test]
    fn test_parse_custom_version() {
        let version: ApiVersion = "v2".parse().unwrap();
        assert_eq!(version, ApiVersion::Custom("v2".to_string()));
        assert_eq!(version.to_string(), "v2");
    }

    #[test]
    fn test_parse_rejects_invalid_versions() {
        for input in ["", "v", "1", "version1", "v1.2", "2024-10"] {
            assert!(
                matches!(
                    input.parse::<ApiVersion>(),
                    Err(ConfigError::InvalidApiVersion { .. })
                ),
                "expected {input:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_base_path() {
        assert_eq!(ApiVersion::V1.base_path(), "/v1");
        assert_eq!(ApiVersion::Custom("v3".to_string()).base_path(), "/v3");
    }
}
