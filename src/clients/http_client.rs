//! The transport every read goes through.
//!
//! [`HttpClient`] owns a `reqwest` client preloaded with the headers every
//! call needs, and retries a request while the API answers 429 or 500 and
//! attempts remain.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};

use crate::clients::errors::{ApiStatusError, HttpError, RetriesExhaustedError};
use crate::clients::request::ApiRequest;
use crate::clients::response::ApiResponse;
use crate::config::ApiConfig;

/// Wait between attempts when the API gives no `Retry-After`.
pub const RETRY_WAIT_TIME: Duration = Duration::from_secs(1);

/// Library version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client bound to one API host and base path.
///
/// # Example
///
/// ```rust,ignore
/// use yoolk_api::clients::{ApiRequest, HttpClient};
///
/// let client = HttpClient::new("/v1", &config)?;
/// let response = client.get(&ApiRequest::get("portals/current.json")).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    base_uri: String,
    base_path: String,
    default_headers: HeaderMap,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a client for `{domain}{base_path}`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidHeader`] if the token or user agent prefix
    /// cannot be sent as a header, and [`HttpError::Network`] if the TLS
    /// backend fails to initialize.
    pub fn new(base_path: impl Into<String>, config: &ApiConfig) -> Result<Self, HttpError> {
        let default_headers = Self::default_headers_for(config)?;
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .default_headers(default_headers.clone())
            .build()?;

        Ok(Self {
            client,
            base_uri: config.domain_name().base_uri(),
            base_path: base_path.into(),
            default_headers,
        })
    }

    fn default_headers_for(config: &ApiConfig) -> Result<HeaderMap, HttpError> {
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = match config.user_agent_prefix() {
            Some(prefix) => {
                format!("{prefix} | Yoolk API Library v{SDK_VERSION} | Rust {rust_version}")
            }
            None => format!("Yoolk API Library v{SDK_VERSION} | Rust {rust_version}"),
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&user_agent)
                .map_err(|_| HttpError::InvalidHeader { name: "User-Agent" })?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = config.access_token() {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.as_ref()))
                .map_err(|_| HttpError::InvalidHeader {
                    name: "Authorization",
                })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }

    /// Scheme and host, e.g. `https://yellowpages-cambodia.com`.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Path prefix of every request, e.g. `/v1`.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns a header sent with every request.
    #[must_use]
    pub fn default_header(&self, name: &str) -> Option<&str> {
        self.default_headers
            .get(name)
            .and_then(|value| value.to_str().ok())
    }

    /// Sends a GET request, retrying 429 and 500 answers while attempts remain.
    ///
    /// A 429 waits for its `Retry-After` seconds when given; everything else
    /// waits [`RETRY_WAIT_TIME`].
    ///
    /// # Errors
    ///
    /// - [`HttpError::ZeroTries`] if the request allows no attempts
    /// - [`HttpError::Status`] for a non-retryable error status, or a
    ///   retryable one on a single-attempt request
    /// - [`HttpError::RetriesExhausted`] when every attempt was retryable
    /// - [`HttpError::Network`] for connection failures
    pub async fn get(&self, request: &ApiRequest) -> Result<ApiResponse, HttpError> {
        if request.tries() == 0 {
            return Err(HttpError::ZeroTries);
        }

        let url = format!("{}{}/{}", self.base_uri, self.base_path, request.path());
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            tracing::debug!("GET {} {:?} (attempt {})", url, request.query(), attempt);

            let mut builder = self.client.get(&url);
            if !request.query().is_empty() {
                builder = builder.query(request.query());
            }
            let response = Self::read(builder.send().await?).await?;

            if response.is_success() {
                return Ok(response);
            }

            let retryable = matches!(response.status, 429 | 500);
            if !retryable || request.tries() == 1 {
                return Err(HttpError::Status(ApiStatusError {
                    status: response.status,
                    message: response.error_message(),
                    request_id: response.request_id,
                }));
            }
            if attempt >= request.tries() {
                return Err(HttpError::RetriesExhausted(RetriesExhaustedError {
                    status: response.status,
                    tries: attempt,
                    message: response.error_message(),
                    request_id: response.request_id,
                }));
            }

            let delay = match response.retry_after {
                Some(wait) if response.status == 429 => wait,
                _ => RETRY_WAIT_TIME,
            };
            tracing::warn!(
                "GET {} answered {}, retrying in {:?} ({}/{})",
                request.path(),
                response.status,
                delay,
                attempt,
                request.tries()
            );
            tokio::time::sleep(delay).await;
        }
    }

    async fn read(response: reqwest::Response) -> Result<ApiResponse, HttpError> {
        let status = response.status().as_u16();
        let header = |name: &str| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let request_id = header("x-request-id");
        let retry_after = header("retry-after");

        let raw_body = response.text().await?;
        Ok(ApiResponse::new(
            status,
            request_id,
            retry_after.as_deref(),
            &raw_body,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AccessToken, DomainName};

    fn config(token: Option<&str>, prefix: Option<&str>) -> ApiConfig {
        let mut builder =
            ApiConfig::builder().domain_name(DomainName::new("yellowpages-cambodia.com").unwrap());
        if let Some(token) = token {
            builder = builder.access_token(AccessToken::new(token).unwrap());
        }
        if let Some(prefix) = prefix {
            builder = builder.user_agent_prefix(prefix);
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_base_uri_and_path() {
        let client = HttpClient::new("/v1", &config(None, None)).unwrap();
        assert_eq!(client.base_uri(), "https://yellowpages-cambodia.com");
        assert_eq!(client.base_path(), "/v1");
    }

    #[test]
    fn test_user_agent_with_and_without_prefix() {
        let plain = HttpClient::new("/v1", &config(None, None)).unwrap();
        assert!(plain
            .default_header("User-Agent")
            .unwrap()
            .starts_with("Yoolk API Library v"));

        let prefixed = HttpClient::new("/v1", &config(None, Some("MyApp/1.0"))).unwrap();
        assert!(prefixed
            .default_header("user-agent")
            .unwrap()
            .starts_with("MyApp/1.0 | Yoolk API Library v"));
    }

    #[test]
    fn test_bearer_token_only_when_configured() {
        let with = HttpClient::new("/v1", &config(Some("secret-token"), None)).unwrap();
        assert_eq!(with.default_header("Authorization"), Some("Bearer secret-token"));

        let without = HttpClient::new("/v1", &config(None, None)).unwrap();
        assert_eq!(without.default_header("Authorization"), None);
        assert_eq!(without.default_header("Accept"), Some("application/json"));
    }

    #[test]
    fn test_invalid_user_agent_prefix_is_rejected() {
        let result = HttpClient::new("/v1", &config(None, Some("bad\nprefix")));
        assert!(matches!(
            result,
            Err(HttpError::InvalidHeader { name: "User-Agent" })
        ));
    }

    #[tokio::test]
    async fn test_zero_tries_is_rejected_before_sending() {
        let client = HttpClient::new("/v1", &config(None, None)).unwrap();
        let result = client.get(&ApiRequest::get("products.json").with_tries(0)).await;
        assert!(matches!(result, Err(HttpError::ZeroTries)));
    }
}
