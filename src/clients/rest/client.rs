use std::collections::HashMap;

use crate::clients::rest::RestError;
use crate::clients::{ApiRequest, ApiResponse, HttpClient};
use crate::config::{ApiConfig, ApiVersion};

/// REST client for the Yoolk API.
///
/// Requests go to `{scheme}://{domain}/{version}/{path}.json`, with as many
/// attempts as [`ApiConfig::request_tries`] allows. Resources and
/// collections read through [`get`](Self::get), so the retry setting covers
/// association loads and single-resource reads alike.
///
/// `RestClient` is `Send + Sync` and can be shared across tasks.
///
/// # Example
///
/// ```rust,ignore
/// use yoolk_api::{ApiConfig, DomainName, RestClient};
///
/// let config = ApiConfig::builder()
///     .domain_name(DomainName::new("yellowpages-cambodia.dev:3000").unwrap())
///     .request_tries(3)
///     .build()
///     .unwrap();
///
/// let client = RestClient::new(&config)?;
/// let response = client.get("products/42", None).await?;
/// ```
#[derive(Debug)]
pub struct RestClient {
    http_client: HttpClient,
    api_version: ApiVersion,
    tries: u32,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestClient>();
};

impl RestClient {
    /// Creates a client for the configured domain and API version.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, RestError> {
        let api_version = config.api_version().clone();
        let http_client = HttpClient::new(api_version.base_path(), config)?;

        tracing::debug!(
            "Rest client created for {} with API version {}",
            http_client.base_uri(),
            api_version
        );

        Ok(Self {
            http_client,
            api_version,
            tries: config.request_tries(),
        })
    }

    /// Returns the API version being used by this client.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Attempts allowed per request.
    #[must_use]
    pub const fn tries(&self) -> u32 {
        self.tries
    }

    /// Sends a GET request to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is empty and
    /// [`RestError::Http`] for transport failures.
    pub async fn get(
        &self,
        path: &str,
        query: Option<&HashMap<String, String>>,
    ) -> Result<ApiResponse, RestError> {
        let mut request = ApiRequest::get(normalize_path(path)?).with_tries(self.tries);
        if let Some(query) = query {
            request = request.params(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }

        Ok(self.http_client.get(&request).await?)
    }
}

/// Strips leading slashes and a trailing `.json`, then re-appends `.json`.
fn normalize_path(path: &str) -> Result<String, RestError> {
    let path = path.trim_start_matches('/');
    let path = path.strip_suffix(".json").unwrap_or(path);

    if path.is_empty() {
        return Err(RestError::InvalidPath {
            path: String::new(),
        });
    }

    Ok(format!("{path}.json"))
}
