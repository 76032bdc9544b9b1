//! GET requests against the API.

use std::collections::BTreeMap;

/// A read request, relative to the client's base path.
///
/// The API is only ever read from, so a request is a path, a set of query
/// parameters and the number of attempts allowed.
///
/// # Example
///
/// ```rust
/// use yoolk_api::clients::ApiRequest;
///
/// let request = ApiRequest::get("products/42/categories.json")
///     .param("page", "2")
///     .with_tries(3);
///
/// assert_eq!(request.query().get("page").map(String::as_str), Some("2"));
/// assert_eq!(request.tries(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
    path: String,
    query: BTreeMap<String, String>,
    tries: u32,
}

impl ApiRequest {
    /// Creates a single-attempt GET request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: BTreeMap::new(),
            tries: 1,
        }
    }

    /// Adds one query parameter, replacing an earlier value for `key`.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Adds every parameter from `params`.
    #[must_use]
    pub fn params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Allows up to `tries` attempts when the API answers 429 or 500.
    #[must_use]
    pub const fn with_tries(mut self, tries: u32) -> Self {
        self.tries = tries;
        self
    }

    /// Path relative to the base path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query parameters, sorted by key.
    #[must_use]
    pub const fn query(&self) -> &BTreeMap<String, String> {
        &self.query
    }

    /// Maximum number of attempts.
    #[must_use]
    pub const fn tries(&self) -> u32 {
        self.tries
    }
}
