//! Lazy, queryable collections backing has-many associations.
//!
//! A [`Collection`] is bound to a target [`ResourceClass`] and an API path.
//! It holds no records until it is materialized by [`Collection::load`]
//! (or [`size`](Collection::size) / [`is_empty`](Collection::is_empty)).
//!
//! Materialization follows two rules:
//!
//! - A collection seeded with inline data and carrying no query builds its
//!   records from the seed. No request is sent.
//! - Otherwise exactly one `GET` is sent to the collection path with the
//!   query as URL parameters.
//!
//! Records stay cached until the query changes or
//! [`reset_query`](Collection::reset_query) discards remotely fetched records.

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

use crate::clients::RestClient;
use crate::rest::registry::json_kind;
use crate::rest::{Resource, ResourceClass, ResourceError};

/// Query parameters applied to a collection request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CollectionQuery {
    filters: BTreeMap<String, String>,
    page: Option<u32>,
    per_page: Option<u32>,
    order: Option<String>,
}

impl CollectionQuery {
    /// Returns `true` if no parameter is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty() && self.page.is_none() && self.per_page.is_none() && self.order.is_none()
    }

    /// Returns the filter parameters.
    #[must_use]
    pub const fn filters(&self) -> &BTreeMap<String, String> {
        &self.filters
    }

    /// Returns the requested page.
    #[must_use]
    pub const fn page(&self) -> Option<u32> {
        self.page
    }

    /// Returns the requested page size.
    #[must_use]
    pub const fn per_page(&self) -> Option<u32> {
        self.per_page
    }

    /// Returns the requested ordering.
    #[must_use]
    pub fn order(&self) -> Option<&str> {
        self.order.as_deref()
    }

    /// Converts the query into URL parameters.
    #[must_use]
    pub fn to_params(&self) -> HashMap<String, String> {
        let mut params: HashMap<String, String> = self
            .filters
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        if let Some(page) = self.page {
            params.insert("page".to_string(), page.to_string());
        }
        if let Some(per_page) = self.per_page {
            params.insert("per_page".to_string(), per_page.to_string());
        }
        if let Some(order) = &self.order {
            params.insert("order".to_string(), order.clone());
        }

        params
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RecordSource {
    Seed,
    Remote,
}

/// A lazily materialized collection of resources.
///
/// # Example
///
/// ```rust,ignore
/// let categories = product.get("categories")?;
/// categories.filter("status", "active").per_page(20);
///
/// for category in categories.load(&client).await? {
///     println!("{:?}", category.attribute("name"));
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Collection {
    target: ResourceClass,
    path: String,
    seed: Option<Value>,
    query: CollectionQuery,
    records: Option<Vec<Resource>>,
    source: Option<RecordSource>,
}

impl Collection {
    /// Creates an empty, unmaterialized collection.
    #[must_use]
    pub fn new(target: ResourceClass, path: impl Into<String>) -> Self {
        Self {
            target,
            path: path.into(),
            seed: None,
            query: CollectionQuery::default(),
            records: None,
            source: None,
        }
    }

    /// Returns the class records are instantiated with.
    #[must_use]
    pub const fn target(&self) -> &ResourceClass {
        &self.target
    }

    /// Returns the API path the collection loads from.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the current query.
    #[must_use]
    pub const fn query(&self) -> &CollectionQuery {
        &self.query
    }

    /// Returns `true` if inline data was supplied.
    #[must_use]
    pub const fn is_seeded(&self) -> bool {
        self.seed.is_some()
    }

    /// Returns `true` if records are currently cached.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.records.is_some()
    }

    /// Returns the cached records without loading.
    #[must_use]
    pub fn records(&self) -> Option<&[Resource]> {
        self.records.as_deref()
    }

    /// Seeds the collection with inline data.
    ///
    /// The data is decoded lazily; any cached records are discarded.
    pub fn set_response(&mut self, raw: Value) {
        self.seed = Some(raw);
        self.invalidate();
    }

    /// Clears the query.
    ///
    /// Remotely fetched records are discarded, so the next load queries
    /// again. Records built from the seed are kept.
    pub fn reset_query(&mut self) {
        self.query = CollectionQuery::default();
        if self.source != Some(RecordSource::Seed) {
            self.invalidate();
        }
    }

    /// Adds a filter parameter.
    pub fn filter(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.query.filters.insert(key.into(), value.into());
        self.invalidate();
        self
    }

    /// Requests a page.
    pub fn page(&mut self, page: u32) -> &mut Self {
        self.query.page = Some(page);
        self.invalidate();
        self
    }

    /// Requests a page size.
    pub fn per_page(&mut self, per_page: u32) -> &mut Self {
        self.query.per_page = Some(per_page);
        self.invalidate();
        self
    }

    /// Requests an ordering.
    pub fn order(&mut self, order: impl Into<String>) -> &mut Self {
        self.query.order = Some(order.into());
        self.invalidate();
        self
    }

    /// Materializes the collection and returns its records.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Rest`] if the request fails and
    /// [`ResourceError::UnexpectedResponse`] if the data is not a list of objects.
    pub async fn load(&mut self, client: &RestClient) -> Result<&mut [Resource], ResourceError> {
        let records = match self.records.take() {
            Some(records) => records,
            None => {
                let (records, source) = match &self.seed {
                    Some(seed) if self.query.is_empty() => {
                        tracing::debug!(
                            "Building {} records for {} from inline data",
                            self.target.name(),
                            self.path
                        );
                        (self.parse(seed.clone())?, RecordSource::Seed)
                    }
                    _ => (self.fetch(client).await?, RecordSource::Remote),
                };
                self.source = Some(source);
                records
            }
        };

        Ok(self.records.insert(records).as_mut_slice())
    }

    /// Returns the number of records, materializing if needed.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load).
    pub async fn size(&mut self, client: &RestClient) -> Result<usize, ResourceError> {
        Ok(self.load(client).await?.len())
    }

    /// Returns `true` if the collection has no records, materializing if needed.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load).
    pub async fn is_empty(&mut self, client: &RestClient) -> Result<bool, ResourceError> {
        Ok(self.size(client).await? == 0)
    }

    fn invalidate(&mut self) {
        self.records = None;
        self.source = None;
    }

    async fn fetch(&self, client: &RestClient) -> Result<Vec<Resource>, ResourceError> {
        let params = self.query.to_params();
        tracing::debug!(
            "Querying {} records at {} with {:?}",
            self.target.name(),
            self.path,
            params
        );

        let response = client.get(&self.path, Some(&params)).await?;
        self.parse(response.body)
    }

    /// Accepts a bare array or an object holding the array under the
    /// target's resource name.
    fn parse(&self, data: Value) -> Result<Vec<Resource>, ResourceError> {
        let key = self.target.resource_type().resource_name();
        let items = match data {
            Value::Array(items) => items,
            Value::Object(mut body) => match body.remove(key) {
                Some(Value::Array(items)) => items,
                _ => {
                    return Err(self.unexpected(format!("expected an array under '{key}'")));
                }
            },
            other => {
                return Err(self.unexpected(format!("expected an array, got {}", json_kind(&other))));
            }
        };

        items
            .into_iter()
            .map(|item| self.target.instantiate_value(item, &self.path))
            .collect()
    }

    fn unexpected(&self, message: String) -> ResourceError {
        ResourceError::UnexpectedResponse {
            path: self.path.clone(),
            message,
        }
    }
}
