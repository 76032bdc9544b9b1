//! Resource instances and their has-many accessors.
//!
//! A [`Resource`] owns its attributes and a per-instance cache of
//! [`Collection`]s keyed by association name. The cache is created on first
//! access and reused afterwards; reuse resets the collection's query.
//!
//! # Example
//!
//! ```rust,ignore
//! use yoolk_api::rest::{HasManyOptions, ResourceRegistry, ResourceType};
//!
//! let registry = ResourceRegistry::builder()
//!     .register(
//!         ResourceType::new("Product", "products")
//!             .has_many("categories", HasManyOptions::new().class_name("Product::Category")),
//!     )
//!     .register(ResourceType::new("Product::Category", "categories").without_find())
//!     .build();
//!
//! let mut product = registry.resolve("Product")?.find(&client, 42).await?;
//!
//! // GET /v1/products/42/categories.json?status=active
//! let active = product.get("categories")?.filter("status", "active").load(&client).await?.len();
//!
//! // Same collection, query cleared.
//! let any = product.has("categories", &client).await?;
//! ```

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::clients::RestClient;
use crate::rest::{Collection, ResourceClass, ResourceError, ResourceType};

/// A single resource with lazily loaded associations.
#[derive(Clone, Debug)]
pub struct Resource {
    class: ResourceClass,
    attributes: Map<String, Value>,
    collections: HashMap<String, Collection>,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Resource>();
    assert_send_sync::<Collection>();
};

impl Resource {
    pub(crate) fn new(class: ResourceClass, attributes: Map<String, Value>) -> Self {
        Self {
            class,
            attributes,
            collections: HashMap::new(),
        }
    }

    /// Returns the class this resource was built with.
    #[must_use]
    pub const fn class(&self) -> &ResourceClass {
        &self.class
    }

    /// Returns the resource type.
    #[must_use]
    pub fn resource_type(&self) -> &ResourceType {
        self.class.resource_type()
    }

    /// Returns the registered class name, e.g. `"Product::Category"`.
    #[must_use]
    pub fn class_name(&self) -> &str {
        self.class.name()
    }

    /// Returns the plural name used in this resource's paths, e.g. `"products"`.
    #[must_use]
    pub fn resource_name(&self) -> &str {
        self.resource_type().resource_name()
    }

    /// Returns the `id` attribute as a path segment, if present.
    #[must_use]
    pub fn identity(&self) -> Option<String> {
        match self.attributes.get("id")? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Returns all attributes.
    #[must_use]
    pub const fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Returns one attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Decodes the attributes into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Decode`] if the attributes do not match `T`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, ResourceError> {
        serde_json::from_value(Value::Object(self.attributes.clone())).map_err(|source| {
            ResourceError::Decode {
                resource: self.class_name().to_string(),
                source,
            }
        })
    }

    /// Returns the collection for a has-many association.
    ///
    /// The first call creates the collection, bound to the association's
    /// class and path, and seeds it from the attribute of the same name when
    /// that attribute is present and not null. Later calls return the same
    /// collection with its query reset.
    ///
    /// No request is sent here.
    ///
    /// # Errors
    ///
    /// - [`ResourceError::UnknownAssociation`] if no such association is declared
    /// - [`ResourceError::MissingClassName`] if the declaration lacks `class_name`
    /// - [`ResourceError::UnknownResourceType`] if `class_name` is not registered
    /// - [`ResourceError::MissingIdentity`] if the default path needs an `id`
    ///   the resource does not have
    pub fn get(&mut self, association: &str) -> Result<&mut Collection, ResourceError> {
        let ty = self.class.resource_type();
        let descriptor =
            ty.association(association)
                .ok_or_else(|| ResourceError::UnknownAssociation {
                    resource: ty.name().to_string(),
                    association: association.to_string(),
                })?;

        let target = self.class.registry().class_for_association(descriptor)?;
        let identity = self.identity();
        let path = descriptor.path_for(ty.name(), self.resource_name(), identity.as_deref())?;

        match self.collections.entry(association.to_string()) {
            Entry::Occupied(entry) => {
                tracing::debug!("Reusing {}#{} collection", ty.name(), association);
                let collection = entry.into_mut();
                collection.reset_query();
                Ok(collection)
            }
            Entry::Vacant(entry) => {
                tracing::debug!(
                    "Creating {} collection for {}#{} at {}",
                    target.name(),
                    ty.name(),
                    association,
                    path
                );

                let mut collection = Collection::new(target, path);
                if let Some(inline) = self.attributes.get(association).filter(|v| !v.is_null()) {
                    collection.set_response(inline.clone());
                }
                Ok(entry.insert(collection))
            }
        }
    }

    /// Returns `true` if the association has at least one record.
    ///
    /// This materializes the collection, so an unseeded association costs a
    /// full list request.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get), plus any error from loading the collection.
    pub async fn has(
        &mut self,
        association: &str,
        client: &RestClient,
    ) -> Result<bool, ResourceError> {
        let collection = self.get(association)?;
        Ok(collection.size(client).await? > 0)
    }

    /// Returns the cached collection without creating or resetting it.
    #[must_use]
    pub fn cached(&self, association: &str) -> Option<&Collection> {
        self.collections.get(association)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiConfig, DomainName};
    use crate::rest::{HasManyOptions, ResourceRegistry};
    use serde::Deserialize;
    use serde_json::json;

    fn registry() -> ResourceRegistry {
        ResourceRegistry::builder()
            .register(
                ResourceType::new("Product", "products")
                    .has_many("categories", HasManyOptions::new().class_name("Product::Category"))
                    .has_many(
                        "featured",
                        HasManyOptions::new()
                            .class_name("Product::Category")
                            .api_path("/categories/featured"),
                    )
                    .has_many("photos", HasManyOptions::new())
                    .has_many("reviews", HasManyOptions::new().class_name("Product::Review")),
            )
            .register(ResourceType::new("Product::Category", "categories").without_find())
            .build()
    }

    fn product(attributes: Value) -> Resource {
        let Value::Object(attributes) = attributes else {
            panic!("attributes must be an object");
        };
        registry().resolve("Product").unwrap().instantiate(attributes)
    }

    fn offline_client() -> RestClient {
        let config = ApiConfig::builder()
            .domain_name(DomainName::new("http://127.0.0.1:9").unwrap())
            .build()
            .unwrap();
        RestClient::new(&config).unwrap()
    }

    #[test]
    fn test_identity_from_number_and_string() {
        assert_eq!(product(json!({"id": 42})).identity().as_deref(), Some("42"));
        assert_eq!(
            product(json!({"id": "abc"})).identity().as_deref(),
            Some("abc")
        );
        assert_eq!(product(json!({"id": null})).identity(), None);
        assert_eq!(product(json!({})).identity(), None);
    }

    #[test]
    fn test_get_missing_class_name() {
        let mut product = product(json!({"id": 42}));
        let error = product.get("photos").unwrap_err();

        assert!(error.is_configuration_error());
        assert!(error
            .to_string()
            .contains("Missing class name of associated model"));
    }

    #[test]
    fn test_get_unregistered_class_name() {
        let mut product = product(json!({"id": 42}));
        assert!(matches!(
            product.get("reviews"),
            Err(ResourceError::UnknownResourceType { name }) if name == "Product::Review"
        ));
    }

    #[test]
    fn test_get_undeclared_association() {
        let mut product = product(json!({"id": 42}));
        assert!(matches!(
            product.get("variants"),
            Err(ResourceError::UnknownAssociation { association, .. }) if association == "variants"
        ));
    }

    #[test]
    fn test_resource_name_is_the_path_plural() {
        let mut product = product(json!({"id": 42}));
        assert_eq!(product.resource_name(), "products");
        assert_eq!(product.class_name(), "Product");

        let path = product.get("categories").unwrap().path().to_string();
        assert_eq!(
            path,
            format!("/{}/42/categories", product.resource_name())
        );
    }

    #[test]
    fn test_get_default_path() {
        let mut product = product(json!({"id": 42}));
        let categories = product.get("categories").unwrap();

        assert_eq!(categories.path(), "/products/42/categories");
        assert_eq!(categories.target().name(), "Product::Category");
        assert!(!categories.is_seeded());
    }

    #[test]
    fn test_get_explicit_api_path() {
        let mut product = product(json!({"id": 42}));
        assert_eq!(product.get("featured").unwrap().path(), "/categories/featured");
    }

    #[test]
    fn test_get_default_path_without_id() {
        let mut product = product(json!({"name": "Coffee"}));
        assert!(matches!(
            product.get("categories"),
            Err(ResourceError::MissingIdentity { .. })
        ));
    }

    #[test]
    fn test_get_returns_same_collection_with_reset_query() {
        let mut product = product(json!({"id": 42}));

        let first: *const Collection = {
            let categories = product.get("categories").unwrap();
            categories.filter("status", "active");
            categories
        };

        let second = product.get("categories").unwrap();
        assert!(std::ptr::eq(first, &*second));
        assert!(second.query().is_empty());
    }

    #[test]
    fn test_null_inline_data_is_not_seeded() {
        let mut product = product(json!({"id": 42, "categories": null}));
        assert!(!product.get("categories").unwrap().is_seeded());
    }

    #[test]
    fn test_cached_does_not_create() {
        let mut product = product(json!({"id": 42}));
        assert!(product.cached("categories").is_none());

        product.get("categories").unwrap();
        assert!(product.cached("categories").is_some());
    }

    #[tokio::test]
    async fn test_has_with_inline_data() {
        let client = offline_client();

        let mut with = product(json!({"id": 42, "categories": [{"id": 1}]}));
        assert!(with.has("categories", &client).await.unwrap());

        let mut without = product(json!({"id": 42, "categories": []}));
        assert!(!without.has("categories", &client).await.unwrap());
    }

    #[tokio::test]
    async fn test_nested_collections_are_independent() {
        let client = offline_client();
        let mut product = product(json!({
            "id": 42,
            "categories": [{"id": 1, "name": "Food"}]
        }));

        let records = product.get("categories").unwrap().load(&client).await.unwrap();
        assert_eq!(records[0].resource_name(), "categories");
        assert!(records[0].cached("categories").is_none());
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct ProductRow {
        id: u64,
        name: String,
    }

    #[test]
    fn test_deserialize_attributes() {
        let product = product(json!({"id": 42, "name": "Coffee", "extra": true}));
        assert_eq!(
            product.deserialize::<ProductRow>().unwrap(),
            ProductRow {
                id: 42,
                name: "Coffee".to_string()
            }
        );
    }

    #[test]
    fn test_deserialize_mismatch() {
        let product = product(json!({"id": "not a number", "name": "Coffee"}));
        assert!(matches!(
            product.deserialize::<ProductRow>(),
            Err(ResourceError::Decode { resource, .. }) if resource == "Product"
        ));
    }
}
