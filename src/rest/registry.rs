//! Resource type declarations and the name → type registry.
//!
//! A [`ResourceType`] describes one kind of remote entity: its name, the
//! plural resource name used in paths, whether it can be fetched on its own,
//! and the has-many associations it declares. Types are collected into a
//! [`ResourceRegistry`], which is immutable once built and cheap to clone.
//!
//! # Example
//!
//! ```rust
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
//! let product = registry.resolve("Product").unwrap();
//! assert_eq!(product.resource_type().resource_name(), "products");
//! assert!(registry.resolve("Listing").is_err());
//! ```

use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::clients::RestClient;
use crate::rest::association::{AssociationDescriptor, HasManyOptions};
use crate::rest::path::find_path;
use crate::rest::{Resource, ResourceError};

/// A declared resource type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceType {
    name: String,
    resource_name: String,
    findable: bool,
    associations: Vec<AssociationDescriptor>,
}

impl ResourceType {
    /// Declares a resource type.
    ///
    /// * `name` - the registered class name (e.g. `"Product::Category"`)
    /// * `resource_name` - the plural used in API paths (e.g. `"categories"`)
    #[must_use]
    pub fn new(name: impl Into<String>, resource_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resource_name: resource_name.into(),
            findable: true,
            associations: Vec::new(),
        }
    }

    /// Declares a has-many association.
    ///
    /// Options are not validated here. Redeclaring a name replaces the
    /// earlier declaration.
    #[must_use]
    pub fn has_many(mut self, name: impl Into<String>, options: HasManyOptions) -> Self {
        let descriptor = AssociationDescriptor::new(name, options);
        self.associations.retain(|a| a.name() != descriptor.name());
        self.associations.push(descriptor);
        self
    }

    /// Marks the type as reachable only through a parent association.
    #[must_use]
    pub const fn without_find(mut self) -> Self {
        self.findable = false;
        self
    }

    /// Returns the registered class name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the plural resource name used in paths.
    #[must_use]
    pub fn resource_name(&self) -> &str {
        &self.resource_name
    }

    /// Returns `true` if resources of this type can be fetched with `find`.
    #[must_use]
    pub const fn is_findable(&self) -> bool {
        self.findable
    }

    /// Returns the association declared under `name`.
    #[must_use]
    pub fn association(&self, name: &str) -> Option<&AssociationDescriptor> {
        self.associations.iter().find(|a| a.name() == name)
    }

    /// Returns all declared associations in declaration order.
    #[must_use]
    pub fn associations(&self) -> &[AssociationDescriptor] {
        &self.associations
    }

    /// The key wrapping a single resource in a response body:
    /// `"Product::Category"` → `"category"`.
    #[must_use]
    pub fn resource_key(&self) -> String {
        self.name
            .rsplit("::")
            .next()
            .unwrap_or(&self.name)
            .to_lowercase()
    }
}

/// Immutable lookup from class name to resource type.
#[derive(Clone, Debug, Default)]
pub struct ResourceRegistry {
    types: Arc<HashMap<String, Arc<ResourceType>>>,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceRegistry>();
    assert_send_sync::<ResourceClass>();
};

impl ResourceRegistry {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> ResourceRegistryBuilder {
        ResourceRegistryBuilder::default()
    }

    /// Resolves a class name to a resource class.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnknownResourceType`] if `name` is not registered.
    pub fn resolve(&self, name: &str) -> Result<ResourceClass, ResourceError> {
        self.types
            .get(name)
            .map(|ty| ResourceClass {
                ty: Arc::clone(ty),
                registry: self.clone(),
            })
            .ok_or_else(|| ResourceError::UnknownResourceType {
                name: name.to_string(),
            })
    }

    /// Resolves the target class of an association.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingClassName`] if the association has no
    /// class name, or [`ResourceError::UnknownResourceType`] if it is not registered.
    pub fn class_for_association(
        &self,
        descriptor: &AssociationDescriptor,
    ) -> Result<ResourceClass, ResourceError> {
        self.resolve(descriptor.class_name()?)
    }

    /// Returns `true` if `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Returns the registered class names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Builder for [`ResourceRegistry`].
#[derive(Debug, Default)]
pub struct ResourceRegistryBuilder {
    types: HashMap<String, Arc<ResourceType>>,
}

impl ResourceRegistryBuilder {
    /// Registers a resource type.
    ///
    /// Registering a name twice keeps the later declaration.
    #[must_use]
    pub fn register(mut self, resource_type: ResourceType) -> Self {
        let name = resource_type.name().to_string();
        if self
            .types
            .insert(name.clone(), Arc::new(resource_type))
            .is_some()
        {
            tracing::warn!("Resource type {} registered twice; keeping the later declaration", name);
        }
        self
    }

    /// Finishes the registry.
    #[must_use]
    pub fn build(self) -> ResourceRegistry {
        ResourceRegistry {
            types: Arc::new(self.types),
        }
    }
}

/// A resolved resource type bound to the registry it came from.
///
/// This is what collections instantiate their records with, and what
/// single-resource reads go through.
#[derive(Clone, Debug)]
pub struct ResourceClass {
    ty: Arc<ResourceType>,
    registry: ResourceRegistry,
}

impl ResourceClass {
    /// Returns the resource type.
    #[must_use]
    pub fn resource_type(&self) -> &ResourceType {
        &self.ty
    }

    /// Returns the registered class name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.ty.name()
    }

    /// Returns the registry associations are resolved against.
    #[must_use]
    pub const fn registry(&self) -> &ResourceRegistry {
        &self.registry
    }

    /// Builds a resource from decoded attributes.
    #[must_use]
    pub fn instantiate(&self, attributes: Map<String, Value>) -> Resource {
        Resource::new(self.clone(), attributes)
    }

    /// Builds a resource from a JSON value, which must be an object.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnexpectedResponse`] if `value` is not an object.
    pub fn instantiate_value(&self, value: Value, path: &str) -> Result<Resource, ResourceError> {
        match value {
            Value::Object(attributes) => Ok(self.instantiate(attributes)),
            other => Err(ResourceError::UnexpectedResponse {
                path: path.to_string(),
                message: format!("expected a {} object, got {}", self.name(), json_kind(&other)),
            }),
        }
    }

    /// Fetches a single resource with `GET /{resource_name}/{id}`.
    ///
    /// The body may be the bare object or an object wrapped under the
    /// type's [`resource_key`](ResourceType::resource_key).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::FindUnsupported`] for types declared
    /// [`without_find`](ResourceType::without_find),
    /// [`ResourceError::NotFound`] on 404, and [`ResourceError::Rest`] for
    /// other transport failures.
    pub async fn find(
        &self,
        client: &RestClient,
        id: impl Display + Send,
    ) -> Result<Resource, ResourceError> {
        if !self.ty.is_findable() {
            return Err(ResourceError::FindUnsupported {
                resource: self.name().to_string(),
            });
        }

        let id = id.to_string();
        let path = find_path(self.ty.resource_name(), &id);

        let response = client
            .get(&path, None)
            .await
            .map_err(|e| ResourceError::from_find_error(e, self.name(), &id))?;

        let key = self.ty.resource_key();
        let body = match response.body {
            Value::Object(mut body) => match body.remove(&key) {
                Some(inner @ Value::Object(_)) => inner,
                Some(other) => {
                    body.insert(key, other);
                    Value::Object(body)
                }
                None => Value::Object(body),
            },
            other => other,
        };

        self.instantiate_value(body, &path)
    }
}

pub(crate) const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry() -> ResourceRegistry {
        ResourceRegistry::builder()
            .register(
                ResourceType::new("Product", "products")
                    .has_many("categories", HasManyOptions::new().class_name("Product::Category")),
            )
            .register(ResourceType::new("Product::Category", "categories").without_find())
            .build()
    }

    #[test]
    fn test_resolve_registered_type() {
        let class = registry().resolve("Product::Category").unwrap();
        assert_eq!(class.name(), "Product::Category");
        assert_eq!(class.resource_type().resource_name(), "categories");
        assert!(!class.resource_type().is_findable());
    }

    #[test]
    fn test_resolve_unknown_type() {
        let result = registry().resolve("Listing");
        assert!(matches!(
            result,
            Err(ResourceError::UnknownResourceType { name }) if name == "Listing"
        ));
    }

    #[test]
    fn test_class_for_association_requires_class_name() {
        let descriptor = AssociationDescriptor::new("photos", HasManyOptions::new());
        let result = registry().class_for_association(&descriptor);
        assert!(matches!(result, Err(ResourceError::MissingClassName { .. })));
    }

    #[test]
    fn test_has_many_redeclaration_replaces() {
        let ty = ResourceType::new("Product", "products")
            .has_many("categories", HasManyOptions::new().class_name("A"))
            .has_many("categories", HasManyOptions::new().class_name("B"));

        assert_eq!(ty.associations().len(), 1);
        assert_eq!(
            ty.association("categories").unwrap().class_name().unwrap(),
            "B"
        );
    }

    #[test]
    fn test_duplicate_registration_keeps_later_declaration() {
        let registry = ResourceRegistry::builder()
            .register(ResourceType::new("Product::Category", "categories").without_find())
            .register(ResourceType::new("Product::Category", "categories"))
            .build();

        let class = registry.resolve("Product::Category").unwrap();
        assert!(class.resource_type().is_findable());
        assert_eq!(registry.names(), vec!["Product::Category"]);
    }

    #[test]
    fn test_resource_key() {
        assert_eq!(ResourceType::new("Product", "products").resource_key(), "product");
        assert_eq!(
            ResourceType::new("Product::Category", "categories").resource_key(),
            "category"
        );
    }

    #[test]
    fn test_instantiate_value_requires_object() {
        let class = registry().resolve("Product").unwrap();

        let resource = class.instantiate_value(json!({"id": 1}), "/products").unwrap();
        assert_eq!(resource.identity().as_deref(), Some("1"));

        let result = class.instantiate_value(json!([1, 2]), "/products");
        assert!(matches!(
            result,
            Err(ResourceError::UnexpectedResponse { message, .. }) if message.contains("an array")
        ));
    }
}
