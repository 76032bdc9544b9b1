//! Has-many association declarations.
//!
//! An [`AssociationDescriptor`] is created once per (resource type,
//! association name) when the type is declared with
//! [`ResourceType::has_many`](crate::rest::ResourceType::has_many). It is
//! immutable afterwards. Nothing is validated at declaration time; a
//! missing `class_name` is reported when the accessor is first used.

use crate::rest::path::association_path;
use crate::rest::ResourceError;

/// Options for a has-many association.
///
/// # Example
///
/// ```rust
/// use yoolk_api::rest::HasManyOptions;
///
/// let options = HasManyOptions::new()
///     .class_name("Product::Category")
///     .api_path("/categories/featured");
///
/// assert_eq!(options.class_name.as_deref(), Some("Product::Category"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HasManyOptions {
    /// Registered name of the associated resource type (required at use time).
    pub class_name: Option<String>,
    /// Explicit API path, used verbatim instead of the default template.
    pub api_path: Option<String>,
}

impl HasManyOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the associated class name.
    #[must_use]
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Sets an explicit API path.
    #[must_use]
    pub fn api_path(mut self, api_path: impl Into<String>) -> Self {
        self.api_path = Some(api_path.into());
        self
    }
}

/// A declared has-many association.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssociationDescriptor {
    name: String,
    options: HasManyOptions,
}

impl AssociationDescriptor {
    /// Creates a descriptor.
    #[must_use]
    pub fn new(name: impl Into<String>, options: HasManyOptions) -> Self {
        Self {
            name: name.into(),
            options,
        }
    }

    /// Returns the association name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared options.
    #[must_use]
    pub const fn options(&self) -> &HasManyOptions {
        &self.options
    }

    /// Returns the non-empty class name of the associated type.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingClassName`] if `class_name` is absent or empty.
    pub fn class_name(&self) -> Result<&str, ResourceError> {
        self.options
            .class_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| ResourceError::MissingClassName {
                association: self.name.clone(),
            })
    }

    /// Resolves the API path for this association on one resource.
    ///
    /// An explicit `api_path` wins verbatim; otherwise the path is
    /// `/{resource_name}/{identity}/{association}`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingIdentity`] when the default template
    /// is needed and `identity` is `None`.
    pub fn path_for(
        &self,
        owner: &str,
        resource_name: &str,
        identity: Option<&str>,
    ) -> Result<String, ResourceError> {
        if let Some(api_path) = &self.options.api_path {
            return Ok(api_path.clone());
        }

        let identity = identity.ok_or_else(|| ResourceError::MissingIdentity {
            resource: owner.to_string(),
            association: self.name.clone(),
        })?;

        Ok(association_path(resource_name, identity, &self.name))
    }
}
