//! Error types for resources, associations and collections.
//!
//! Association configuration problems surface when an accessor is called,
//! not when the association is declared:
//!
//! - [`ResourceError::MissingClassName`]: the association has no `class_name`
//! - [`ResourceError::UnknownResourceType`]: `class_name` is not registered
//!
//! Transport failures raised while a collection materializes are wrapped
//! in [`ResourceError::Rest`] without further translation.
//!
//! # Example
//!
//! ```rust,ignore
//! use yoolk_api::rest::ResourceError;
//!
//! match product.get("categories") {
//!     Ok(categories) => println!("path: {}", categories.path()),
//!     Err(ResourceError::MissingClassName { association }) => {
//!         eprintln!("fix the declaration of {association}");
//!     }
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```

use crate::clients::{HttpError, RestError};
use thiserror::Error;

/// Error type for resource and association operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The association was declared without a `class_name`.
    #[error("Missing class name of associated model. Provide with class_name: 'MyClass'. (association: {association})")]
    MissingClassName {
        /// The association whose options lack a class name.
        association: String,
    },

    /// The class name does not resolve to a registered resource type.
    #[error("Unknown resource type '{name}'")]
    UnknownResourceType {
        /// The unresolved class name.
        name: String,
    },

    /// No association with this name is declared on the resource type.
    #[error("{resource} has no association named '{association}'")]
    UnknownAssociation {
        /// The resource type name.
        resource: String,
        /// The requested association name.
        association: String,
    },

    /// The default association path needs an identity the resource lacks.
    #[error("Cannot build path for {resource}#{association}: resource has no id")]
    MissingIdentity {
        /// The resource type name.
        resource: String,
        /// The association being resolved.
        association: String,
    },

    /// The resource type can only be reached through a parent association.
    #[error("{resource} does not support find; load it through its parent association")]
    FindUnsupported {
        /// The resource type name.
        resource: String,
    },

    /// The resource was not found (HTTP 404).
    #[error("{resource} with id {id} not found")]
    NotFound {
        /// The resource type name.
        resource: String,
        /// The ID that was requested.
        id: String,
    },

    /// The response body did not have the expected shape.
    #[error("Unexpected response for {path}: {message}")]
    UnexpectedResponse {
        /// The API path the data came from.
        path: String,
        /// What was wrong with the data.
        message: String,
    },

    /// Attributes could not be decoded into the requested type.
    #[error("Failed to decode {resource}: {source}")]
    Decode {
        /// The resource type name.
        resource: String,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },

    /// A REST-level error occurred.
    #[error(transparent)]
    Rest(#[from] RestError),
}

impl ResourceError {
    /// Maps a REST error from a single-resource read, turning 404 into
    /// [`ResourceError::NotFound`].
    #[must_use]
    pub fn from_find_error(error: RestError, resource: &str, id: &str) -> Self {
        match error {
            RestError::Http(HttpError::Status(ref e)) if e.status == 404 => Self::NotFound {
                resource: resource.to_string(),
                id: id.to_string(),
            },
            other => Self::Rest(other),
        }
    }

    /// Returns `true` when an association was declared without a class name.
    #[must_use]
    pub const fn is_configuration_error(&self) -> bool {
        matches!(self, Self::MissingClassName { .. })
    }

    /// Returns `true` when a class name does not resolve to a registered type.
    #[must_use]
    pub const fn is_lookup_error(&self) -> bool {
        matches!(self, Self::UnknownResourceType { .. })
    }
}
