//! Resources, has-many associations and lazy collections.
//!
//! - [`ResourceType`]: declares a resource and its has-many associations
//! - [`ResourceRegistry`]: resolves class names to types at accessor time
//! - [`ResourceClass`]: a resolved type; instantiates and finds resources
//! - [`Resource`]: one resource with a per-instance collection cache
//! - [`Collection`]: a lazily materialized, queryable list of resources
//! - [`ResourceError`]: errors raised by the above
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
//! if product.has("categories", &client).await? {
//!     let categories = product.get("categories")?.load(&client).await?;
//!     println!("{} categories", categories.len());
//! }
//! ```

mod association;
mod collection;
mod errors;
mod path;
mod registry;
mod resource;

pub use association::{AssociationDescriptor, HasManyOptions};
pub use collection::{Collection, CollectionQuery};
pub use errors::ResourceError;
pub use path::{association_path, build_path, find_path, ASSOCIATION_TEMPLATE, FIND_TEMPLATE};
pub use registry::{ResourceClass, ResourceRegistry, ResourceRegistryBuilder, ResourceType};
pub use resource::Resource;
