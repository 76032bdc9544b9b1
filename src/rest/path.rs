//! Path building for resources and their associations.
//!
//! Paths are built from templates with `{name}` placeholders. Resource and
//! association names are declared by the caller and inserted as given; only
//! the identity comes from response data, so it alone is percent-encoded
//! and an id such as `"a/b"` cannot escape its segment.
//!
//! # Example
//!
//! ```rust
//! use yoolk_api::rest::{association_path, build_path};
//! use std::collections::HashMap;
//!
//! assert_eq!(association_path("products", "42", "categories"), "/products/42/categories");
//!
//! let mut ids = HashMap::new();
//! ids.insert("resource_name", "portals");
//! ids.insert("id", "current");
//! assert_eq!(build_path("/{resource_name}/{id}", &ids), "/portals/current");
//! ```

use std::collections::HashMap;
use std::fmt::Display;

/// Template for a single resource: `/{resource_name}/{id}`.
pub const FIND_TEMPLATE: &str = "/{resource_name}/{id}";

/// Default template for a has-many association.
pub const ASSOCIATION_TEMPLATE: &str = "/{resource_name}/{id}/{association}";

/// Builds a path from a template by interpolating values verbatim.
///
/// Placeholders missing from `values` are left unchanged.
#[must_use]
#[allow(clippy::implicit_hasher)]
pub fn build_path<V: Display>(template: &str, values: &HashMap<&str, V>) -> String {
    values.iter().fold(template.to_string(), |path, (key, value)| {
        path.replace(&format!("{{{key}}}"), &value.to_string())
    })
}

/// Builds the default association path
/// `/{resource_name}/{identity}/{association}`.
#[must_use]
pub fn association_path(resource_name: &str, identity: &str, association: &str) -> String {
    let identity = urlencoding::encode(identity);
    let values = HashMap::from([
        ("resource_name", resource_name),
        ("id", &*identity),
        ("association", association),
    ]);
    build_path(ASSOCIATION_TEMPLATE, &values)
}

/// Builds the path of a single resource, `/{resource_name}/{id}`.
#[must_use]
pub fn find_path(resource_name: &str, identity: &str) -> String {
    let identity = urlencoding::encode(identity);
    let values = HashMap::from([("resource_name", resource_name), ("id", &*identity)]);
    build_path(FIND_TEMPLATE, &values)
}
