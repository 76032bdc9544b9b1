//! # Yoolk API Rust Client
//!
//! A client for the Yoolk REST API with declarative has-many associations
//! and lazily loaded, queryable collections.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ApiConfig`] and [`ApiConfigBuilder`]
//! - Validated newtypes for the API domain and access token
//! - An async, read-only HTTP client that retries 429 and 500 answers
//! - A REST client that normalizes paths to `/{version}/{path}.json`
//! - Resource types with has-many associations resolved at accessor time
//! - Per-resource collection caching with inline (embedded) data seeding
//!
//! ## Quick Start
//!
//! ```rust
//! use yoolk_api::{AccessToken, ApiConfig, DomainName, RestClient};
//!
//! let config = ApiConfig::builder()
//!     .domain_name(DomainName::new("yellowpages-cambodia.dev:3000").unwrap())
//!     .access_token(AccessToken::new("secret-token").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let client = RestClient::new(&config).unwrap();
//! assert_eq!(client.http_client().base_path(), "/v1");
//! ```
//!
//! ## Associations
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
//! // One GET /v1/products/42/categories.json, unless the product response
//! // embedded its categories.
//! let count = product.get("categories")?.size(&client).await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: configuration and the registry are passed explicitly
//! - **Fail at use**: association misconfiguration is reported when the accessor runs
//! - **Thread-safe**: configuration, clients and resources are `Send + Sync`
//! - **Async-first**: designed for use with the Tokio runtime

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use config::{AccessToken, ApiConfig, ApiConfigBuilder, ApiVersion, DomainName};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    ApiRequest, ApiResponse, ApiStatusError, HttpClient, HttpError, RestClient, RestError,
    RetriesExhaustedError,
};

// Re-export resource types
pub use rest::{
    Collection, HasManyOptions, Resource, ResourceClass, ResourceError, ResourceRegistry,
    ResourceType,
};
