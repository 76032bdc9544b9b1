//! REST API client for the Yoolk API.
//!
//! [`RestClient`] wraps [`HttpClient`](crate::clients::HttpClient) with the
//! API version base path and path normalization. Resources and collections
//! issue all of their reads through it.
//!
//! # Path Normalization
//!
//! - Leading slashes are stripped: `/products/42` -> `products/42`
//! - A trailing `.json` is stripped and re-added: `products.json` -> `products.json`
//!
//! # Example
//!
//! ```rust,ignore
//! use yoolk_api::{ApiConfig, DomainName, RestClient};
//!
//! let config = ApiConfig::builder()
//!     .domain_name(DomainName::new("yellowpages-cambodia.com").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let client = RestClient::new(&config)?;
//! let response = client.get("/products/42/categories", None).await?;
//! ```

mod client;
mod errors;

pub use client::RestClient;
pub use errors::RestError;
