//! Catalog service client.
//!
//! # Architecture
//!
//! - The catalog service is the source of truth for products and carts
//! - Plain JSON over HTTPS via `reqwest`, no caching
//! - [`CatalogApi`] is the seam between slice effects and the network, so
//!   effects can be driven by in-memory fakes in tests
//!
//! # Endpoints
//!
//! - `GET /products`, `GET /products/{id}`, `GET /products/search?q=`
//! - `GET /carts` (only the first cart is used)
//! - `POST /carts/add`, `PUT /carts/{id}`, `DELETE /carts/{id}`
//!
//! # Example
//!
//! ```rust,ignore
//! use cartwheel_storefront::catalog::{CatalogApi, CatalogClient};
//!
//! let client = CatalogClient::new(&config.catalog)?;
//! let products = client.fetch_products().await?;
//! let cart = client.add_cart(&[CartLineInput::new(products[0].id, 1)]).await?;
//! ```

mod client;
pub mod types;

use std::future::Future;

use cartwheel_core::{Cart, CartId, CartLineInput, Product, ProductId};
use thiserror::Error;

pub use client::CatalogClient;
pub use types::DeletedCart;

/// Errors that can occur when talking to the catalog service.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Request could not be sent or the response body could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Catalog service returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Leading part of the response body.
        body: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl CatalogError {
    /// Whether the error is a missing resource rather than a network failure.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Operations the slice effects need from the catalog service.
///
/// Implemented by [`CatalogClient`] for the real service.
pub trait CatalogApi: Send + Sync {
    /// Fetch the product list.
    fn fetch_products(&self) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send;

    /// Fetch one product.
    fn fetch_product(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<Product, CatalogError>> + Send;

    /// Search products by free text.
    fn search_products(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send;

    /// Fetch the active cart.
    ///
    /// The service returns a collection of carts; the client always uses
    /// the first one. `None` means the collection was empty.
    fn fetch_active_cart(
        &self,
    ) -> impl Future<Output = Result<Option<Cart>, CatalogError>> + Send;

    /// Create a cart server-side from the given lines.
    fn add_cart(
        &self,
        lines: &[CartLineInput],
    ) -> impl Future<Output = Result<Cart, CatalogError>> + Send;

    /// Replace a cart's lines.
    fn update_cart(
        &self,
        id: CartId,
        lines: &[CartLineInput],
    ) -> impl Future<Output = Result<Cart, CatalogError>> + Send;

    /// Delete a cart.
    fn delete_cart(
        &self,
        id: CartId,
    ) -> impl Future<Output = Result<DeletedCart, CatalogError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_display() {
        let err = CatalogError::NotFound("product 999".to_string());
        assert_eq!(err.to_string(), "Not found: product 999");
        assert!(err.is_not_found());

        let err = CatalogError::Status {
            status: 503,
            body: "unavailable".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Catalog service returned 503: unavailable"
        );
        assert!(!err.is_not_found());
    }
}
