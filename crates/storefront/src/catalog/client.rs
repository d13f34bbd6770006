//! `reqwest` implementation of [`CatalogApi`].

use std::sync::Arc;

use cartwheel_core::{Cart, CartId, CartLineInput, Product, ProductId, UserId};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::types::{AddCartBody, CartsEnvelope, DeletedCart, ProductsEnvelope, UpdateCartBody};
use super::{CatalogApi, CatalogError};
use crate::config::CatalogConfig;

/// How much of an error body is kept for diagnostics.
const BODY_PREVIEW_CHARS: usize = 200;

/// Client for the catalog service.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    user_id: UserId,
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("user_id", &self.inner.user_id)
            .finish_non_exhaustive()
    }
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                base_url: config.base_url.clone(),
                user_id: config.user_id,
            }),
        })
    }

    /// Build an endpoint URL from path segments below the base URL.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.inner.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Send a request and decode a JSON response.
    ///
    /// `resource` names what was requested; it is used for 404 errors.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        resource: &str,
    ) -> Result<T, CatalogError> {
        let response = request.send().await?;
        let status = response.status();

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(resource.to_string()));
        }

        if !status.is_success() {
            tracing::warn!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Catalog service returned non-success status"
            );
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body: body.chars().take(BODY_PREVIEW_CHARS).collect(),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse catalog service response"
            );
            CatalogError::Parse(e)
        })
    }
}

impl CatalogApi for CatalogClient {
    #[instrument(skip(self))]
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        let url = self.endpoint(&["products"]);
        let envelope: ProductsEnvelope = self
            .execute(self.inner.client.get(url), "products")
            .await?;
        debug!(
            count = envelope.products.len(),
            total = ?envelope.total,
            "Fetched products"
        );
        Ok(envelope.products)
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn fetch_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        let id_segment = id.to_string();
        let url = self.endpoint(&["products", &id_segment]);
        self.execute(self.inner.client.get(url), &format!("product {id}"))
            .await
    }

    #[instrument(skip(self))]
    async fn search_products(&self, query: &str) -> Result<Vec<Product>, CatalogError> {
        let mut url = self.endpoint(&["products", "search"]);
        url.query_pairs_mut().append_pair("q", query);
        let envelope: ProductsEnvelope = self
            .execute(self.inner.client.get(url), "search results")
            .await?;
        debug!(
            count = envelope.products.len(),
            total = ?envelope.total,
            "Fetched search results"
        );
        Ok(envelope.products)
    }

    #[instrument(skip(self))]
    async fn fetch_active_cart(&self) -> Result<Option<Cart>, CatalogError> {
        let url = self.endpoint(&["carts"]);
        let envelope: CartsEnvelope = self.execute(self.inner.client.get(url), "carts").await?;
        if envelope.carts.len() > 1 {
            debug!(
                count = envelope.carts.len(),
                "Catalog returned several carts, using the first"
            );
        }
        Ok(envelope.carts.into_iter().next())
    }

    #[instrument(skip(self, lines), fields(lines = lines.len()))]
    async fn add_cart(&self, lines: &[CartLineInput]) -> Result<Cart, CatalogError> {
        let url = self.endpoint(&["carts", "add"]);
        let body = AddCartBody {
            user_id: self.inner.user_id,
            products: lines,
        };
        self.execute(self.inner.client.post(url).json(&body), "cart")
            .await
    }

    #[instrument(skip(self, lines), fields(cart_id = %id, lines = lines.len()))]
    async fn update_cart(&self, id: CartId, lines: &[CartLineInput]) -> Result<Cart, CatalogError> {
        let id_segment = id.to_string();
        let url = self.endpoint(&["carts", &id_segment]);
        let body = UpdateCartBody { products: lines };
        self.execute(self.inner.client.put(url).json(&body), &format!("cart {id}"))
            .await
    }

    #[instrument(skip(self), fields(cart_id = %id))]
    async fn delete_cart(&self, id: CartId) -> Result<DeletedCart, CatalogError> {
        let id_segment = id.to_string();
        let url = self.endpoint(&["carts", &id_segment]);
        self.execute(self.inner.client.delete(url), &format!("cart {id}"))
            .await
    }
}
