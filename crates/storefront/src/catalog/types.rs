//! Wire types for the catalog service REST API.
//!
//! Domain types ([`Product`], [`Cart`]) deserialize directly from the
//! service's JSON; this module only holds the envelopes around them and
//! the request bodies.

use cartwheel_core::{Cart, CartId, CartLineInput, Product, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `GET /products` and `GET /products/search` response.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductsEnvelope {
    pub products: Vec<Product>,
    #[serde(default)]
    pub total: Option<u64>,
}

/// `GET /carts` response.
#[derive(Debug, Clone, Deserialize)]
pub struct CartsEnvelope {
    pub carts: Vec<Cart>,
}

/// `POST /carts/add` request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCartBody<'a> {
    pub user_id: UserId,
    pub products: &'a [CartLineInput],
}

/// `PUT /carts/{id}` request body.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateCartBody<'a> {
    pub products: &'a [CartLineInput],
}

/// `DELETE /carts/{id}` confirmation payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedCart {
    pub id: CartId,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default)]
    pub deleted_on: Option<DateTime<Utc>>,
}
