//! Catalog product.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// A catalog item as returned by the catalog service.
///
/// Products are immutable from the client's perspective: stores hold and
/// reference them by id but never edit them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub stock: u32,
    /// Average rating in `[0, 5]`.
    #[serde(default)]
    pub rating: f64,
    /// Discount in percent, `[0, 100]`.
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub discount_percentage: Option<Decimal>,
}

impl Product {
    /// Whether the product can be added to a cart.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Price after the product's discount, if it has a non-zero one.
    #[must_use]
    pub fn discounted_price(&self) -> Option<Price> {
        self.discount_percentage
            .filter(|pct| !pct.is_zero())
            .map(|pct| self.price.discounted(pct))
    }

    /// Rating clamped to the `[0, 5]` scale.
    #[must_use]
    pub fn rating(&self) -> f64 {
        self.rating.clamp(0.0, 5.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const PRODUCT_JSON: &str = r#"{
        "id": 1,
        "title": "Essence Mascara Lash Princess",
        "description": "Popular mascara",
        "category": "beauty",
        "price": 9.99,
        "discountPercentage": 7.17,
        "rating": 4.94,
        "stock": 5,
        "tags": ["beauty", "mascara"],
        "thumbnail": "https://cdn.example.com/1/thumbnail.png"
    }"#;

    #[test]
    fn test_deserializes_catalog_payload() {
        let product: Product = serde_json::from_str(PRODUCT_JSON).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.category.as_deref(), Some("beauty"));
        assert_eq!(product.price, Price::from_cents(999));
        assert_eq!(product.stock, 5);
        assert_eq!(product.discount_percentage, Some(Decimal::new(717, 2)));
    }

    #[test]
    fn test_minimal_payload_uses_defaults() {
        let product: Product =
            serde_json::from_str(r#"{"id": 2, "title": "Plain", "price": 1}"#).unwrap();
        assert_eq!(product.category, None);
        assert_eq!(product.stock, 0);
        assert!(!product.in_stock());
        assert_eq!(product.discounted_price(), None);
    }

    #[test]
    fn test_discounted_price() {
        let product: Product = serde_json::from_str(PRODUCT_JSON).unwrap();
        assert_eq!(product.discounted_price(), Some(Price::from_cents(927)));
    }

    #[test]
    fn test_rating_is_clamped() {
        let mut product: Product = serde_json::from_str(PRODUCT_JSON).unwrap();
        product.rating = 7.5;
        assert!((product.rating() - 5.0).abs() < f64::EPSILON);
    }
}
