//! Cart and cart line types.
//!
//! The catalog service is the source of truth for carts: the client only
//! ever holds the cart the server last echoed back. Totals are derived on
//! demand and never stored.

use serde::{Deserialize, Serialize};

use super::id::{CartId, ProductId, UserId};
use super::price::Price;

/// A line submitted to the catalog service when creating or replacing a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CartLineInput {
    /// Product being purchased.
    pub id: ProductId,
    /// Number of units, at least 1.
    pub quantity: u32,
}

impl CartLineInput {
    /// Create a new line input.
    #[must_use]
    pub const fn new(id: ProductId, quantity: u32) -> Self {
        Self { id, quantity }
    }
}

/// A cart line with the product fields the server denormalizes into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub quantity: u32,
    #[serde(default)]
    pub thumbnail: String,
}

impl CartLine {
    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

impl From<&CartLine> for CartLineInput {
    fn from(line: &CartLine) -> Self {
        Self::new(line.id, line.quantity)
    }
}

/// The single active cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: CartId,
    /// Lines in server order.
    #[serde(rename = "products")]
    pub lines: Vec<CartLine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

impl Cart {
    /// Sum of unit price times quantity over all lines.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Find the line for a product.
    #[must_use]
    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == id)
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The full line list with one product's quantity replaced.
    ///
    /// Returns `None` if the product is not in the cart.
    #[must_use]
    pub fn lines_with_quantity(&self, id: ProductId, quantity: u32) -> Option<Vec<CartLineInput>> {
        self.line(id)?;
        Some(
            self.lines
                .iter()
                .map(|line| {
                    if line.id == id {
                        CartLineInput::new(line.id, quantity)
                    } else {
                        CartLineInput::from(line)
                    }
                })
                .collect(),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const CART_JSON: &str = r#"{
        "id": 1,
        "products": [
            {"id": 168, "title": "Charger SXT RWD", "price": 32999.99, "quantity": 3,
             "total": 98999.97, "thumbnail": "https://cdn.example.com/168.png"},
            {"id": 78, "title": "Apple MacBook Pro", "price": 1999.99, "quantity": 2,
             "total": 3999.98, "thumbnail": "https://cdn.example.com/78.png"}
        ],
        "total": 102999.95,
        "userId": 33,
        "totalProducts": 2,
        "totalQuantity": 5
    }"#;

    #[test]
    fn test_deserializes_server_cart() {
        let cart: Cart = serde_json::from_str(CART_JSON).unwrap();
        assert_eq!(cart.id, CartId::new(1));
        assert_eq!(cart.lines.len(), 2);
        assert_eq!(cart.user_id, Some(UserId::new(33)));
    }

    #[test]
    fn test_totals_are_recomputed() {
        let cart: Cart = serde_json::from_str(CART_JSON).unwrap();
        assert_eq!(cart.total_price(), Price::from_cents(10_299_995));
        assert_eq!(cart.total_price().to_string(), "$102999.95");
        assert_eq!(cart.total_quantity(), 5);
    }

    #[test]
    fn test_lines_with_quantity_replaces_one_line() {
        let cart: Cart = serde_json::from_str(CART_JSON).unwrap();
        let lines = cart.lines_with_quantity(ProductId::new(78), 4).unwrap();
        assert_eq!(
            lines,
            vec![
                CartLineInput::new(ProductId::new(168), 3),
                CartLineInput::new(ProductId::new(78), 4),
            ]
        );
    }

    #[test]
    fn test_lines_with_quantity_unknown_product() {
        let cart: Cart = serde_json::from_str(CART_JSON).unwrap();
        assert!(cart.lines_with_quantity(ProductId::new(1), 2).is_none());
    }

    #[test]
    fn test_line_input_wire_format() {
        let json = serde_json::to_value(CartLineInput::new(ProductId::new(5), 2)).unwrap();
        assert_eq!(json, serde_json::json!({"id": 5, "quantity": 2}));
    }
}
