use cartwheel_core::Cart;

use super::state::CartOperation;
use crate::store::{Intent, RequestToken};

/// Intents handled by the cart slice.
#[derive(Debug, Clone)]
pub enum CartIntent {
    /// A cart request was issued. Replaces any outstanding one.
    Pending {
        token: RequestToken,
        operation: CartOperation,
    },
    /// `GET /carts` answered. `None` when the collection was empty.
    Fetched {
        token: RequestToken,
        cart: Option<Box<Cart>>,
    },
    /// A created or updated cart was echoed back.
    Saved { token: RequestToken, cart: Box<Cart> },
    /// The cart was deleted server-side.
    Deleted { token: RequestToken },
    Rejected { token: RequestToken, message: String },
}

impl Intent for CartIntent {}
