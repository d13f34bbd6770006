use cartwheel_core::{Cart, LoadStatus, Price};
use serde::{Deserialize, Serialize};

use crate::store::{RequestToken, SliceState};

/// Which cart request is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOperation {
    Fetch,
    Add,
    Update,
    Delete,
}

impl CartOperation {
    /// Notice shown when the operation fails.
    #[must_use]
    pub const fn failure_notice(self) -> &'static str {
        match self {
            Self::Fetch => "Error fetching cart",
            Self::Add => "Error adding cart",
            Self::Update => "Error updating cart",
            Self::Delete => "Error deleting cart",
        }
    }

    /// Notice shown when the operation succeeds, if any.
    #[must_use]
    pub const fn success_notice(self) -> Option<&'static str> {
        match self {
            Self::Fetch => None,
            Self::Add => Some("Cart added successfully!"),
            Self::Update => Some("Cart updated successfully!"),
            Self::Delete => Some("Cart deleted successfully!"),
        }
    }
}

/// Active cart state. Only `cart` is persisted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CartState {
    /// The server-confirmed cart, if one is resident.
    pub cart: Option<Cart>,
    /// Progress of the last `fetch_cart`.
    #[serde(skip)]
    pub status: LoadStatus,
    #[serde(skip)]
    pub error: Option<String>,
    #[serde(skip)]
    pub(crate) in_flight: Option<(RequestToken, CartOperation)>,
}

impl SliceState for CartState {}

impl CartState {
    /// Adopt a persisted cart. Status and errors start over.
    #[must_use]
    pub fn rehydrated(self) -> Self {
        Self {
            cart: self.cart,
            ..Self::default()
        }
    }

    /// The outstanding request, if any.
    #[must_use]
    pub fn pending_operation(&self) -> Option<CartOperation> {
        self.in_flight.map(|(_, op)| op)
    }

    /// Total of the resident cart, zero when there is none.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.cart.as_ref().map_or(Price::ZERO, Cart::total_price)
    }

    /// Number of items in the resident cart.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.cart.as_ref().map_or(0, Cart::total_quantity)
    }
}
