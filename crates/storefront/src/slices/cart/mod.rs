//! Cart slice: the single active cart and the checkout flow.
//!
//! The cart shown to the user is always the one the catalog service last
//! echoed back. Quantity edits round-trip through `PUT /carts/{id}` and are
//! never applied locally first.

mod checkout;
pub mod effects;
mod intent;
mod reducer;
mod state;

pub use checkout::{CheckoutIntent, CheckoutReducer, CheckoutState};
pub use intent::CartIntent;
pub use reducer::CartReducer;
pub use state::{CartOperation, CartState};

/// Store handle for the cart slice.
pub type CartStore = crate::store::Store<CartReducer>;

/// Store handle for the checkout sheet.
pub type CheckoutStore = crate::store::Store<CheckoutReducer>;
