//! Checkout sheet state machine.
//!
//! ```text
//! Idle ──Open──→ SheetOpen ──Confirm──→ Confirming ──Deleted──→ CartDeleted ──Reset──→ Idle
//!                  ↑  │                     │
//!                  │  └──Dismiss──→ Idle     │
//!                  └──────────Failed─────────┘
//! ```
//!
//! Checkout only deletes the active cart. There is no payment step.

use cartwheel_core::CartId;

use crate::store::{Intent, Reducer, SliceState};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CheckoutState {
    #[default]
    Idle,
    /// Confirmation sheet is showing, with the last failure if any.
    SheetOpen { error: Option<String> },
    /// The delete request is outstanding.
    Confirming { cart_id: CartId },
    /// The cart is gone; the sheet shows a completion message.
    CartDeleted { cart_id: CartId },
}

impl SliceState for CheckoutState {}

impl CheckoutState {
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

#[derive(Debug, Clone)]
pub enum CheckoutIntent {
    Open,
    Dismiss,
    Confirm { cart_id: CartId },
    Deleted,
    Failed { message: String },
    Reset,
}

impl Intent for CheckoutIntent {}

pub struct CheckoutReducer;

impl Reducer for CheckoutReducer {
    type State = CheckoutState;
    type Intent = CheckoutIntent;

    fn reduce(state: &mut Self::State, intent: Self::Intent) -> bool {
        let next = match (&*state, intent) {
            (CheckoutState::Idle, CheckoutIntent::Open) => CheckoutState::SheetOpen { error: None },
            (CheckoutState::SheetOpen { .. }, CheckoutIntent::Dismiss) => CheckoutState::Idle,
            (CheckoutState::SheetOpen { .. }, CheckoutIntent::Confirm { cart_id }) => {
                CheckoutState::Confirming { cart_id }
            }
            (CheckoutState::Confirming { cart_id }, CheckoutIntent::Deleted) => {
                CheckoutState::CartDeleted { cart_id: *cart_id }
            }
            (CheckoutState::Confirming { .. }, CheckoutIntent::Failed { message }) => {
                CheckoutState::SheetOpen {
                    error: Some(message),
                }
            }
            (CheckoutState::CartDeleted { .. }, CheckoutIntent::Reset) => CheckoutState::Idle,
            _ => return false,
        };
        *state = next;
        true
    }
}
