use cartwheel_core::LoadStatus;
use tracing::debug;

use super::intent::CartIntent;
use super::state::{CartOperation, CartState};
use crate::store::{Reducer, RequestToken};

pub struct CartReducer;

impl CartReducer {
    /// Take the in-flight slot if `token` owns it.
    fn settle(state: &mut CartState, token: RequestToken) -> Option<CartOperation> {
        match state.in_flight {
            Some((current, op)) if current == token => {
                state.in_flight = None;
                Some(op)
            }
            _ => {
                debug!(%token, "Dropping stale cart response");
                None
            }
        }
    }

    /// A mutation finished. Settles a fetch it superseded.
    fn finish_mutation(state: &mut CartState, status: LoadStatus) {
        if state.status.is_loading() {
            state.status = status;
        }
    }
}

impl Reducer for CartReducer {
    type State = CartState;
    type Intent = CartIntent;

    fn reduce(state: &mut Self::State, intent: Self::Intent) -> bool {
        match intent {
            CartIntent::Pending { token, operation } => {
                state.in_flight = Some((token, operation));
                state.error = None;
                if operation == CartOperation::Fetch {
                    state.status = LoadStatus::Loading;
                }
            }
            CartIntent::Fetched { token, cart } => {
                if Self::settle(state, token).is_none() {
                    return false;
                }
                state.cart = cart.map(|c| *c);
                state.status = LoadStatus::Succeeded;
            }
            CartIntent::Saved { token, cart } => {
                if Self::settle(state, token).is_none() {
                    return false;
                }
                state.cart = Some(*cart);
                Self::finish_mutation(state, LoadStatus::Succeeded);
            }
            CartIntent::Deleted { token } => {
                if Self::settle(state, token).is_none() {
                    return false;
                }
                state.cart = None;
                Self::finish_mutation(state, LoadStatus::Succeeded);
            }
            CartIntent::Rejected { token, message } => {
                let Some(op) = Self::settle(state, token) else {
                    return false;
                };
                // The resident cart stays as last confirmed
                state.error = Some(message);
                if op == CartOperation::Fetch {
                    state.status = LoadStatus::Failed;
                } else {
                    Self::finish_mutation(state, LoadStatus::Failed);
                }
            }
        }
        // Every applied intent moves the in-flight slot
        true
    }
}
