//! Slice store primitives.
//!
//! Every slice of client state (products, cart, search, theme) is owned by
//! exactly one [`Store`] and changes only through its reducer:
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑                              │
//!    └────── effects (network) ─────┘
//! ```
//!
//! - **State**: plain data, cloned into snapshots for readers
//! - **Intent**: a user action or a network outcome
//! - **Reducer**: applies an intent to the state and reports whether it changed
//!
//! Network-backed intents carry a [`RequestToken`]. A slice records the
//! token of its latest request and reducers drop responses whose token no
//! longer matches, so a slow response can never overwrite newer state.

mod handle;
mod token;

pub use handle::Store;
pub use token::{RequestToken, TokenSource};

/// Marker trait for intents handled by a reducer.
pub trait Intent: Send + 'static {}

/// Marker trait for slice state.
///
/// States should be:
/// - Cheap enough to clone into snapshots
/// - Self-contained (all data needed to render the slice)
/// - Comparable, so snapshots can be checked against each other
pub trait SliceState: Clone + PartialEq + Default + Send + Sync + 'static {}

/// Reducer transforms slice state based on intents.
///
/// The reducer is the only place where state transitions happen. It must
/// be deterministic and free of I/O, and it reports whether the intent
/// changed anything so the store can skip notifying subscribers.
pub trait Reducer {
    /// The state type this reducer operates on.
    type State: SliceState;

    /// The intent type this reducer handles.
    type Intent: Intent;

    /// Apply an intent in place. Returns `true` if the state changed.
    fn reduce(state: &mut Self::State, intent: Self::Intent) -> bool;

    /// Apply an intent to an owned state.
    fn apply(mut state: Self::State, intent: Self::Intent) -> Self::State {
        Self::reduce(&mut state, intent);
        state
    }
}
