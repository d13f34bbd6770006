//! State slices.
//!
//! Each slice is exclusively owned by its [`Store`](crate::store::Store)
//! and mutated only by its reducer. Effects perform the network calls and
//! feed outcomes back as intents. Slices never write to each other; cross
//! slice reads use snapshots.

pub mod cart;
pub mod products;
pub mod search;
pub mod theme;
