//! Cartwheel storefront state library.
//!
//! Client-side state for a mobile storefront: product browsing with
//! client-side pagination, a single server-confirmed cart, catalog search
//! and a persisted theme. Views read slice snapshots and dispatch the
//! intents exposed by [`state::AppState`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod notice;
pub mod persist;
pub mod slices;
pub mod state;
pub mod store;

#[cfg(test)]
mod testing;

pub use error::{GuardViolation, Result, StoreError};
pub use state::AppState;
