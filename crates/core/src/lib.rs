//! Cartwheel Core - Shared domain types.
//!
//! This crate provides the types used across all Cartwheel components:
//! - `storefront` - Catalog client, slice stores and persistence
//! - `cli` - Command-line driver for the stores
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no state containers. This keeps it lightweight and allows it to
//! be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Typed ids, prices, products, carts and status enums

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
