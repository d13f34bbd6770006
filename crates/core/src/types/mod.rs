//! Core types for Cartwheel.
//!
//! This module provides type-safe wrappers for the catalog domain.

pub mod cart;
pub mod id;
pub mod price;
pub mod product;
pub mod status;

pub use cart::{Cart, CartLine, CartLineInput};
pub use id::*;
pub use price::{Price, PriceError};
pub use product::Product;
pub use status::*;
