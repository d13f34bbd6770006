//! Unified error handling.
//!
//! Provides a unified `StoreError` type returned by every application
//! intent. Failures are also recorded on the owning slice and surfaced as
//! notices; the `Result` lets callers branch on them.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::persist::PersistError;

/// A client-side guard rejected an intent before any request was sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GuardViolation {
    /// Cart quantities must be at least 1.
    #[error("Quantity must be at least 1")]
    QuantityBelowOne,

    /// The product has no stock left.
    #[error("Product is out of stock")]
    OutOfStock,

    /// Searching requires a non-empty query.
    #[error("Search query is empty")]
    EmptyQuery,

    /// The intent needs a resident cart.
    #[error("No active cart")]
    NoActiveCart,

    /// The product is not a line of the active cart.
    #[error("Product is not in the cart")]
    LineNotInCart,

    /// Adding an empty line list to a cart.
    #[error("No cart lines given")]
    NoLines,

    /// The cart is being deleted; edits would race the deletion.
    #[error("Cart is being deleted")]
    DeletePending,
}

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Catalog service call failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Rejected before any network call.
    #[error(transparent)]
    Guard(#[from] GuardViolation),

    /// Persistence adapter failed.
    #[error("Persistence error: {0}")]
    Persist(#[from] PersistError),
}

impl StoreError {
    /// The guard that rejected the intent, if any.
    #[must_use]
    pub const fn guard(&self) -> Option<GuardViolation> {
        match self {
            Self::Guard(guard) => Some(*guard),
            _ => None,
        }
    }
}

/// Result type alias for `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::from(GuardViolation::QuantityBelowOne);
        assert_eq!(err.to_string(), "Quantity must be at least 1");
        assert_eq!(err.guard(), Some(GuardViolation::QuantityBelowOne));

        let err = StoreError::from(CatalogError::NotFound("product 9".to_string()));
        assert_eq!(err.to_string(), "Not found: product 9");
        assert_eq!(err.guard(), None);
    }
}
