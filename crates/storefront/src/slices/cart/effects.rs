//! Cart network effects and checkout.
//!
//! Guards run before any request is built; a rejected guard leaves the
//! slice untouched and sends nothing.

use cartwheel_core::{Cart, CartId, CartLineInput, Product, ProductId};
use tracing::{debug, instrument, warn};

use super::{CartIntent, CartOperation, CartStore, CheckoutIntent, CheckoutState, CheckoutStore};
use crate::catalog::{CatalogApi, CatalogError};
use crate::error::{GuardViolation, Result, StoreError};
use crate::notice::Notices;
use crate::store::RequestToken;

/// Record a failed cart request and build the error returned to the caller.
fn reject(
    store: &CartStore,
    notices: &Notices,
    token: RequestToken,
    operation: CartOperation,
    err: CatalogError,
) -> StoreError {
    let message = err.to_string();
    if store.dispatch(CartIntent::Rejected {
        token,
        message: message.clone(),
    }) {
        warn!(?operation, error = %message, "Cart request failed");
        notices.error(operation.failure_notice());
    }
    err.into()
}

/// Record a created or updated cart.
fn saved(
    store: &CartStore,
    notices: &Notices,
    token: RequestToken,
    operation: CartOperation,
    cart: Cart,
) {
    if store.dispatch(CartIntent::Saved {
        token,
        cart: Box::new(cart),
    }) && let Some(message) = operation.success_notice()
    {
        notices.success(message);
    }
}

/// Edits are refused while a delete is pending, so the delete cannot be
/// superseded by a cart the server no longer has.
fn check_not_deleting(store: &CartStore) -> Result<()> {
    if store.select(|s| s.pending_operation()) == Some(CartOperation::Delete) {
        return Err(GuardViolation::DeletePending.into());
    }
    Ok(())
}

fn check_quantities(lines: &[CartLineInput]) -> Result<()> {
    if lines.iter().any(|line| line.quantity < 1) {
        return Err(GuardViolation::QuantityBelowOne.into());
    }
    Ok(())
}

/// Load the active cart. An empty carts collection leaves no cart resident.
///
/// # Errors
///
/// Returns the catalog error after recording it; a prior cart is kept.
#[instrument(skip_all)]
pub async fn fetch_cart<A: CatalogApi>(api: &A, store: &CartStore, notices: &Notices) -> Result<()> {
    let token = store.next_token();
    store.dispatch(CartIntent::Pending {
        token,
        operation: CartOperation::Fetch,
    });

    match api.fetch_active_cart().await {
        Ok(cart) => {
            store.dispatch(CartIntent::Fetched {
                token,
                cart: cart.map(Box::new),
            });
            Ok(())
        }
        Err(err) => Err(reject(store, notices, token, CartOperation::Fetch, err)),
    }
}

/// Create a cart from `lines`. The server's merged cart replaces the
/// resident one.
///
/// # Errors
///
/// Returns a guard violation for an empty list, a zero quantity or a
/// pending delete, or the catalog error after recording it.
#[instrument(skip_all, fields(lines = lines.len()))]
pub async fn add_cart<A: CatalogApi>(
    api: &A,
    store: &CartStore,
    notices: &Notices,
    lines: &[CartLineInput],
) -> Result<()> {
    if lines.is_empty() {
        return Err(GuardViolation::NoLines.into());
    }
    check_quantities(lines)?;
    check_not_deleting(store)?;

    let token = store.next_token();
    store.dispatch(CartIntent::Pending {
        token,
        operation: CartOperation::Add,
    });

    match api.add_cart(lines).await {
        Ok(cart) => {
            saved(store, notices, token, CartOperation::Add, cart);
            Ok(())
        }
        Err(err) => Err(reject(store, notices, token, CartOperation::Add, err)),
    }
}

/// Add one unit of a product.
///
/// # Errors
///
/// Returns [`GuardViolation::OutOfStock`] without a request when the
/// product has no stock, otherwise as [`add_cart`].
pub async fn add_product<A: CatalogApi>(
    api: &A,
    store: &CartStore,
    notices: &Notices,
    product: &Product,
) -> Result<()> {
    if !product.in_stock() {
        debug!(product_id = %product.id, "Refusing to add out-of-stock product");
        return Err(GuardViolation::OutOfStock.into());
    }
    add_cart(api, store, notices, &[CartLineInput::new(product.id, 1)]).await
}

/// Replace the line list of cart `id`.
///
/// # Errors
///
/// Returns [`GuardViolation::QuantityBelowOne`] for a zero quantity,
/// [`GuardViolation::DeletePending`] while the cart is being deleted, or the
/// catalog error after recording it.
#[instrument(skip(api, store, notices, lines), fields(lines = lines.len()))]
pub async fn update_cart<A: CatalogApi>(
    api: &A,
    store: &CartStore,
    notices: &Notices,
    id: CartId,
    lines: &[CartLineInput],
) -> Result<()> {
    check_quantities(lines)?;
    check_not_deleting(store)?;

    let token = store.next_token();
    store.dispatch(CartIntent::Pending {
        token,
        operation: CartOperation::Update,
    });

    match api.update_cart(id, lines).await {
        Ok(cart) => {
            saved(store, notices, token, CartOperation::Update, cart);
            Ok(())
        }
        Err(err) => Err(reject(store, notices, token, CartOperation::Update, err)),
    }
}

/// Set one line's quantity. The resident cart changes only once the
/// server confirms.
///
/// # Errors
///
/// Guard violations for `quantity < 1`, no resident cart, or a product that
/// is not in the cart; otherwise as [`update_cart`].
pub async fn update_quantity<A: CatalogApi>(
    api: &A,
    store: &CartStore,
    notices: &Notices,
    product_id: ProductId,
    quantity: u32,
) -> Result<()> {
    if quantity < 1 {
        return Err(GuardViolation::QuantityBelowOne.into());
    }
    let (cart_id, lines) = store.select(|s| {
        let cart = s.cart.as_ref().ok_or(GuardViolation::NoActiveCart)?;
        let lines = cart
            .lines_with_quantity(product_id, quantity)
            .ok_or(GuardViolation::LineNotInCart)?;
        Ok::<_, GuardViolation>((cart.id, lines))
    })?;
    update_cart(api, store, notices, cart_id, &lines).await
}

/// Delete cart `id`.
///
/// Returns whether the deletion was applied to the slice; `false` means a
/// newer cart request took over and the resident cart was left alone.
///
/// # Errors
///
/// Returns the catalog error after recording it.
#[instrument(skip(api, store, notices))]
pub async fn delete_cart<A: CatalogApi>(
    api: &A,
    store: &CartStore,
    notices: &Notices,
    id: CartId,
) -> Result<bool> {
    let token = store.next_token();
    store.dispatch(CartIntent::Pending {
        token,
        operation: CartOperation::Delete,
    });

    match api.delete_cart(id).await {
        Ok(deleted) => {
            if !deleted.is_deleted {
                warn!(cart_id = %deleted.id, "Catalog did not confirm cart deletion");
            }
            let applied = store.dispatch(CartIntent::Deleted { token });
            if applied && let Some(message) = CartOperation::Delete.success_notice() {
                notices.success(message);
            }
            Ok(applied)
        }
        Err(err) => Err(reject(store, notices, token, CartOperation::Delete, err)),
    }
}

/// Show the checkout sheet.
pub fn open_checkout(checkout: &CheckoutStore) {
    checkout.dispatch(CheckoutIntent::Open);
}

/// Hide the checkout sheet, or acknowledge a finished checkout.
pub fn dismiss_checkout(checkout: &CheckoutStore) {
    if matches!(checkout.snapshot(), CheckoutState::CartDeleted { .. }) {
        checkout.dispatch(CheckoutIntent::Reset);
    } else {
        checkout.dispatch(CheckoutIntent::Dismiss);
    }
}

/// Confirm checkout: delete the resident cart.
///
/// Returns `false` without a request when the sheet is not open, and
/// `false` with the sheet reopened when a newer cart request superseded the
/// delete.
///
/// # Errors
///
/// Returns [`GuardViolation::NoActiveCart`] when there is nothing to check
/// out, otherwise as [`delete_cart`]. A failure reopens the sheet.
pub async fn confirm_checkout<A: CatalogApi>(
    api: &A,
    store: &CartStore,
    checkout: &CheckoutStore,
    notices: &Notices,
) -> Result<bool> {
    let cart_id = store
        .select(|s| s.cart.as_ref().map(|c| c.id))
        .ok_or(GuardViolation::NoActiveCart)?;
    if !checkout.dispatch(CheckoutIntent::Confirm { cart_id }) {
        return Ok(false);
    }

    match delete_cart(api, store, notices, cart_id).await {
        Ok(true) => {
            checkout.dispatch(CheckoutIntent::Deleted);
            Ok(true)
        }
        Ok(false) => {
            warn!(%cart_id, "Cart delete was superseded");
            checkout.dispatch(CheckoutIntent::Failed {
                message: "Cart changed during checkout".to_string(),
            });
            Ok(false)
        }
        Err(err) => {
            checkout.dispatch(CheckoutIntent::Failed {
                message: err.to_string(),
            });
            Err(err)
        }
    }
}
