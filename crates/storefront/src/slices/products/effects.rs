//! Network effects and synchronous intents for the product slice.

use cartwheel_core::{Product, ProductId};
use tracing::{instrument, warn};

use super::{ProductStore, ProductsIntent};
use crate::catalog::CatalogApi;
use crate::error::Result;
use crate::notice::Notices;

/// Fetch the catalog and reveal its first page.
///
/// On failure the previously fetched catalog stays in place and the error
/// is recorded on the slice.
///
/// # Errors
///
/// Returns the catalog error after recording it.
#[instrument(skip_all)]
pub async fn fetch_products<A: CatalogApi>(
    api: &A,
    store: &ProductStore,
    notices: &Notices,
) -> Result<()> {
    let token = store.next_token();
    store.dispatch(ProductsIntent::FetchPending { token });

    match api.fetch_products().await {
        Ok(products) => {
            store.dispatch(ProductsIntent::FetchFulfilled { token, products });
            Ok(())
        }
        Err(err) => {
            let message = err.to_string();
            if store.dispatch(ProductsIntent::FetchRejected {
                token,
                message: message.clone(),
            }) {
                warn!(error = %message, "Failed to fetch products");
                notices.error("Failed to fetch products");
            }
            Err(err.into())
        }
    }
}

/// Pull-to-refresh: drop the catalog, mark refreshing, fetch again.
///
/// # Errors
///
/// Returns the catalog error after recording it.
pub async fn refresh_products<A: CatalogApi>(
    api: &A,
    store: &ProductStore,
    notices: &Notices,
) -> Result<()> {
    store.dispatch(ProductsIntent::Reset);
    store.dispatch(ProductsIntent::SetRefreshing(true));
    fetch_products(api, store, notices).await
}

/// Fetch one product into the detail view.
///
/// # Errors
///
/// Returns the catalog error (`NotFound` for unknown ids) after recording it.
#[instrument(skip(api, store, notices), fields(product_id = %id))]
pub async fn fetch_product_detail<A: CatalogApi>(
    api: &A,
    store: &ProductStore,
    notices: &Notices,
    id: ProductId,
) -> Result<()> {
    let token = store.next_token();
    store.dispatch(ProductsIntent::DetailPending { token });

    match api.fetch_product(id).await {
        Ok(product) => {
            store.dispatch(ProductsIntent::DetailFulfilled {
                token,
                product: Box::new(product),
            });
            Ok(())
        }
        Err(err) => {
            let message = err.to_string();
            if store.dispatch(ProductsIntent::DetailRejected {
                token,
                message: message.clone(),
            }) {
                warn!(error = %message, "Failed to fetch product details");
                notices.error("Failed to fetch product details");
            }
            Err(err.into())
        }
    }
}

/// Dismiss the detail view. A detail fetch still in flight is discarded
/// when it lands.
pub fn clear_product_detail(store: &ProductStore) {
    store.dispatch(ProductsIntent::ClearDetail);
}

/// Scroll back to the first page of fetched products.
pub fn first_page_products(store: &ProductStore) -> bool {
    store.dispatch(ProductsIntent::FirstPage)
}

/// Reveal the next page. Returns `true` if anything was revealed or
/// `has_more` flipped.
pub fn load_more_products(store: &ProductStore) -> bool {
    store.dispatch(ProductsIntent::LoadMore)
}

/// Bookmark a product. Already bookmarked products are left alone.
pub fn add_favorite(store: &ProductStore, notices: &Notices, product: &Product) {
    if store.dispatch(ProductsIntent::AddFavorite(Box::new(product.clone()))) {
        notices.info("Added to favorite");
    }
}

/// Remove a bookmark. Unknown ids are ignored.
pub fn remove_favorite(store: &ProductStore, notices: &Notices, id: ProductId) {
    if store.dispatch(ProductsIntent::RemoveFavorite(id)) {
        notices.info("Removed from favorite");
    }
}

/// Flip a product's bookmark. Returns whether it is now a favorite.
pub fn toggle_favorite(store: &ProductStore, notices: &Notices, product: &Product) -> bool {
    if store.select(|s| s.is_favorite(product.id)) {
        remove_favorite(store, notices, product.id);
        false
    } else {
        add_favorite(store, notices, product);
        true
    }
}
