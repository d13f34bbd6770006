use cartwheel_core::{Product, ProductId};

use crate::store::{Intent, RequestToken};

/// Intents handled by the product slice.
#[derive(Debug, Clone)]
pub enum ProductsIntent {
    /// A list fetch was issued.
    FetchPending { token: RequestToken },
    /// A list fetch succeeded.
    FetchFulfilled {
        token: RequestToken,
        products: Vec<Product>,
    },
    /// A list fetch failed.
    FetchRejected { token: RequestToken, message: String },
    /// A detail fetch was issued.
    DetailPending { token: RequestToken },
    /// A detail fetch succeeded.
    DetailFulfilled {
        token: RequestToken,
        product: Box<Product>,
    },
    /// A detail fetch failed.
    DetailRejected { token: RequestToken, message: String },
    /// The detail view was dismissed; late detail responses are dropped.
    ClearDetail,
    SetRefreshing(bool),
    /// Drop the catalog before a refresh; late list responses are dropped.
    Reset,
    /// Show only the first page of already fetched products again.
    FirstPage,
    /// Reveal the next page of already fetched products.
    LoadMore,
    AddFavorite(Box<Product>),
    RemoveFavorite(ProductId),
}

impl Intent for ProductsIntent {}
