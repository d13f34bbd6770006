use cartwheel_core::{Product, ProductId};
use serde::{Deserialize, Serialize};

use crate::store::{RequestToken, SliceState};

/// Products revealed per page when not configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Product catalog state.
///
/// `displayed_products` is always `products[..min(len, skip + limit)]`.
/// Only the catalog, the pagination window and favorites are persisted;
/// loading flags, errors and the detail view rehydrate to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductsState {
    /// Everything returned by the last successful fetch.
    pub products: Vec<Product>,
    /// The revealed prefix of `products`.
    pub displayed_products: Vec<Product>,
    /// Offset of the last revealed page.
    pub skip: usize,
    /// Page size.
    pub limit: usize,
    /// Whether `load_more` can reveal anything.
    pub has_more: bool,
    /// Bookmarked products, unique by id.
    pub favorites: Vec<Product>,
    #[serde(skip)]
    pub loading: bool,
    #[serde(skip)]
    pub is_refreshing: bool,
    #[serde(skip)]
    pub error: Option<String>,
    #[serde(skip)]
    pub detail: ProductDetailState,
    #[serde(skip)]
    pub(crate) in_flight: Option<RequestToken>,
}

impl Default for ProductsState {
    fn default() -> Self {
        Self::with_limit(DEFAULT_PAGE_SIZE)
    }
}

impl SliceState for ProductsState {}

impl ProductsState {
    /// Empty state with the given page size (at least 1).
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            products: Vec::new(),
            displayed_products: Vec::new(),
            skip: 0,
            limit: limit.max(1),
            has_more: true,
            favorites: Vec::new(),
            loading: false,
            is_refreshing: false,
            error: None,
            detail: ProductDetailState::default(),
            in_flight: None,
        }
    }

    /// Adopt persisted data under the configured page size.
    ///
    /// If the page size changed since the state was written, the window
    /// restarts at the first page.
    #[must_use]
    pub fn rehydrated(self, limit: usize) -> Self {
        let limit = limit.max(1);
        let mut state = Self {
            products: self.products,
            favorites: self.favorites,
            ..Self::with_limit(limit)
        };
        if self.limit == limit
            && is_window_consistent(&state.products, &self.displayed_products, self.skip, limit)
        {
            state.displayed_products = self.displayed_products;
            state.skip = self.skip;
            state.has_more = self.has_more;
        } else {
            state.displayed_products = state.products.iter().take(limit).cloned().collect();
            state.has_more = state.products.len() > limit;
        }
        state
    }

    /// Whether a product is bookmarked.
    #[must_use]
    pub fn is_favorite(&self, id: ProductId) -> bool {
        self.favorites.iter().any(|p| p.id == id)
    }
}

fn is_window_consistent(
    products: &[Product],
    displayed: &[Product],
    skip: usize,
    limit: usize,
) -> bool {
    let expected = products.len().min(skip.saturating_add(limit));
    displayed.len() == expected && products.get(..expected) == Some(displayed)
}

/// Detail view of a single product, independent of the list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductDetailState {
    pub product: Option<Product>,
    pub loading: bool,
    pub error: Option<String>,
    pub(crate) in_flight: Option<RequestToken>,
}
