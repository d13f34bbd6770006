use tracing::debug;

use super::intent::ProductsIntent;
use super::state::{ProductDetailState, ProductsState};
use crate::store::Reducer;

pub struct ProductsReducer;

impl ProductsReducer {
    /// Show the first page of the fetched catalog.
    fn reveal_first_page(state: &mut ProductsState) {
        state.skip = 0;
        state.has_more = state.products.len() > state.limit;
        state.displayed_products = state.products.iter().take(state.limit).cloned().collect();
    }
}

impl Reducer for ProductsReducer {
    type State = ProductsState;
    type Intent = ProductsIntent;

    fn reduce(state: &mut Self::State, intent: Self::Intent) -> bool {
        match intent {
            ProductsIntent::FetchPending { token } => {
                state.loading = true;
                state.error = None;
                state.in_flight = Some(token);
                true
            }
            ProductsIntent::FetchFulfilled { token, products } => {
                if state.in_flight != Some(token) {
                    debug!(%token, "Dropping stale product list response");
                    return false;
                }
                state.in_flight = None;
                state.loading = false;
                state.is_refreshing = false;
                state.products = products;
                Self::reveal_first_page(state);
                true
            }
            ProductsIntent::FetchRejected { token, message } => {
                if state.in_flight != Some(token) {
                    debug!(%token, "Dropping stale product list failure");
                    return false;
                }
                // Failure leaves the previously fetched catalog in place
                state.in_flight = None;
                state.loading = false;
                state.is_refreshing = false;
                state.error = Some(message);
                true
            }
            ProductsIntent::DetailPending { token } => {
                state.detail.loading = true;
                state.detail.error = None;
                state.detail.in_flight = Some(token);
                true
            }
            ProductsIntent::DetailFulfilled { token, product } => {
                if state.detail.in_flight != Some(token) {
                    debug!(%token, "Dropping stale product detail response");
                    return false;
                }
                state.detail.in_flight = None;
                state.detail.loading = false;
                state.detail.product = Some(*product);
                true
            }
            ProductsIntent::DetailRejected { token, message } => {
                if state.detail.in_flight != Some(token) {
                    debug!(%token, "Dropping stale product detail failure");
                    return false;
                }
                state.detail.in_flight = None;
                state.detail.loading = false;
                state.detail.error = Some(message);
                true
            }
            ProductsIntent::ClearDetail => {
                if state.detail == ProductDetailState::default() {
                    return false;
                }
                state.detail = ProductDetailState::default();
                true
            }
            ProductsIntent::SetRefreshing(refreshing) => {
                let changed = state.is_refreshing != refreshing;
                state.is_refreshing = refreshing;
                changed
            }
            ProductsIntent::Reset => {
                let changed = !state.products.is_empty()
                    || !state.displayed_products.is_empty()
                    || state.skip != 0
                    || !state.has_more
                    || state.loading
                    || state.in_flight.is_some();
                state.products.clear();
                state.displayed_products.clear();
                state.skip = 0;
                state.has_more = true;
                state.loading = false;
                state.in_flight = None;
                changed
            }
            ProductsIntent::FirstPage => {
                let first_page = state.products.len().min(state.limit);
                if state.skip == 0 && state.displayed_products.len() == first_page {
                    return false;
                }
                Self::reveal_first_page(state);
                true
            }
            ProductsIntent::LoadMore => {
                if !state.has_more || state.loading {
                    return false;
                }
                let next_skip = state.skip + state.limit;
                let page: Vec<_> = state
                    .products
                    .iter()
                    .skip(next_skip)
                    .take(state.limit)
                    .cloned()
                    .collect();
                if page.is_empty() {
                    state.has_more = false;
                } else {
                    // A short page means the catalog is exhausted
                    state.has_more = page.len() == state.limit;
                    state.skip = next_skip;
                    state.displayed_products.extend(page);
                }
                true
            }
            ProductsIntent::AddFavorite(product) => {
                if state.is_favorite(product.id) {
                    return false;
                }
                state.favorites.push(*product);
                true
            }
            ProductsIntent::RemoveFavorite(id) => {
                let before = state.favorites.len();
                state.favorites.retain(|p| p.id != id);
                state.favorites.len() != before
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use cartwheel_core::{Price, Product, ProductId};

    use super::*;
    use crate::store::TokenSource;

    fn product(id: i32) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            description: String::new(),
            price: Price::from_cents(100),
            thumbnail: String::new(),
            category: Some(if id % 2 == 0 { "laptops" } else { "smartphones" }.to_string()),
            stock: 3,
            rating: 4.0,
            discount_percentage: None,
        }
    }

    fn catalog(n: i32) -> Vec<Product> {
        (1..=n).map(product).collect()
    }

    fn fetched(n: i32, limit: usize) -> ProductsState {
        let tokens = TokenSource::new();
        let token = tokens.issue();
        let state = ProductsReducer::apply(
            ProductsState::with_limit(limit),
            ProductsIntent::FetchPending { token },
        );
        ProductsReducer::apply(
            state,
            ProductsIntent::FetchFulfilled {
                token,
                products: catalog(n),
            },
        )
    }

    #[test]
    fn test_fetch_reveals_first_page() {
        let state = fetched(25, 10);
        assert_eq!(state.products.len(), 25);
        assert_eq!(state.displayed_products.len(), 10);
        assert!(state.has_more);
        assert!(!state.loading);
        assert_eq!(state.displayed_products.first().map(|p| p.id), Some(ProductId::new(1)));
    }

    #[test]
    fn test_fetch_smaller_than_page() {
        for n in [0, 3, 10] {
            let state = fetched(n, 10);
            assert_eq!(state.displayed_products.len(), usize::try_from(n).unwrap_or(0));
            assert!(!state.has_more, "n = {n}");
        }
    }

    #[test]
    fn test_load_more_scenario() {
        let mut state = fetched(25, 10);

        state = ProductsReducer::apply(state, ProductsIntent::LoadMore);
        assert_eq!(state.displayed_products.len(), 20);
        assert!(state.has_more);

        state = ProductsReducer::apply(state, ProductsIntent::LoadMore);
        assert_eq!(state.displayed_products.len(), 25);

        state = ProductsReducer::apply(state, ProductsIntent::LoadMore);
        assert_eq!(state.displayed_products.len(), 25);
        assert!(!state.has_more);
    }

    #[test]
    fn test_load_more_past_exhaustion_is_stable() {
        let mut state = fetched(12, 10);
        for _ in 0..5 {
            state = ProductsReducer::apply(state, ProductsIntent::LoadMore);
        }
        let settled = state.clone();
        let state = ProductsReducer::apply(state, ProductsIntent::LoadMore);
        assert_eq!(state, settled);
        assert!(!state.has_more);
        assert_eq!(state.displayed_products.len(), 12);
    }

    #[test]
    fn test_exact_multiple_needs_empty_page_to_finish() {
        let mut state = fetched(20, 10);
        state = ProductsReducer::apply(state, ProductsIntent::LoadMore);
        assert_eq!(state.displayed_products.len(), 20);
        assert!(state.has_more);
        state = ProductsReducer::apply(state, ProductsIntent::LoadMore);
        assert_eq!(state.displayed_products.len(), 20);
        assert!(!state.has_more);
    }

    #[test]
    fn test_displayed_is_prefix_of_products() {
        let mut state = fetched(33, 7);
        for _ in 0..6 {
            state = ProductsReducer::apply(state, ProductsIntent::LoadMore);
            let bound = state.products.len().min(state.skip + state.limit);
            assert_eq!(
                state.products.get(..bound),
                Some(state.displayed_products.as_slice())
            );
        }
    }

    #[test]
    fn test_load_more_ignored_while_loading() {
        let state = fetched(25, 10);
        let token = TokenSource::new().issue();
        let loading = ProductsReducer::apply(state, ProductsIntent::FetchPending { token });
        let after = ProductsReducer::apply(loading.clone(), ProductsIntent::LoadMore);
        assert_eq!(after, loading);
    }

    #[test]
    fn test_rejection_keeps_catalog() {
        let state = fetched(5, 10);
        let token = TokenSource::new().issue();
        let state = ProductsReducer::apply(state, ProductsIntent::FetchPending { token });
        let state = ProductsReducer::apply(
            state,
            ProductsIntent::FetchRejected {
                token,
                message: "HTTP error: timed out".to_string(),
            },
        );
        assert_eq!(state.products.len(), 5);
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("HTTP error: timed out"));
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let tokens = TokenSource::new();
        let first = tokens.issue();
        let second = tokens.issue();

        let mut state = ProductsState::with_limit(10);
        state = ProductsReducer::apply(state, ProductsIntent::FetchPending { token: first });
        state = ProductsReducer::apply(state, ProductsIntent::FetchPending { token: second });
        state = ProductsReducer::apply(
            state,
            ProductsIntent::FetchFulfilled {
                token: second,
                products: catalog(3),
            },
        );
        let fresh = state.clone();
        state = ProductsReducer::apply(
            state,
            ProductsIntent::FetchFulfilled {
                token: first,
                products: catalog(30),
            },
        );
        assert_eq!(state, fresh);
        assert_eq!(state.products.len(), 3);
    }

    #[test]
    fn test_reset_discards_in_flight_fetch() {
        let token = TokenSource::new().issue();
        let mut state = fetched(25, 10);
        state = ProductsReducer::apply(state, ProductsIntent::FetchPending { token });
        state = ProductsReducer::apply(state, ProductsIntent::Reset);
        assert!(state.products.is_empty());
        assert!(state.has_more);
        assert_eq!(state.skip, 0);
        assert!(!state.loading);

        let state = ProductsReducer::apply(
            state,
            ProductsIntent::FetchFulfilled {
                token,
                products: catalog(4),
            },
        );
        assert!(state.products.is_empty());
    }

    #[test]
    fn test_refreshing_flag_cleared_by_fetch() {
        let token = TokenSource::new().issue();
        let mut state = ProductsReducer::apply(ProductsState::default(), ProductsIntent::Reset);
        state = ProductsReducer::apply(state, ProductsIntent::SetRefreshing(true));
        state = ProductsReducer::apply(state, ProductsIntent::FetchPending { token });
        assert!(state.is_refreshing);
        state = ProductsReducer::apply(
            state,
            ProductsIntent::FetchFulfilled {
                token,
                products: catalog(2),
            },
        );
        assert!(!state.is_refreshing);
    }

    #[test]
    fn test_favorites_are_idempotent() {
        let p = product(7);
        let mut state = ProductsState::default();
        state = ProductsReducer::apply(state, ProductsIntent::AddFavorite(Box::new(p.clone())));
        state = ProductsReducer::apply(state, ProductsIntent::AddFavorite(Box::new(p.clone())));
        assert_eq!(state.favorites, vec![p]);
        assert!(state.is_favorite(ProductId::new(7)));
    }

    #[test]
    fn test_remove_non_member_favorite_is_noop() {
        let mut state = ProductsState::default();
        state = ProductsReducer::apply(state, ProductsIntent::AddFavorite(Box::new(product(1))));
        let before = state.clone();
        let state = ProductsReducer::apply(state, ProductsIntent::RemoveFavorite(ProductId::new(99)));
        assert_eq!(state, before);
    }

    #[test]
    fn test_remove_favorite() {
        let mut state = ProductsState::default();
        state = ProductsReducer::apply(state, ProductsIntent::AddFavorite(Box::new(product(1))));
        state = ProductsReducer::apply(state, ProductsIntent::RemoveFavorite(ProductId::new(1)));
        assert!(state.favorites.is_empty());
    }

    #[test]
    fn test_detail_is_independent_of_list() {
        let tokens = TokenSource::new();
        let detail_token = tokens.issue();
        let list = fetched(5, 10);
        let mut state = ProductsReducer::apply(
            list.clone(),
            ProductsIntent::DetailPending {
                token: detail_token,
            },
        );
        assert!(state.detail.loading);
        assert!(!state.loading);

        state = ProductsReducer::apply(
            state,
            ProductsIntent::DetailRejected {
                token: detail_token,
                message: "Not found: product 99".to_string(),
            },
        );
        assert_eq!(state.detail.error.as_deref(), Some("Not found: product 99"));
        assert_eq!(state.products, list.products);
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_clear_detail_discards_pending_response() {
        let token = TokenSource::new().issue();
        let mut state = ProductsReducer::apply(
            ProductsState::default(),
            ProductsIntent::DetailPending { token },
        );
        state = ProductsReducer::apply(state, ProductsIntent::ClearDetail);
        state = ProductsReducer::apply(
            state,
            ProductsIntent::DetailFulfilled {
                token,
                product: Box::new(product(3)),
            },
        );
        assert_eq!(state.detail.product, None);
        assert!(!state.detail.loading);
    }

    #[test]
    fn test_first_page_rewinds_window() {
        let mut state = fetched(25, 10);
        state = ProductsReducer::apply(state, ProductsIntent::LoadMore);
        state = ProductsReducer::apply(state, ProductsIntent::LoadMore);
        assert_eq!(state.displayed_products.len(), 25);

        assert!(ProductsReducer::reduce(&mut state, ProductsIntent::FirstPage));
        assert_eq!(state.skip, 0);
        assert_eq!(state.displayed_products.len(), 10);
        assert!(state.has_more);
        assert_eq!(state.products.len(), 25);

        assert!(!ProductsReducer::reduce(&mut state, ProductsIntent::FirstPage));
    }

    #[test]
    fn test_reports_changes_only() {
        let mut state = fetched(12, 10);
        let favorite = product(2);

        assert!(ProductsReducer::reduce(
            &mut state,
            ProductsIntent::AddFavorite(Box::new(favorite.clone()))
        ));
        assert!(!ProductsReducer::reduce(
            &mut state,
            ProductsIntent::AddFavorite(Box::new(favorite))
        ));
        assert!(!ProductsReducer::reduce(
            &mut state,
            ProductsIntent::RemoveFavorite(ProductId::new(9))
        ));
        assert!(!ProductsReducer::reduce(&mut state, ProductsIntent::SetRefreshing(false)));
        assert!(!ProductsReducer::reduce(&mut state, ProductsIntent::ClearDetail));

        assert!(ProductsReducer::reduce(&mut state, ProductsIntent::LoadMore));
        let settled = state.clone();
        assert!(!ProductsReducer::reduce(&mut state, ProductsIntent::LoadMore));
        assert_eq!(state, settled);

        let stale = TokenSource::new().issue();
        assert!(!ProductsReducer::reduce(
            &mut state,
            ProductsIntent::FetchFulfilled {
                token: stale,
                products: catalog(1),
            }
        ));
    }
}
