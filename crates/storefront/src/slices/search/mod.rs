//! Search slice. Never persisted.
//!
//! Searching and clearing are distinct intents: an empty query clears the
//! results instead of asking the catalog for nothing, and clearing drops
//! any search still in flight.

pub mod effects;

use cartwheel_core::Product;
use tracing::debug;

use crate::store::{Intent, Reducer, RequestToken, SliceState, Store};

/// Store handle for the search slice.
pub type SearchStore = Store<SearchReducer>;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchState {
    /// Query of the latest search, trimmed.
    pub query: String,
    pub results: Vec<Product>,
    pub loading: bool,
    pub error: Option<String>,
    pub(crate) in_flight: Option<RequestToken>,
}

impl SliceState for SearchState {}

#[derive(Debug, Clone)]
pub enum SearchIntent {
    Pending { token: RequestToken, query: String },
    Fulfilled { token: RequestToken, results: Vec<Product> },
    Rejected { token: RequestToken, message: String },
    /// Empty the results and forget any outstanding search.
    Clear,
}

impl Intent for SearchIntent {}

pub struct SearchReducer;

impl Reducer for SearchReducer {
    type State = SearchState;
    type Intent = SearchIntent;

    fn reduce(state: &mut Self::State, intent: Self::Intent) -> bool {
        match intent {
            SearchIntent::Pending { token, query } => {
                state.query = query;
                state.loading = true;
                state.error = None;
                state.in_flight = Some(token);
            }
            SearchIntent::Fulfilled { token, results } => {
                if state.in_flight != Some(token) {
                    debug!(%token, "Dropping stale search results");
                    return false;
                }
                state.in_flight = None;
                state.loading = false;
                state.results = results;
            }
            SearchIntent::Rejected { token, message } => {
                if state.in_flight != Some(token) {
                    debug!(%token, "Dropping stale search failure");
                    return false;
                }
                state.in_flight = None;
                state.loading = false;
                state.error = Some(message);
            }
            SearchIntent::Clear => {
                if *state == SearchState::default() {
                    return false;
                }
                *state = SearchState::default();
            }
        }
        true
    }
}
