use tracing::{instrument, warn};

use super::{SearchIntent, SearchStore};
use crate::catalog::CatalogApi;
use crate::error::{GuardViolation, Result};
use crate::notice::Notices;

/// Search the catalog by text.
///
/// # Errors
///
/// Returns [`GuardViolation::EmptyQuery`] without a request for a blank
/// query, otherwise the catalog error after recording it.
#[instrument(skip(api, store, notices))]
pub async fn fetch_search_results<A: CatalogApi>(
    api: &A,
    store: &SearchStore,
    notices: &Notices,
    query: &str,
) -> Result<()> {
    let query = query.trim();
    if query.is_empty() {
        return Err(GuardViolation::EmptyQuery.into());
    }

    let token = store.next_token();
    store.dispatch(SearchIntent::Pending {
        token,
        query: query.to_string(),
    });

    match api.search_products(query).await {
        Ok(results) => {
            store.dispatch(SearchIntent::Fulfilled { token, results });
            Ok(())
        }
        Err(err) => {
            let message = err.to_string();
            if store.dispatch(SearchIntent::Rejected {
                token,
                message: message.clone(),
            }) {
                warn!(error = %message, "Search failed");
                notices.error("Search failed");
            }
            Err(err.into())
        }
    }
}

/// Empty the results. A search still in flight is discarded when it lands.
pub fn clear_search_results(store: &SearchStore) {
    store.dispatch(SearchIntent::Clear);
}
