//! Product catalog slice: fetched list, client-side pagination, detail
//! view and favorites.

pub mod effects;
mod intent;
mod reducer;
pub mod selectors;
mod state;

pub use intent::ProductsIntent;
pub use reducer::ProductsReducer;
pub use state::{DEFAULT_PAGE_SIZE, ProductDetailState, ProductsState};

/// Store handle for the product slice.
pub type ProductStore = crate::store::Store<ProductsReducer>;
