//! Application state shared by every view.

use std::sync::Arc;

use cartwheel_core::{Product, ProductId, ThemeMode};
use tracing::{debug, info};

use crate::catalog::{CatalogApi, CatalogClient};
use crate::config::StorefrontConfig;
use crate::error::Result;
use crate::notice::Notices;
use crate::persist::{FileStorage, PersistAdapter, PersistConfig, PersistedState};
use crate::slices::cart::{self, CartStore, CheckoutStore};
use crate::slices::products::{self, ProductStore, ProductsState};
use crate::slices::search::{self, SearchStore};
use crate::slices::theme::{ThemeIntent, ThemeState, ThemeStore};

/// Application state shared across all views.
///
/// This struct is cheaply cloneable via `Arc`. It owns the catalog client,
/// one store per slice, the notice channel and the persistence adapter,
/// and exposes the intents the views dispatch.
pub struct AppState<A = CatalogClient, P = FileStorage> {
    inner: Arc<AppStateInner<A, P>>,
}

impl<A, P> Clone for AppState<A, P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct AppStateInner<A, P> {
    api: A,
    storage: P,
    persist: PersistConfig,
    page_size: usize,
    products: ProductStore,
    cart: CartStore,
    checkout: CheckoutStore,
    search: SearchStore,
    theme: ThemeStore,
    notices: Notices,
}

impl AppState {
    /// Create application state talking to the configured catalog service
    /// and persisting under the configured state directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(config: &StorefrontConfig) -> Result<Self> {
        let api = CatalogClient::new(&config.catalog)?;
        let storage = FileStorage::new(&config.state_dir);
        Ok(Self::new(api, storage, config.persist.clone(), config.page_size))
    }
}

impl<A: CatalogApi, P: PersistAdapter> AppState<A, P> {
    /// Create application state with empty slices.
    #[must_use]
    pub fn new(api: A, storage: P, persist: PersistConfig, page_size: usize) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                api,
                storage,
                persist,
                page_size,
                products: ProductStore::new(ProductsState::with_limit(page_size)),
                cart: CartStore::default(),
                checkout: CheckoutStore::default(),
                search: SearchStore::default(),
                theme: ThemeStore::default(),
                notices: Notices::new(),
            }),
        }
    }

    #[must_use]
    pub fn api(&self) -> &A {
        &self.inner.api
    }

    #[must_use]
    pub fn products(&self) -> &ProductStore {
        &self.inner.products
    }

    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    #[must_use]
    pub fn checkout(&self) -> &CheckoutStore {
        &self.inner.checkout
    }

    #[must_use]
    pub fn search_store(&self) -> &SearchStore {
        &self.inner.search
    }

    #[must_use]
    pub fn theme(&self) -> &ThemeStore {
        &self.inner.theme
    }

    #[must_use]
    pub fn notices(&self) -> &Notices {
        &self.inner.notices
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Fetch the catalog.
    ///
    /// # Errors
    ///
    /// Returns the catalog error after recording it on the product slice.
    pub async fn load_products(&self) -> Result<()> {
        products::effects::fetch_products(self.api(), self.products(), self.notices()).await
    }

    /// Drop the catalog and fetch it again.
    ///
    /// # Errors
    ///
    /// Returns the catalog error after recording it on the product slice.
    pub async fn refresh_products(&self) -> Result<()> {
        products::effects::refresh_products(self.api(), self.products(), self.notices()).await
    }

    /// Show only the first page of fetched products again.
    pub fn first_page(&self) -> bool {
        products::effects::first_page_products(self.products())
    }

    /// Reveal the next page of fetched products.
    pub fn load_more(&self) -> bool {
        products::effects::load_more_products(self.products())
    }

    /// Open the detail view of a product.
    ///
    /// # Errors
    ///
    /// Returns the catalog error after recording it on the detail view.
    pub async fn open_product(&self, id: ProductId) -> Result<()> {
        products::effects::fetch_product_detail(self.api(), self.products(), self.notices(), id)
            .await
    }

    /// Dismiss the detail view.
    pub fn close_product(&self) {
        products::effects::clear_product_detail(self.products());
    }

    /// Flip a product's bookmark. Returns whether it is now a favorite.
    pub fn toggle_favorite(&self, product: &Product) -> bool {
        products::effects::toggle_favorite(self.products(), self.notices(), product)
    }

    /// Remove a bookmark by id.
    pub fn remove_favorite(&self, id: ProductId) {
        products::effects::remove_favorite(self.products(), self.notices(), id);
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add one unit of a product to the cart.
    ///
    /// # Errors
    ///
    /// Returns a guard violation for out-of-stock products, or the catalog
    /// error after recording it on the cart slice.
    pub async fn add_to_cart(&self, product: &Product) -> Result<()> {
        cart::effects::add_product(self.api(), self.cart(), self.notices(), product).await
    }

    /// Load the active cart.
    ///
    /// # Errors
    ///
    /// Returns the catalog error after recording it on the cart slice.
    pub async fn load_cart(&self) -> Result<()> {
        cart::effects::fetch_cart(self.api(), self.cart(), self.notices()).await
    }

    /// Set the quantity of a cart line.
    ///
    /// # Errors
    ///
    /// Returns a guard violation without a request for invalid edits, or
    /// the catalog error after recording it on the cart slice.
    pub async fn update_quantity(&self, id: ProductId, quantity: u32) -> Result<()> {
        cart::effects::update_quantity(self.api(), self.cart(), self.notices(), id, quantity).await
    }

    pub fn open_checkout(&self) {
        cart::effects::open_checkout(self.checkout());
    }

    pub fn dismiss_checkout(&self) {
        cart::effects::dismiss_checkout(self.checkout());
    }

    /// Confirm checkout, deleting the active cart.
    ///
    /// Returns `false` if the checkout sheet was not open.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveCart` without a request when there is no cart, or
    /// the catalog error after recording it.
    pub async fn confirm_checkout(&self) -> Result<bool> {
        cart::effects::confirm_checkout(self.api(), self.cart(), self.checkout(), self.notices())
            .await
    }

    // =========================================================================
    // Search and theme
    // =========================================================================

    /// Search the catalog. A blank query clears the results instead.
    ///
    /// # Errors
    ///
    /// Returns the catalog error after recording it on the search slice.
    pub async fn search(&self, query: &str) -> Result<()> {
        if query.trim().is_empty() {
            search::effects::clear_search_results(self.search_store());
            return Ok(());
        }
        search::effects::fetch_search_results(self.api(), self.search_store(), self.notices(), query)
            .await
    }

    /// Flip between light and dark. Returns the new mode.
    pub fn toggle_theme(&self) -> ThemeMode {
        self.theme().dispatch(ThemeIntent::Toggle);
        self.theme().select(|s| s.mode)
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Load persisted slices into the stores.
    ///
    /// Returns `true` if a usable blob was found. Unreadable or
    /// foreign-version blobs are ignored and the slices stay fresh.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage adapter fails.
    pub async fn restore(&self) -> Result<bool> {
        let key = self.inner.persist.key();
        let Some(blob) = self.inner.storage.load(&key).await? else {
            debug!(%key, "No persisted state");
            return Ok(false);
        };
        let Some(persisted) = PersistedState::decode(&blob) else {
            // Drop the unreadable blob
            self.inner.storage.remove(&key).await?;
            return Ok(false);
        };
        let persisted = persisted.restricted(&self.inner.persist);

        if let Some(products) = persisted.products {
            self.products()
                .replace(products.rehydrated(self.inner.page_size));
        }
        if let Some(cart) = persisted.cart {
            self.cart().replace(cart.rehydrated());
        }
        if let Some(theme) = persisted.theme {
            self.theme().replace(theme);
        }
        info!(%key, "Restored persisted state");
        Ok(true)
    }

    /// Write the whitelisted slices to storage.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the storage adapter fails.
    pub async fn persist(&self) -> Result<()> {
        let key = self.inner.persist.key();
        let blob = PersistedState::capture(
            &self.inner.persist,
            &self.products().snapshot(),
            &self.cart().snapshot(),
            &self.theme().snapshot(),
        )
        .encode()?;
        self.inner.storage.save(&key, &blob).await?;
        info!(%key, bytes = blob.len(), "Persisted state");
        Ok(())
    }

    /// Snapshot of the theme slice.
    #[must_use]
    pub fn theme_state(&self) -> ThemeState {
        self.theme().snapshot()
    }
}
