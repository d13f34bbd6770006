//! Subcommand handlers. Each one dispatches intents, then renders.

pub mod cart;
pub mod products;
pub mod search;
pub mod theme;

use cartwheel_core::{Product, ProductId};
use cartwheel_storefront::AppState;
use cartwheel_storefront::catalog::CatalogError;
use cartwheel_storefront::error::Result;

/// Look a product up in the fetched catalog, falling back to the detail
/// endpoint.
async fn find_product(app: &AppState, id: ProductId) -> Result<Product> {
    let known = app
        .products()
        .select(|s| s.products.iter().find(|p| p.id == id).cloned());
    if let Some(product) = known {
        return Ok(product);
    }

    app.open_product(id).await?;
    let product = app.products().select(|s| s.detail.product.clone());
    app.close_product();
    product.ok_or_else(|| CatalogError::NotFound(format!("product {id}")).into())
}

/// Fetch the catalog unless a restored one is resident.
async fn ensure_products(app: &AppState) -> Result<()> {
    if app.products().select(|s| s.products.is_empty()) {
        app.load_products().await?;
    }
    Ok(())
}
