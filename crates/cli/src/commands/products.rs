use cartwheel_core::ProductId;
use cartwheel_storefront::AppState;
use cartwheel_storefront::error::Result;
use cartwheel_storefront::slices::products::selectors;

use super::{ensure_products, find_product};
use crate::render;

pub async fn list(app: &AppState, category: Option<&str>, pages: usize, refresh: bool) -> Result<()> {
    if refresh {
        app.refresh_products().await?;
    } else {
        ensure_products(app).await?;
        // The restored window may show pages from an earlier run
        app.first_page();
    }

    let state = app.products().snapshot();
    if let Some(key) = category {
        render::products(&selectors::products_in_category(&state, key));
        return Ok(());
    }

    for _ in 1..pages {
        if !app.load_more() {
            break;
        }
    }
    let state = app.products().snapshot();
    render::products(&state.displayed_products.iter().collect::<Vec<_>>());
    render::page_footer(&state);
    Ok(())
}

pub async fn categories(app: &AppState) -> Result<()> {
    ensure_products(app).await?;
    render::categories(&selectors::categories(&app.products().snapshot()));
    Ok(())
}

pub async fn show(app: &AppState, id: ProductId) -> Result<()> {
    let result = app.open_product(id).await;
    let state = app.products().snapshot();
    app.close_product();
    result?;
    if let Some(product) = &state.detail.product {
        render::product_detail(product, state.is_favorite(product.id));
    }
    Ok(())
}

pub async fn favorite(app: &AppState, id: ProductId) -> Result<()> {
    let product = find_product(app, id).await?;
    if !app.products().select(|s| s.is_favorite(id)) {
        app.toggle_favorite(&product);
    }
    Ok(())
}

pub fn unfavorite(app: &AppState, id: ProductId) {
    app.remove_favorite(id);
}

pub fn favorites(app: &AppState) {
    let state = app.products().snapshot();
    render::products(&state.favorites.iter().collect::<Vec<_>>());
}
