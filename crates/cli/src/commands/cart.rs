use cartwheel_core::ProductId;
use cartwheel_storefront::AppState;
use cartwheel_storefront::error::Result;

use super::find_product;
use crate::render;

pub async fn show(app: &AppState) -> Result<()> {
    // A failed fetch still shows the persisted cart
    let result = app.load_cart().await;
    render::cart(&app.cart().snapshot());
    result
}

pub async fn add(app: &AppState, id: ProductId) -> Result<()> {
    let product = find_product(app, id).await?;
    app.add_to_cart(&product).await?;
    render::cart(&app.cart().snapshot());
    Ok(())
}

pub async fn set(app: &AppState, id: ProductId, quantity: u32) -> Result<()> {
    if app.cart().select(|s| s.cart.is_none()) {
        app.load_cart().await?;
    }
    app.update_quantity(id, quantity).await?;
    render::cart(&app.cart().snapshot());
    Ok(())
}

pub async fn checkout(app: &AppState, confirmed: bool) -> Result<()> {
    app.load_cart().await?;
    app.open_checkout();
    render::cart(&app.cart().snapshot());

    if !confirmed {
        render::line("Run again with --yes to check out");
        app.dismiss_checkout();
        return Ok(());
    }

    let result = app.confirm_checkout().await;
    render::checkout(&app.checkout().snapshot());
    app.dismiss_checkout();
    result.map(|_| ())
}
