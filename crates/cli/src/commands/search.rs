use cartwheel_storefront::AppState;
use cartwheel_storefront::error::Result;

use crate::render;

pub async fn run(app: &AppState, query: &str) -> Result<()> {
    app.search(query).await?;
    let state = app.search_store().snapshot();
    if state.query.is_empty() {
        render::line("Search cleared");
    } else {
        render::products(&state.results.iter().collect::<Vec<_>>());
    }
    Ok(())
}
