use cartwheel_storefront::AppState;

use crate::render;

pub fn show(app: &AppState) {
    render::theme(&app.theme_state());
}

pub fn toggle(app: &AppState) {
    app.toggle_theme();
    render::theme(&app.theme_state());
}
