//! Plain-text rendering of slice snapshots.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use cartwheel_core::Product;
use cartwheel_storefront::notice::{Notice, NoticeLevel};
use cartwheel_storefront::slices::cart::{CartState, CheckoutState};
use cartwheel_storefront::slices::products::ProductsState;
use cartwheel_storefront::slices::products::selectors::Category;
use cartwheel_storefront::slices::theme::ThemeState;

pub fn line(message: &str) {
    println!("{message}");
}

pub fn fatal(err: &dyn std::error::Error) {
    eprintln!("error: {err}");
}

pub fn notice(notice: &Notice) {
    let tag = match notice.level {
        NoticeLevel::Info => "info",
        NoticeLevel::Success => "ok",
        NoticeLevel::Error => "error",
    };
    eprintln!("[{tag}] {}", notice.message);
}

pub fn products(products: &[&Product]) {
    if products.is_empty() {
        println!("No products");
        return;
    }
    for product in products {
        let stock = if product.in_stock() {
            format!("{} in stock", product.stock)
        } else {
            "out of stock".to_string()
        };
        println!(
            "{:>5}  {:<40} {:>10}  {}",
            product.id, product.title, product.price, stock
        );
    }
}

pub fn page_footer(state: &ProductsState) {
    let more = if state.has_more { ", more available" } else { "" };
    println!(
        "-- showing {} of {}{more}",
        state.displayed_products.len(),
        state.products.len()
    );
}

pub fn categories(categories: &[Category]) {
    for category in categories {
        println!("{:<20} {}", category.key, category.title);
    }
}

pub fn product_detail(product: &Product, favorite: bool) {
    println!("{} (#{})", product.title, product.id);
    if let Some(category) = &product.category {
        println!("Category: {category}");
    }
    match product.discounted_price() {
        Some(discounted) => println!("Price:    {} (was {})", discounted, product.price),
        None => println!("Price:    {}", product.price),
    }
    println!("Rating:   {:.1} / 5", product.rating());
    println!("Stock:    {}", product.stock);
    if favorite {
        println!("Favorite: yes");
    }
    if !product.description.is_empty() {
        println!();
        println!("{}", product.description);
    }
}

pub fn cart(state: &CartState) {
    let Some(cart) = &state.cart else {
        println!("Cart is empty");
        return;
    };
    println!("Cart #{}", cart.id);
    for line in &cart.lines {
        println!(
            "{:>5}  {:<40} {:>3} x {:>10} = {:>10}",
            line.id,
            line.title,
            line.quantity,
            line.price,
            line.line_total()
        );
    }
    println!(
        "Total: {} ({} items)",
        state.total_price(),
        state.total_quantity()
    );
    if let Some(error) = &state.error {
        println!("Last error: {error}");
    }
}

pub fn checkout(state: &CheckoutState) {
    match state {
        CheckoutState::CartDeleted { cart_id } => {
            println!("Checked out, cart #{cart_id} deleted");
        }
        CheckoutState::SheetOpen { error: Some(error) } => {
            println!("Checkout failed: {error}");
        }
        _ => {}
    }
}

pub fn theme(state: &ThemeState) {
    let palette = state.palette();
    println!("Theme: {}", state.mode);
    for (name, color) in [
        ("primary", palette.primary),
        ("background", palette.background),
        ("surface", palette.surface),
        ("textPrimary", palette.text_primary),
        ("textSecondary", palette.text_secondary),
        ("accent", palette.accent),
        ("error", palette.error),
        ("success", palette.success),
        ("tabBarBackground", palette.tab_bar_background),
        ("tabBarLabel", palette.tab_bar_label),
    ] {
        println!("  {name:<18} {color}");
    }
}
