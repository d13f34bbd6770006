//! Derived views over [`ProductsState`].

use cartwheel_core::Product;

use super::ProductsState;

/// Key of the pseudo-category holding every product.
pub const ALL_CATEGORY: &str = "all";

/// A browsable category tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Category tag as sent by the catalog service.
    pub key: String,
    /// Tag with its first character upper-cased.
    pub title: String,
}

impl Category {
    fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            title: capitalize(key),
        }
    }
}

/// `all` followed by every distinct category of the fetched catalog, in
/// first-seen order. Products without a category only appear under `all`.
#[must_use]
pub fn categories(state: &ProductsState) -> Vec<Category> {
    let mut categories = vec![Category::new(ALL_CATEGORY)];
    for key in state.products.iter().filter_map(|p| p.category.as_deref()) {
        if !categories.iter().any(|c| c.key == key) {
            categories.push(Category::new(key));
        }
    }
    categories
}

/// Fetched products belonging to a category tab.
#[must_use]
pub fn products_in_category<'a>(state: &'a ProductsState, key: &str) -> Vec<&'a Product> {
    if key == ALL_CATEGORY {
        return state.products.iter().collect();
    }
    state
        .products
        .iter()
        .filter(|p| p.category.as_deref() == Some(key))
        .collect()
}

/// Fetched products whose title contains `query`, ignoring case.
///
/// An empty query matches nothing.
#[must_use]
pub fn filter_by_title<'a>(state: &'a ProductsState, query: &str) -> Vec<&'a Product> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    state
        .products
        .iter()
        .filter(|p| p.title.to_lowercase().contains(&needle))
        .collect()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use cartwheel_core::{Price, ProductId};

    use super::*;

    fn product(id: i32, title: &str, category: Option<&str>) -> Product {
        Product {
            id: ProductId::new(id),
            title: title.to_string(),
            description: String::new(),
            price: Price::from_cents(1000),
            thumbnail: String::new(),
            category: category.map(str::to_string),
            stock: 1,
            rating: 3.5,
            discount_percentage: None,
        }
    }

    fn state() -> ProductsState {
        ProductsState {
            products: vec![
                product(1, "iPhone 9", Some("smartphones")),
                product(2, "MacBook Pro", Some("laptops")),
                product(3, "Samsung Universe 9", Some("smartphones")),
                product(4, "Mystery Box", None),
            ],
            ..ProductsState::default()
        }
    }

    #[test]
    fn test_categories_first_seen_order() {
        let keys: Vec<_> = categories(&state()).into_iter().map(|c| c.key).collect();
        assert_eq!(keys, vec!["all", "smartphones", "laptops"]);
    }

    #[test]
    fn test_category_titles_are_capitalized() {
        let titles: Vec<_> = categories(&state()).into_iter().map(|c| c.title).collect();
        assert_eq!(titles, vec!["All", "Smartphones", "Laptops"]);
    }

    #[test]
    fn test_categories_of_empty_catalog() {
        assert_eq!(categories(&ProductsState::default()).len(), 1);
    }

    #[test]
    fn test_products_in_category() {
        let state = state();
        assert_eq!(products_in_category(&state, "all").len(), 4);
        let phones: Vec<_> = products_in_category(&state, "smartphones")
            .into_iter()
            .map(|p| p.id.as_i32())
            .collect();
        assert_eq!(phones, vec![1, 3]);
        assert!(products_in_category(&state, "fragrances").is_empty());
    }

    #[test]
    fn test_filter_by_title_ignores_case() {
        let state = state();
        let hits: Vec<_> = filter_by_title(&state, "MAC")
            .into_iter()
            .map(|p| p.id.as_i32())
            .collect();
        assert_eq!(hits, vec![2]);
        assert_eq!(filter_by_title(&state, "9").len(), 2);
    }

    #[test]
    fn test_filter_by_empty_title_matches_nothing() {
        assert!(filter_by_title(&state(), "  ").is_empty());
    }
}
