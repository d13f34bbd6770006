//! In-memory catalog service for effect tests.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::collections::{HashMap, HashSet};

use cartwheel_core::{Cart, CartId, CartLine, CartLineInput, Price, Product, ProductId, UserId};
use tokio::sync::{Mutex, oneshot};

use crate::catalog::{CatalogApi, CatalogError, DeletedCart};

pub const FETCH_PRODUCTS: &str = "fetch_products";
pub const FETCH_PRODUCT: &str = "fetch_product";
pub const SEARCH: &str = "search_products";
pub const FETCH_CART: &str = "fetch_active_cart";
pub const ADD_CART: &str = "add_cart";
pub const UPDATE_CART: &str = "update_cart";
pub const DELETE_CART: &str = "delete_cart";

/// Build a catalog product.
pub fn product(id: i32, title: &str, category: &str, stock: u32) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_string(),
        description: format!("{title} description"),
        price: Price::from_cents(u32::try_from(id).unwrap() * 100 + 99),
        thumbnail: format!("https://cdn.example.com/{id}.png"),
        category: Some(category.to_string()),
        stock,
        rating: 4.5,
        discount_percentage: None,
    }
}

/// `n` products alternating between two categories.
pub fn catalog(n: i32) -> Vec<Product> {
    (1..=n)
        .map(|id| {
            let category = if id % 2 == 0 { "laptops" } else { "smartphones" };
            product(id, &format!("Item {id}"), category, 5)
        })
        .collect()
}

/// Fake catalog service with a mutable cart, injectable failures and
/// gates that hold a call until released.
pub struct FakeCatalog {
    products: Vec<Product>,
    cart: Mutex<Option<Cart>>,
    failing: Mutex<HashSet<&'static str>>,
    gates: Mutex<HashMap<&'static str, oneshot::Receiver<()>>>,
    calls: Mutex<Vec<&'static str>>,
    next_cart_id: Mutex<i32>,
}

impl FakeCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            cart: Mutex::new(None),
            failing: Mutex::new(HashSet::new()),
            gates: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            next_cart_id: Mutex::new(50),
        }
    }

    /// Seed the server-side cart from `(product id, quantity)` pairs.
    pub async fn with_cart(self, id: i32, lines: &[(i32, u32)]) -> Self {
        let inputs: Vec<_> = lines
            .iter()
            .map(|&(pid, qty)| CartLineInput::new(ProductId::new(pid), qty))
            .collect();
        let cart = self.build_cart(CartId::new(id), &inputs);
        *self.cart.lock().await = Some(cart);
        self
    }

    /// Make every call to `op` fail with a 503.
    pub async fn fail(&self, op: &'static str) {
        self.failing.lock().await.insert(op);
    }

    /// Hold the next call to `op` until the returned sender fires.
    pub async fn gate(&self, op: &'static str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().await.insert(op, rx);
        tx
    }

    /// Number of calls made to `op`.
    pub async fn call_count(&self, op: &'static str) -> usize {
        self.calls.lock().await.iter().filter(|c| **c == op).count()
    }

    /// The cart as the service currently holds it.
    pub async fn server_cart(&self) -> Option<Cart> {
        self.cart.lock().await.clone()
    }

    /// Total number of calls made.
    pub async fn total_calls(&self) -> usize {
        self.calls.lock().await.len()
    }

    async fn enter(&self, op: &'static str) -> Result<(), CatalogError> {
        self.calls.lock().await.push(op);
        let gate = self.gates.lock().await.remove(op);
        if let Some(rx) = gate {
            let _ = rx.await;
        }
        if self.failing.lock().await.contains(op) {
            return Err(CatalogError::Status {
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        Ok(())
    }

    fn build_cart(&self, id: CartId, inputs: &[CartLineInput]) -> Cart {
        Cart {
            id,
            lines: inputs
                .iter()
                .filter_map(|input| {
                    self.products.iter().find(|p| p.id == input.id).map(|p| CartLine {
                        id: p.id,
                        title: p.title.clone(),
                        price: p.price,
                        quantity: input.quantity,
                        thumbnail: p.thumbnail.clone(),
                    })
                })
                .collect(),
            user_id: Some(UserId::new(1)),
        }
    }
}

impl CatalogApi for FakeCatalog {
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        self.enter(FETCH_PRODUCTS).await?;
        Ok(self.products.clone())
    }

    async fn fetch_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.enter(FETCH_PRODUCT).await?;
        self.products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(format!("product {id}")))
    }

    async fn search_products(&self, query: &str) -> Result<Vec<Product>, CatalogError> {
        self.enter(SEARCH).await?;
        let needle = query.to_lowercase();
        Ok(self
            .products
            .iter()
            .filter(|p| p.title.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn fetch_active_cart(&self) -> Result<Option<Cart>, CatalogError> {
        self.enter(FETCH_CART).await?;
        Ok(self.cart.lock().await.clone())
    }

    async fn add_cart(&self, lines: &[CartLineInput]) -> Result<Cart, CatalogError> {
        self.enter(ADD_CART).await?;
        let id = {
            let mut next = self.next_cart_id.lock().await;
            *next += 1;
            *next
        };
        let cart = self.build_cart(CartId::new(id), lines);
        *self.cart.lock().await = Some(cart.clone());
        Ok(cart)
    }

    async fn update_cart(&self, id: CartId, lines: &[CartLineInput]) -> Result<Cart, CatalogError> {
        self.enter(UPDATE_CART).await?;
        let cart = self.build_cart(id, lines);
        *self.cart.lock().await = Some(cart.clone());
        Ok(cart)
    }

    async fn delete_cart(&self, id: CartId) -> Result<DeletedCart, CatalogError> {
        self.enter(DELETE_CART).await?;
        *self.cart.lock().await = None;
        Ok(DeletedCart {
            id,
            is_deleted: true,
            deleted_on: None,
        })
    }
}
