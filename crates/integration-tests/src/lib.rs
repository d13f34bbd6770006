//! Integration test support for Cartwheel.
//!
//! [`MockCatalog`] is an in-process catalog service speaking the same JSON
//! as the real one. It binds `127.0.0.1:0`, records every request it
//! receives and can be told to fail, return garbage or stall searches.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p cartwheel-integration-tests
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! let mock = MockCatalog::start(fixtures::catalog(25)).await;
//! let client = mock.client();
//! let products = client.fetch_products().await?;
//! assert_eq!(mock.requests().await[0].path, "/products");
//! ```

#![allow(clippy::expect_used, clippy::missing_panics_doc)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::extract::{Path, Query, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::Json;
use cartwheel_core::UserId;
use cartwheel_storefront::catalog::CatalogClient;
use cartwheel_storefront::config::CatalogConfig;
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use url::Url;

/// A request as the mock service saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub body: Option<Value>,
}

/// How the mock answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    Fail(StatusCode),
    Garbage,
}

struct Shared {
    products: Vec<Value>,
    carts: Mutex<Vec<Value>>,
    next_cart_id: Mutex<i64>,
    requests: Mutex<Vec<RecordedRequest>>,
    mode: Mutex<Mode>,
    search_delay: Mutex<Option<Duration>>,
}

/// Mock catalog service running on a background task.
pub struct MockCatalog {
    addr: SocketAddr,
    shared: Arc<Shared>,
    server: JoinHandle<()>,
}

impl Drop for MockCatalog {
    fn drop(&mut self) {
        self.server.abort();
    }
}

impl MockCatalog {
    /// Serve `products` with no carts.
    pub async fn start(products: Vec<Value>) -> Self {
        let shared = Arc::new(Shared {
            products,
            carts: Mutex::new(Vec::new()),
            next_cart_id: Mutex::new(50),
            requests: Mutex::new(Vec::new()),
            mode: Mutex::new(Mode::Normal),
            search_delay: Mutex::new(None),
        });

        let app = Router::new()
            .route("/products", get(list_products))
            .route("/products/search", get(search_products))
            .route("/products/{id}", get(product))
            .route("/carts", get(list_carts))
            .route("/carts/add", post(add_cart))
            .route("/carts/{id}", put(update_cart).delete(delete_cart))
            .layer(middleware::from_fn_with_state(Arc::clone(&shared), record))
            .with_state(Arc::clone(&shared));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock catalog");
        let addr = listener.local_addr().expect("Mock catalog has no address");
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock catalog crashed");
        });

        Self {
            addr,
            shared,
            server,
        }
    }

    /// Seed the carts collection.
    pub async fn with_carts(self, carts: Vec<Value>) -> Self {
        *self.shared.carts.lock().await = carts;
        self
    }

    #[must_use]
    pub fn url(&self) -> Url {
        Url::parse(&format!("http://{}", self.addr)).expect("Invalid mock URL")
    }

    #[must_use]
    pub fn config(&self) -> CatalogConfig {
        CatalogConfig {
            base_url: self.url(),
            user_id: UserId::new(5),
            timeout: Duration::from_secs(5),
        }
    }

    #[must_use]
    pub fn client(&self) -> CatalogClient {
        CatalogClient::new(&self.config()).expect("Failed to build catalog client")
    }

    /// Every request received so far.
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.shared.requests.lock().await.clone()
    }

    /// Requests received for one method and path.
    pub async fn requests_to(&self, method: &str, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .await
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    /// Answer every request with `status`.
    pub async fn fail_with(&self, status: u16) {
        let status = StatusCode::from_u16(status).expect("Invalid status code");
        *self.shared.mode.lock().await = Mode::Fail(status);
    }

    /// Answer every request with 200 and a body that is not JSON.
    pub async fn serve_garbage(&self) {
        *self.shared.mode.lock().await = Mode::Garbage;
    }

    /// Answer normally again.
    pub async fn recover(&self) {
        *self.shared.mode.lock().await = Mode::Normal;
    }

    /// Hold search responses for `delay`.
    pub async fn delay_search(&self, delay: Duration) {
        *self.shared.search_delay.lock().await = Some(delay);
    }
}

/// Record the request, then apply the failure mode.
async fn record(State(shared): State<Arc<Shared>>, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();

    shared.requests.lock().await.push(RecordedRequest {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        query: parts.uri.query().map(str::to_string),
        body: serde_json::from_slice(&bytes).ok(),
    });

    let mode = *shared.mode.lock().await;
    match mode {
        Mode::Normal => next.run(Request::from_parts(parts, Body::from(bytes))).await,
        Mode::Fail(status) => (status, "mock failure").into_response(),
        Mode::Garbage => (StatusCode::OK, "<html>not json</html>").into_response(),
    }
}

#[derive(Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartBody {
    #[serde(default)]
    user_id: Option<i64>,
    products: Vec<LineBody>,
}

#[derive(Deserialize)]
struct LineBody {
    id: i64,
    quantity: u32,
}

fn products_page(products: Vec<Value>) -> Json<Value> {
    Json(json!({
        "total": products.len(),
        "skip": 0,
        "limit": products.len(),
        "products": products,
    }))
}

async fn list_products(State(shared): State<Arc<Shared>>) -> Json<Value> {
    products_page(shared.products.clone())
}

async fn search_products(
    State(shared): State<Arc<Shared>>,
    Query(params): Query<SearchParams>,
) -> Json<Value> {
    let delay = *shared.search_delay.lock().await;
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    let needle = params.q.to_lowercase();
    let hits = shared
        .products
        .iter()
        .filter(|p| {
            p["title"]
                .as_str()
                .is_some_and(|t| t.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect();
    products_page(hits)
}

async fn product(State(shared): State<Arc<Shared>>, Path(id): Path<i64>) -> Response {
    shared
        .products
        .iter()
        .find(|p| p["id"].as_i64() == Some(id))
        .map_or_else(
            || {
                (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "message": format!("Product with id '{id}' not found") })),
                )
                    .into_response()
            },
            |p| Json(p.clone()).into_response(),
        )
}

async fn list_carts(State(shared): State<Arc<Shared>>) -> Json<Value> {
    let carts = shared.carts.lock().await.clone();
    Json(json!({
        "total": carts.len(),
        "skip": 0,
        "limit": carts.len(),
        "carts": carts,
    }))
}

async fn add_cart(State(shared): State<Arc<Shared>>, Json(body): Json<CartBody>) -> Response {
    let id = {
        let mut next = shared.next_cart_id.lock().await;
        *next += 1;
        *next
    };
    let lines: Vec<_> = body.products.iter().map(|l| (l.id, l.quantity)).collect();
    let cart = fixtures::cart_from(&shared.products, id, body.user_id.unwrap_or(1), &lines);
    (StatusCode::CREATED, Json(cart)).into_response()
}

async fn update_cart(
    State(shared): State<Arc<Shared>>,
    Path(id): Path<i64>,
    Json(body): Json<CartBody>,
) -> Json<Value> {
    let lines: Vec<_> = body.products.iter().map(|l| (l.id, l.quantity)).collect();
    Json(fixtures::cart_from(&shared.products, id, 1, &lines))
}

async fn delete_cart(State(shared): State<Arc<Shared>>, Path(id): Path<i64>) -> Json<Value> {
    shared
        .carts
        .lock()
        .await
        .retain(|c| c["id"].as_i64() != Some(id));
    Json(json!({
        "id": id,
        "products": [],
        "isDeleted": true,
        "deletedOn": "2026-10-19T09:30:00.000Z",
    }))
}

/// Catalog-service-shaped JSON documents.
pub mod fixtures {
    use serde_json::{Value, json};

    /// A product as the catalog service returns it, extra fields included.
    #[must_use]
    pub fn product(id: i64, title: &str, category: &str, price: f64, stock: u32) -> Value {
        json!({
            "id": id,
            "title": title,
            "description": format!("{title} description"),
            "category": category,
            "price": price,
            "discountPercentage": 12.96,
            "rating": 4.69,
            "stock": stock,
            "tags": [category],
            "brand": "Mock Brand",
            "thumbnail": format!("https://cdn.example.com/products/{id}/thumbnail.png"),
            "images": [],
        })
    }

    /// `n` products alternating between smartphones and laptops.
    #[must_use]
    pub fn catalog(n: i64) -> Vec<Value> {
        (1..=n)
            .map(|id| {
                let category = if id % 2 == 0 { "laptops" } else { "smartphones" };
                #[allow(clippy::cast_precision_loss)]
                let price = (999 + id * 100) as f64 / 100.0;
                product(id, &format!("Item {id}"), category, price, 10)
            })
            .collect()
    }

    /// A cart built from `(product id, quantity)` lines over `products`.
    #[must_use]
    pub fn cart_from(products: &[Value], id: i64, user_id: i64, lines: &[(i64, u32)]) -> Value {
        let lines: Vec<Value> = lines
            .iter()
            .filter_map(|&(pid, quantity)| {
                let p = products.iter().find(|p| p["id"].as_i64() == Some(pid))?;
                let price = p["price"].as_f64().unwrap_or_default();
                Some(json!({
                    "id": pid,
                    "title": p["title"],
                    "price": price,
                    "quantity": quantity,
                    "total": price * f64::from(quantity),
                    "discountPercentage": p["discountPercentage"],
                    "thumbnail": p["thumbnail"],
                }))
            })
            .collect();
        let total_quantity: u64 = lines
            .iter()
            .filter_map(|l| l["quantity"].as_u64())
            .sum();
        json!({
            "id": id,
            "products": lines,
            "userId": user_id,
            "totalProducts": lines.len(),
            "totalQuantity": total_quantity,
        })
    }
}
