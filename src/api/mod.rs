//! HTTP/JSON API.
//!
//! Handlers only translate requests into data-access calls and results into
//! responses. Error kinds are mapped to status codes by [`ApiError`].

mod error;
pub mod orders;
pub mod products;

use axum::routing::get;
use axum::Router;

pub use error::ApiError;

use crate::clients::{OrderClient, ProductClient};

/// Shared state for the HTTP server.
#[derive(Clone, Debug)]
pub struct AppState {
    pub orders: OrderClient,
    pub products: ProductClient,
}

impl AppState {
    pub fn new(orders: OrderClient, products: ProductClient) -> Self {
        Self { orders, products }
    }
}

/// Create the Axum router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/products/{id}",
            get(products::get_product)
                .put(products::edit_product)
                .patch(products::edit_product)
                .delete(products::delete_product),
        )
        .route("/orders", get(orders::list_orders).post(orders::create_order))
        .route(
            "/orders/{id}",
            get(orders::get_order)
                .patch(orders::edit_order)
                .delete(orders::delete_order),
        )
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

/// Page size must be a positive integer.
fn check_limit(limit: usize) -> Result<(), ApiError> {
    if limit == 0 {
        return Err(ApiError::bad_request("limit must be a positive integer"));
    }
    Ok(())
}
