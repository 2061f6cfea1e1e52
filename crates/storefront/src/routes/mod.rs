//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                          - Catalog (query: search, category)
//! GET  /health                    - Health check
//!
//! # Cart (form posts, redirect back to return_to)
//! POST /cart/add                  - Put a product in the cart
//! POST /cart/toggle-item          - Product card button: add or remove
//! POST /cart/remove               - Empty the cart
//! POST /cart/toggle               - Open or close the cart panel
//!
//! # Checkout
//! GET  /checkout                  - Delivery form and order summary
//! POST /checkout                  - Simulated order submission
//!
//! # Per-product checkout
//! GET  /product/{id}/checkout     - Product checkout page
//! GET  /product/{id}/buy          - Redirect to the product's checkout URL
//! ```

pub mod cart;
pub mod checkout;
pub mod home;
pub mod product;
pub mod views;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(cart::add))
        .route("/toggle-item", post(cart::toggle_item))
        .route("/remove", post(cart::remove))
        .route("/toggle", post(cart::toggle_panel))
}

/// Create the per-product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/{id}/checkout", get(product::checkout_page))
        .route("/{id}/buy", get(product::buy))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/cart", cart_routes())
        .route("/checkout", get(checkout::show).post(checkout::submit))
        .nest("/product", product_routes())
}
