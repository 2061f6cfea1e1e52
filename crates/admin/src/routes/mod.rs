//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Page (query: tab=checkout|images|products, success, error)
//! GET  /                       - Admin page
//!
//! # Tabs
//! POST /settings/checkout      - Save every checkout link
//! POST /settings/images        - Save every image URL
//!
//! # Products
//! POST /products               - Create, or update the product being edited
//! GET  /products/{id}/edit     - Start editing a product
//! POST /products/cancel        - Stop editing without saving
//! POST /products/{id}/delete   - Delete a custom product
//! ```

pub mod page;
pub mod products;
pub mod settings;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Build the settings tabs router.
pub fn settings_routes() -> Router<AppState> {
    Router::new()
        .route("/checkout", post(settings::save_checkout_links))
        .route("/images", post(settings::save_image_links))
}

/// Build the product management router (everything below `/products`).
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/cancel", post(products::cancel))
        .route("/{id}/edit", get(products::edit))
        .route("/{id}/delete", post(products::delete))
}

/// Create all routes for admin.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(page::index))
        .route("/products", post(products::submit))
        .nest("/settings", settings_routes())
        .nest("/products", product_routes())
}
