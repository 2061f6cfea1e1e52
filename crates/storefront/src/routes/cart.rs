//! Cart route handlers.
//!
//! Every cart action is a plain form post that updates the cart in the
//! visitor's session and redirects back to the page it came from.

use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use food_delivery_core::{Cart, ProductId};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::models::session_keys;
use crate::routes::views::safe_return_path;
use crate::state::AppState;

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the cart from the session. Unreadable session data yields an empty cart.
pub async fn load_cart(session: &Session) -> Cart {
    match session.get::<Cart>(session_keys::CART).await {
        Ok(cart) => cart.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read cart from session");
            Cart::default()
        }
    }
}

/// Store the cart in the session.
///
/// # Errors
///
/// Returns an error if the session store rejects the write.
pub async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(session_keys::CART, cart).await?;
    Ok(())
}

// =============================================================================
// Forms
// =============================================================================

/// Form for actions on a specific product.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub product_id: ProductId,
    pub return_to: Option<String>,
}

/// Form for actions on the cart as a whole.
#[derive(Debug, Deserialize)]
pub struct ReturnForm {
    pub return_to: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Put a product in the cart, replacing whatever was there.
#[instrument(skip(state, session), fields(product_id = %form.product_id))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ProductForm>,
) -> Result<impl IntoResponse> {
    let product = state
        .load_settings()
        .await
        .resolve(form.product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.product_id)))?;

    let mut cart = load_cart(&session).await;
    cart.add(product);
    save_cart(&session, &cart).await?;

    add_breadcrumb("cart", "Added product", &[("product_id", form.product_id.to_string())]);
    tracing::info!("Product added to cart");
    Ok(Redirect::to(&safe_return_path(form.return_to.as_deref())))
}

/// Product card button: remove the product if it is in the cart, add it otherwise.
#[instrument(skip(state, session), fields(product_id = %form.product_id))]
pub async fn toggle_item(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ProductForm>,
) -> Result<impl IntoResponse> {
    let product = state
        .load_settings()
        .await
        .resolve(form.product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.product_id)))?;

    let mut cart = load_cart(&session).await;
    let in_cart = cart.toggle_item(product);
    save_cart(&session, &cart).await?;

    tracing::info!(in_cart, "Cart item toggled");
    Ok(Redirect::to(&safe_return_path(form.return_to.as_deref())))
}

/// Empty the cart.
#[instrument(skip_all)]
pub async fn remove(session: Session, Form(form): Form<ReturnForm>) -> Result<impl IntoResponse> {
    let mut cart = load_cart(&session).await;
    if let Some(removed) = cart.remove() {
        save_cart(&session, &cart).await?;
        tracing::info!(product_id = %removed.id(), "Product removed from cart");
    }
    Ok(Redirect::to(&safe_return_path(form.return_to.as_deref())))
}

/// Open or close the cart panel.
#[instrument(skip_all)]
pub async fn toggle_panel(
    session: Session,
    Form(form): Form<ReturnForm>,
) -> Result<impl IntoResponse> {
    let mut cart = load_cart(&session).await;
    cart.toggle_panel();
    save_cart(&session, &cart).await?;
    Ok(Redirect::to(&safe_return_path(form.return_to.as_deref())))
}
