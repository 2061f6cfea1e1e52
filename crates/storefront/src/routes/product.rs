//! Per-product checkout pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use food_delivery_core::{CheckoutTarget, ProductId, ResolvedProduct, overlay};

use crate::filters;
use crate::routes::cart::load_cart;
use crate::routes::views::{PageChrome, ProductCardView};
use crate::state::AppState;

/// What the "Finalizar Compra" button does.
#[derive(Clone)]
pub enum CheckoutAction {
    /// Open the external checkout in a new tab.
    External(String),
    /// Follow an on-site link.
    Link(String),
    /// This page is the product's own checkout: add it to the cart and go
    /// to the checkout form.
    AddToCart,
}

impl CheckoutAction {
    fn for_product(resolved: &ResolvedProduct) -> Self {
        match resolved.checkout_target() {
            CheckoutTarget::External(url) => Self::External(url.to_string()),
            CheckoutTarget::Internal(path)
                if path == overlay::fallback_checkout_path(resolved.id()) =>
            {
                Self::AddToCart
            }
            CheckoutTarget::Internal(path) => Self::Link(path),
        }
    }
}

/// Product checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "product/checkout.html")]
pub struct ProductCheckoutTemplate {
    pub chrome: PageChrome,
    pub product: ProductCardView,
    pub action: CheckoutAction,
}

/// Unknown product page template.
#[derive(Template, WebTemplate)]
#[template(path = "product/not_found.html")]
pub struct ProductNotFoundTemplate {
    pub chrome: PageChrome,
}

async fn find_product(state: &AppState, raw_id: &str) -> Option<ResolvedProduct> {
    let id = raw_id.parse::<ProductId>().ok().filter(ProductId::is_valid)?;
    state.load_settings().await.resolve(id)
}

/// Display the checkout page for one product.
///
/// Unknown or malformed ids get a friendly 404 page.
#[instrument(skip(state, session, uri))]
pub async fn checkout_page(
    State(state): State<AppState>,
    session: Session,
    uri: Uri,
    Path(id): Path<String>,
) -> Response {
    let cart = load_cart(&session).await;
    let chrome = PageChrome::new(&cart, &uri, None);

    let Some(resolved) = find_product(&state, &id).await else {
        tracing::info!("Product checkout page for unknown product");
        return (StatusCode::NOT_FOUND, ProductNotFoundTemplate { chrome }).into_response();
    };

    ProductCheckoutTemplate {
        chrome,
        product: ProductCardView::new(&resolved, &cart),
        action: CheckoutAction::for_product(&resolved),
    }
    .into_response()
}

/// Redirect to the product's resolved checkout URL.
#[instrument(skip(state, session, uri))]
pub async fn buy(
    State(state): State<AppState>,
    session: Session,
    uri: Uri,
    Path(id): Path<String>,
) -> Response {
    let Some(resolved) = find_product(&state, &id).await else {
        let cart = load_cart(&session).await;
        let chrome = PageChrome::new(&cart, &uri, None);
        return (StatusCode::NOT_FOUND, ProductNotFoundTemplate { chrome }).into_response();
    };

    let target = resolved.checkout_target();
    tracing::info!(
        product_id = %resolved.id(),
        external = target.is_external(),
        "Redirecting to checkout"
    );
    Redirect::to(target.as_str()).into_response()
}
