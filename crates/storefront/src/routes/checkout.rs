//! Checkout route handlers.
//!
//! There is no payment integration: submitting a valid form waits for the
//! configured processing delay and shows a confirmation page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use food_delivery_core::OrderSummary;

use crate::error::add_breadcrumb;
use crate::filters;
use crate::models::{CheckoutForm, PaymentMethod};
use crate::routes::cart::load_cart;
use crate::routes::views::{CartItemView, PageChrome};
use crate::state::AppState;

/// Order summary column.
#[derive(Clone)]
pub struct SummaryView {
    pub item: CartItemView,
    pub subtotal: String,
    pub delivery_fee: String,
    pub total: String,
}

impl From<&OrderSummary> for SummaryView {
    fn from(summary: &OrderSummary) -> Self {
        Self {
            item: CartItemView {
                id: summary.item.id().as_i32(),
                name: summary.item.name().to_string(),
                price: summary.item.price().to_string(),
                image: summary.item.display_image(),
            },
            subtotal: summary.subtotal.to_string(),
            delivery_fee: summary.delivery_fee.to_string(),
            total: summary.total.to_string(),
        }
    }
}

/// One payment radio button.
#[derive(Clone)]
pub struct PaymentOptionView {
    pub value: &'static str,
    pub label: &'static str,
    pub checked: bool,
}

fn payment_options(selected: &str) -> Vec<PaymentOptionView> {
    PaymentMethod::ALL
        .iter()
        .map(|m| PaymentOptionView {
            value: m.as_str(),
            label: m.label(),
            checked: m.as_str() == selected,
        })
        .collect()
}

/// Checkout form page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout.html")]
pub struct CheckoutTemplate {
    pub chrome: PageChrome,
    pub summary: SummaryView,
    pub form: CheckoutForm,
    pub payment_options: Vec<PaymentOptionView>,
    pub errors: Vec<String>,
}

/// Order confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "order_complete.html")]
pub struct OrderCompleteTemplate {
    pub chrome: PageChrome,
}

/// Display the checkout form. Visitors with an empty cart are sent home.
#[instrument(skip_all)]
pub async fn show(session: Session, uri: Uri) -> Response {
    let cart = load_cart(&session).await;
    let Some(summary) = cart.summary() else {
        return Redirect::to("/").into_response();
    };

    let form = CheckoutForm::blank();
    CheckoutTemplate {
        chrome: PageChrome::new(&cart, &uri, None),
        summary: SummaryView::from(&summary),
        payment_options: payment_options(&form.payment_method),
        form,
        errors: Vec::new(),
    }
    .into_response()
}

/// Simulate placing the order.
///
/// Invalid submissions re-render the form with the entered values. The
/// cart is left as it is after the order completes.
#[instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    uri: Uri,
    Form(form): Form<CheckoutForm>,
) -> Response {
    let cart = load_cart(&session).await;
    let Some(summary) = cart.summary() else {
        return Redirect::to("/").into_response();
    };
    let chrome = PageChrome::new(&cart, &uri, None);

    let details = match form.validate() {
        Ok(details) => details,
        Err(errors) => {
            tracing::info!(errors = errors.len(), "Checkout form rejected");
            let page = CheckoutTemplate {
                chrome,
                summary: SummaryView::from(&summary),
                payment_options: payment_options(&form.payment_method),
                form,
                errors,
            };
            return (StatusCode::UNPROCESSABLE_ENTITY, page).into_response();
        }
    };

    tokio::time::sleep(state.config().checkout_delay).await;

    add_breadcrumb(
        "checkout",
        "Order placed",
        &[("product_id", summary.item.id().to_string())],
    );
    tracing::info!(
        product_id = %summary.item.id(),
        total = %summary.total,
        payment_method = %details.payment_method,
        "Order placed"
    );

    OrderCompleteTemplate { chrome }.into_response()
}
