//! Checkout-link and image tabs.
//!
//! Both tabs post every row at once; the submitted column replaces what was
//! saved for each listed product.

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::models::{Flash, Tab};
use crate::routes::page::{AdminPageTemplate, FlashView, edit_target, form_for};
use crate::services::{CatalogEditor, LinkField, link_fields};
use crate::state::AppState;

/// Save the checkout-link tab.
///
/// POST /settings/checkout
#[instrument(skip_all)]
pub async fn save_checkout_links(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<Vec<(String, String)>>,
) -> Result<Response> {
    save_links(&state, &session, LinkField::Checkout, Tab::Checkout, &form).await
}

/// Save the image tab.
///
/// POST /settings/images
#[instrument(skip_all)]
pub async fn save_image_links(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<Vec<(String, String)>>,
) -> Result<Response> {
    save_links(&state, &session, LinkField::Image, Tab::Images, &form).await
}

async fn save_links(
    state: &AppState,
    session: &Session,
    field: LinkField,
    tab: Tab,
    form: &[(String, String)],
) -> Result<Response> {
    let settings = state.load_settings().await;
    let mut editor = CatalogEditor::new(&settings);

    let links = link_fields(field, form);
    tracing::debug!(count = links.len(), ?field, "Applying tab links");

    if let Err(e) = editor.set_links(field, links) {
        tracing::info!(error = %e, "Rejected tab submission");
        let target = edit_target(session).await;
        let page_form = form_for(&editor, &editor.catalog(), target);
        return AdminPageTemplate::new(
            state.config(),
            &editor,
            tab,
            Some(FlashView::error(e.to_string())),
            page_form,
            target,
        )
        .respond(StatusCode::UNPROCESSABLE_ENTITY);
    }

    let flash = match editor.save(state.settings()).await {
        Ok(()) => Flash::SettingsSaved,
        Err(e) => {
            tracing::error!(error = %e, "Failed to save product settings");
            Flash::SaveFailed
        }
    };

    Ok(Redirect::to(&flash.redirect_url(tab)).into_response())
}
