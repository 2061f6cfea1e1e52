//! Product management tab: create, edit, cancel and delete.

use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use food_delivery_core::ProductId;

use crate::error::Result;
use crate::models::{Flash, Tab, session_keys};
use crate::routes::page::{AdminPageTemplate, FlashView, clear_edit_target, edit_target};
use crate::services::{CatalogEditor, EditorError, ProductForm};
use crate::state::AppState;

fn parse_id(raw: &str) -> Option<ProductId> {
    raw.parse::<ProductId>().ok().filter(ProductId::is_valid)
}

/// Create a product, or update the one being edited.
///
/// POST /products
#[instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    let settings = state.load_settings().await;
    let mut editor = CatalogEditor::new(&settings);
    let target = edit_target(&session).await;

    let outcome = form.validate(&editor.catalog()).and_then(|draft| match target {
        Some(id) => editor.update(id, draft).map(|()| Flash::ProductUpdated),
        None => editor.create(draft).map(|_| Flash::ProductCreated),
    });

    let flash = match outcome {
        Ok(flash) => flash,
        Err(EditorError::UnknownProduct(id)) => {
            tracing::warn!(product_id = %id, "Edit target disappeared before saving");
            clear_edit_target(&session).await?;
            return Ok(Redirect::to(&Flash::UnknownProduct.redirect_url(Tab::Products)).into_response());
        }
        Err(e) => {
            tracing::info!(error = %e, "Rejected product form");
            return AdminPageTemplate::new(
                state.config(),
                &editor,
                Tab::Products,
                Some(FlashView::error(e.to_string())),
                form,
                target,
            )
            .respond(StatusCode::UNPROCESSABLE_ENTITY);
        }
    };

    if let Err(e) = editor.save(state.settings()).await {
        tracing::error!(error = %e, "Failed to save product");
        return Ok(Redirect::to(&Flash::SaveFailed.redirect_url(Tab::Products)).into_response());
    }

    clear_edit_target(&session).await?;
    Ok(Redirect::to(&flash.redirect_url(Tab::Products)).into_response())
}

/// Load a product into the form.
///
/// GET /products/{id}/edit
#[instrument(skip(state, session))]
pub async fn edit(
    State(state): State<AppState>,
    session: Session,
    Path(raw_id): Path<String>,
) -> Result<Response> {
    let settings = state.load_settings().await;
    let Some(id) = parse_id(&raw_id).filter(|id| settings.catalog().contains(*id)) else {
        return Ok(Redirect::to(&Flash::UnknownProduct.redirect_url(Tab::Products)).into_response());
    };

    session.insert(session_keys::EDIT_TARGET, id).await?;
    tracing::debug!(product_id = %id, "Editing product");

    Ok(Redirect::to(&Tab::Products.href()).into_response())
}

/// Drop the form's edits without saving.
///
/// POST /products/cancel
#[instrument(skip_all)]
pub async fn cancel(session: Session) -> Result<Response> {
    clear_edit_target(&session).await?;
    Ok(Redirect::to(&Flash::EditCancelled.redirect_url(Tab::Products)).into_response())
}

/// Delete a custom product.
///
/// POST /products/{id}/delete
#[instrument(skip(state, session))]
pub async fn delete(
    State(state): State<AppState>,
    session: Session,
    Path(raw_id): Path<String>,
) -> Result<Response> {
    let Some(id) = parse_id(&raw_id) else {
        return Ok(Redirect::to(&Flash::UnknownProduct.redirect_url(Tab::Products)).into_response());
    };

    let settings = state.load_settings().await;
    let mut editor = CatalogEditor::new(&settings);

    let flash = match editor.delete(id) {
        Ok(_) => match editor.save(state.settings()).await {
            Ok(()) => {
                if edit_target(&session).await == Some(id) {
                    clear_edit_target(&session).await?;
                }
                Flash::ProductDeleted
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to save after delete");
                Flash::SaveFailed
            }
        },
        Err(EditorError::NotCustom(_)) => Flash::NotCustom,
        Err(_) => Flash::UnknownProduct,
    };

    Ok(Redirect::to(&flash.redirect_url(Tab::Products)).into_response())
}
