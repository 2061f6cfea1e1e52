//! The admin page: three tabs over one working copy of the settings.

use askama::Template;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use food_delivery_core::{Catalog, ProductId};

use crate::config::AdminConfig;
use crate::error::Result;
use crate::filters;
use crate::models::{Flash, Tab, session_keys};
use crate::services::{CatalogEditor, LinkField, ProductForm};
use crate::state::AppState;

// =============================================================================
// View Types
// =============================================================================

#[derive(Debug, Clone)]
pub struct TabView {
    pub href: String,
    pub label: &'static str,
    pub active: bool,
}

/// Banner above the tabs.
#[derive(Debug, Clone)]
pub struct FlashView {
    pub class: &'static str,
    pub message: String,
}

impl From<Flash> for FlashView {
    fn from(flash: Flash) -> Self {
        Self {
            class: flash.kind().css_class(),
            message: flash.message().to_string(),
        }
    }
}

impl FlashView {
    /// An error banner with a custom message.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            class: crate::models::FlashKind::Error.css_class(),
            message: message.into(),
        }
    }
}

/// One row of the checkout or image tab.
#[derive(Debug, Clone)]
pub struct LinkRowView {
    pub id: i32,
    pub name: String,
    pub checkout_url: String,
    pub image_url: String,
}

#[derive(Debug, Clone)]
pub struct CategoryOptionView {
    pub id: i32,
    pub name: String,
    pub selected: bool,
}

/// One row of the custom products table.
#[derive(Debug, Clone)]
pub struct CustomProductRow {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub price: String,
    pub original_price: Option<String>,
    /// Blank when there is no discount.
    pub discount: String,
}

/// Admin page template.
#[derive(Template)]
#[template(path = "index.html")]
pub struct AdminPageTemplate {
    pub storefront_url: String,
    pub tab: Tab,
    pub tabs: Vec<TabView>,
    pub flash: Option<FlashView>,
    pub rows: Vec<LinkRowView>,
    pub form: ProductForm,
    pub editing: Option<i32>,
    pub categories: Vec<CategoryOptionView>,
    pub custom_products: Vec<CustomProductRow>,
}

impl AdminPageTemplate {
    /// Build the page from a working copy.
    #[must_use]
    pub fn new(
        config: &AdminConfig,
        editor: &CatalogEditor,
        tab: Tab,
        flash: Option<FlashView>,
        form: ProductForm,
        editing: Option<ProductId>,
    ) -> Self {
        let catalog = editor.catalog();

        let rows = catalog
            .products()
            .iter()
            .map(|p| LinkRowView {
                id: p.id.as_i32(),
                name: p.name.clone(),
                checkout_url: editor.link(p.id, LinkField::Checkout).to_string(),
                image_url: editor.link(p.id, LinkField::Image).to_string(),
            })
            .collect();

        let categories = catalog
            .categories()
            .iter()
            .map(|c| CategoryOptionView {
                id: c.id.as_i32(),
                name: c.name.clone(),
                selected: c.id.to_string() == form.category_id.trim(),
            })
            .collect();

        let custom_products = editor
            .custom_products()
            .iter()
            .map(|p| CustomProductRow {
                id: p.id.as_i32(),
                name: p.name.clone(),
                category: catalog
                    .category(p.category_id)
                    .map(|c| c.name.clone())
                    .unwrap_or_default(),
                price: p.price.to_string(),
                original_price: p.original_price.map(|price| price.to_string()),
                discount: if p.discount.is_active() {
                    p.discount.to_string()
                } else {
                    String::new()
                },
            })
            .collect();

        Self {
            storefront_url: config.storefront_url.clone(),
            tab,
            tabs: Tab::ALL
                .iter()
                .map(|t| TabView {
                    href: t.href(),
                    label: t.label(),
                    active: *t == tab,
                })
                .collect(),
            flash,
            rows,
            form,
            editing: editing.map(|id| id.as_i32()),
            categories,
            custom_products,
        }
    }

    /// Render with the given status.
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to render.
    pub fn respond(&self, status: StatusCode) -> Result<Response> {
        Ok((status, Html(self.render()?)).into_response())
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// The product the form is editing, if any.
///
/// A broken session just means nothing is being edited.
pub async fn edit_target(session: &Session) -> Option<ProductId> {
    session
        .get::<ProductId>(session_keys::EDIT_TARGET)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to read edit target from session");
            None
        })
}

/// Forget the product being edited.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn clear_edit_target(session: &Session) -> Result<()> {
    session
        .remove::<ProductId>(session_keys::EDIT_TARGET)
        .await?;
    Ok(())
}

/// The product form for a page view: the edit target's values, or blank.
#[must_use]
pub fn form_for(editor: &CatalogEditor, catalog: &Catalog, target: Option<ProductId>) -> ProductForm {
    target
        .and_then(|id| catalog.product(id))
        .map_or_else(ProductForm::blank, |product| {
            ProductForm::for_product(product, editor.overlay().get(product.id))
        })
}

// =============================================================================
// Page Handler
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub tab: Option<String>,
    pub success: Option<String>,
    pub error: Option<String>,
}

/// Render the admin page.
///
/// GET /
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<PageQuery>,
) -> Result<Response> {
    let settings = state.load_settings().await;
    let editor = CatalogEditor::new(&settings);
    let catalog = editor.catalog();

    let mut target = edit_target(&session).await;
    if let Some(id) = target.filter(|id| !catalog.contains(*id)) {
        tracing::warn!(product_id = %id, "Edit target no longer exists");
        clear_edit_target(&session).await?;
        target = None;
    }

    let tab = Tab::from_query(query.tab.as_deref());
    let flash = Flash::from_query(query.success.as_deref(), query.error.as_deref()).map(FlashView::from);
    let form = form_for(&editor, &catalog, target);

    AdminPageTemplate::new(state.config(), &editor, tab, flash, form, target).respond(StatusCode::OK)
}
