//! Catalog page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    http::Uri,
    response::IntoResponse,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use food_delivery_core::{Catalog, CategoryId, ProductQuery};

use crate::filters;
use crate::routes::cart::load_cart;
use crate::routes::views::{CategoryChipView, PageChrome, ProductCardView};
use crate::state::AppState;

/// Catalog query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    pub search: Option<String>,
    /// Kept as text so a malformed value just shows every category.
    pub category: Option<String>,
}

/// Catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub chrome: PageChrome,
    pub categories: Vec<CategoryChipView>,
    /// `0` when no category is selected ("Todos").
    pub active_category: i32,
    pub heading: String,
    pub searching: bool,
    pub products: Vec<ProductCardView>,
    pub result_label: String,
    pub empty_message: String,
}

/// Display the catalog, filtered by search term or category.
#[instrument(skip(state, session, uri))]
pub async fn home(
    State(state): State<AppState>,
    session: Session,
    uri: Uri,
    Query(query): Query<HomeQuery>,
) -> impl IntoResponse {
    let settings = state.load_settings().await;
    let cart = load_cart(&session).await;

    let category = query
        .category
        .as_deref()
        .and_then(|c| c.parse::<CategoryId>().ok());
    let filter = ProductQuery::new(query.search.as_deref(), category);

    let resolved = settings.resolved_products();
    let products: Vec<ProductCardView> = filter
        .apply(&resolved)
        .into_iter()
        .map(|p| ProductCardView::new(p, &cart))
        .collect();

    let catalog = Catalog::baseline();
    let active = filter.category();
    let categories = catalog
        .categories()
        .iter()
        .map(|c| CategoryChipView::new(c, Some(c.id) == active))
        .collect();

    let heading = match (filter.search(), active.and_then(|id| catalog.category(id))) {
        (Some(_), _) => "Resultados da pesquisa".to_string(),
        (None, Some(category)) => category.name.clone(),
        (None, None) => "Produtos populares".to_string(),
    };

    let empty_message = filter.search().map_or_else(
        || "Nenhum produto encontrado nesta categoria.".to_string(),
        |term| format!("Nenhum produto encontrado para \"{term}\"."),
    );

    let result_label = if products.len() == 1 {
        "1 produto encontrado".to_string()
    } else {
        format!("{} produtos encontrados", products.len())
    };

    tracing::debug!(results = products.len(), "Catalog rendered");

    HomeTemplate {
        chrome: PageChrome::new(&cart, &uri, filter.search()),
        categories,
        active_category: active.map_or(0, |id| id.as_i32()),
        heading,
        searching: filter.search().is_some(),
        products,
        result_label,
        empty_message,
    }
}
