//! Storefront pages: catalog, cart, checkout and per-product checkout.

#![allow(clippy::unwrap_used)]

use axum::http::{StatusCode, header};
use food_delivery_integration_tests::TestContext;

#[tokio::test]
async fn test_health() {
    let mut ctx = TestContext::new();

    let resp = ctx.storefront.get("/health").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, "ok");
}

#[tokio::test]
async fn test_home_lists_catalog_with_security_headers() {
    let mut ctx = TestContext::new();

    let resp = ctx.storefront.get("/").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Peça sua comida favorita"));
    assert!(resp.body.contains("Pizza de calabresa"));
    assert!(resp.body.contains("/product/2/checkout"));
    assert!(resp.headers.contains_key(header::CONTENT_SECURITY_POLICY));
    assert!(resp.headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn test_search_is_case_insensitive() {
    let mut ctx = TestContext::new();

    let resp = ctx.storefront.get("/?search=CARBONARA").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Resultados para"));
    assert!(resp.body.contains("Macarrão Carbonara"));
    assert!(!resp.body.contains("Pizza de calabresa"));
}

#[tokio::test]
async fn test_unknown_category_shows_empty_state() {
    let mut ctx = TestContext::new();

    let resp = ctx.storefront.get("/?category=999").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Ver todos os produtos"));
}

#[tokio::test]
async fn test_cart_holds_one_item() {
    let mut ctx = TestContext::new();

    let resp = ctx
        .storefront
        .post_form("/cart/add", &[("product_id", "3"), ("return_to", "/")])
        .await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/"));
    assert!(ctx.storefront.has_session());

    ctx.storefront
        .post_form("/cart/add", &[("product_id", "5"), ("return_to", "/")])
        .await;

    let checkout = ctx.storefront.get("/checkout").await;
    assert_eq!(checkout.status, StatusCode::OK);
    assert!(checkout.body.contains("Macarrão Carbonara"));
    assert!(!checkout.body.contains("Hambúrguer Clássico"));
    assert!(checkout.body.contains("R$ 27.99"));
    assert!(checkout.body.contains("R$ 32.99"));
}

#[tokio::test]
async fn test_cart_panel_and_remove() {
    let mut ctx = TestContext::new();

    ctx.storefront
        .post_form("/cart/toggle-item", &[("product_id", "4"), ("return_to", "/")])
        .await;
    ctx.storefront.post_form("/cart/toggle", &[("return_to", "/")]).await;

    let open = ctx.storefront.get("/").await;
    assert!(open.body.contains("Seu Carrinho"));
    assert!(open.body.contains("Remover"));

    ctx.storefront.post_form("/cart/remove", &[("return_to", "/")]).await;

    let emptied = ctx.storefront.get("/").await;
    assert!(emptied.body.contains("Seu carrinho está vazio"));
}

#[tokio::test]
async fn test_add_unknown_product_is_not_found() {
    let mut ctx = TestContext::new();

    let resp = ctx
        .storefront
        .post_form("/cart/add", &[("product_id", "999")])
        .await;

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_offsite_return_to_is_ignored() {
    let mut ctx = TestContext::new();

    let resp = ctx
        .storefront
        .post_form("/cart/toggle", &[("return_to", "//evil.example/")])
        .await;

    assert_eq!(resp.location(), Some("/"));
}

#[tokio::test]
async fn test_checkout_with_empty_cart_redirects_home() {
    let mut ctx = TestContext::new();

    let resp = ctx.storefront.get("/checkout").await;

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/"));
}

#[tokio::test]
async fn test_checkout_validation_and_completion() {
    let mut ctx = TestContext::new();
    ctx.storefront
        .post_form("/cart/add", &[("product_id", "2"), ("return_to", "/checkout")])
        .await;

    let rejected = ctx
        .storefront
        .post_form(
            "/checkout",
            &[
                ("name", "Ana"),
                ("email", "not-an-email"),
                ("address", "Rua A, 1"),
                ("city", "São Paulo"),
                ("zipCode", "01000-000"),
                ("paymentMethod", "pix"),
            ],
        )
        .await;
    assert_eq!(rejected.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(rejected.body.contains("Rua A, 1"));

    let placed = ctx
        .storefront
        .post_form(
            "/checkout",
            &[
                ("name", "Ana"),
                ("email", "ana@example.com"),
                ("address", "Rua A, 1"),
                ("city", "São Paulo"),
                ("zipCode", "01000-000"),
                ("paymentMethod", "pix"),
            ],
        )
        .await;
    assert_eq!(placed.status, StatusCode::OK);
    assert!(placed.body.contains("Pedido Concluído!"));
}

#[tokio::test]
async fn test_product_checkout_pages() {
    let mut ctx = TestContext::new();

    let external = ctx.storefront.get("/product/1/checkout").await;
    assert_eq!(external.status, StatusCode::OK);
    assert!(external.body.contains("https://web.syncpay.pro/"));
    assert!(external.body.contains("target=\"_blank\""));

    let own = ctx.storefront.get("/product/2/checkout").await;
    assert_eq!(own.status, StatusCode::OK);
    assert!(own.body.contains("action=\"/cart/add\""));

    let missing = ctx.storefront.get("/product/999/checkout").await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let garbage = ctx.storefront.get("/product/abc/checkout").await;
    assert_eq!(garbage.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_buy_redirects_to_effective_checkout() {
    let mut ctx = TestContext::new();

    let external = ctx.storefront.get("/product/1/buy").await;
    assert_eq!(external.status, StatusCode::SEE_OTHER);
    assert!(external.location().unwrap().starts_with("https://web.syncpay.pro/"));

    let internal = ctx.storefront.get("/product/2/buy").await;
    assert_eq!(internal.location(), Some("/product/2/checkout"));
}
