//! Display data shared by several templates.

use axum::http::Uri;

use food_delivery_core::{Cart, Category, ResolvedProduct};

/// Product card on the catalog grid and the product checkout page.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: String,
    pub original_price: Option<String>,
    /// e.g. `15% OFF`
    pub discount_badge: Option<String>,
    pub rating: Option<String>,
    pub image: String,
    pub in_cart: bool,
}

impl ProductCardView {
    #[must_use]
    pub fn new(resolved: &ResolvedProduct, cart: &Cart) -> Self {
        let product = &resolved.product;
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            original_price: product.original_price.map(|p| p.to_string()),
            discount_badge: product
                .discount
                .is_active()
                .then(|| format!("{} OFF", product.discount)),
            rating: product.rating.map(|r| r.to_string()),
            image: resolved.display_image(),
            in_cart: cart.contains(product.id),
        }
    }
}

/// Category chip above the catalog grid.
#[derive(Clone)]
pub struct CategoryChipView {
    pub id: i32,
    pub name: String,
    pub glyph: &'static str,
    pub active: bool,
}

impl CategoryChipView {
    #[must_use]
    pub fn new(category: &Category, active: bool) -> Self {
        Self {
            id: category.id.as_i32(),
            name: category.name.clone(),
            glyph: category.icon.glyph(),
            active,
        }
    }
}

/// The product shown inside the cart panel.
#[derive(Clone)]
pub struct CartItemView {
    pub id: i32,
    pub name: String,
    pub price: String,
    pub image: String,
}

/// Cart panel and badge.
#[derive(Clone)]
pub struct CartPanelView {
    pub is_open: bool,
    pub item: Option<CartItemView>,
    pub total: String,
}

impl From<&Cart> for CartPanelView {
    fn from(cart: &Cart) -> Self {
        Self {
            is_open: cart.is_panel_open(),
            item: cart.item().map(|item| CartItemView {
                id: item.id().as_i32(),
                name: item.name().to_string(),
                price: item.price().to_string(),
                image: item.display_image(),
            }),
            total: cart.total().to_string(),
        }
    }
}

/// Navbar, cart panel and footer data every page needs.
#[derive(Clone)]
pub struct PageChrome {
    pub cart: CartPanelView,
    /// Current search term, echoed into the navbar input.
    pub search: String,
    /// Where cart forms on this page redirect back to.
    pub return_to: String,
}

impl PageChrome {
    #[must_use]
    pub fn new(cart: &Cart, uri: &Uri, search: Option<&str>) -> Self {
        let here = uri.path_and_query().map(|pq| pq.as_str());
        Self {
            cart: CartPanelView::from(cart),
            search: search.map(str::trim).unwrap_or_default().to_string(),
            return_to: safe_return_path(here),
        }
    }

    /// Number shown on the cart badge.
    #[must_use]
    pub const fn cart_count(&self) -> usize {
        if self.cart.item.is_some() { 1 } else { 0 }
    }
}

/// Keep redirects on this site: only absolute paths are accepted.
#[must_use]
pub fn safe_return_path(candidate: Option<&str>) -> String {
    candidate
        .map(str::trim)
        .filter(|p| p.starts_with('/') && !p.starts_with("//") && !p.contains('\\'))
        .unwrap_or("/")
        .to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use food_delivery_core::{Catalog, ProductId, overlay};

    use super::*;

    fn resolved(id: i32) -> ResolvedProduct {
        overlay::resolve(Catalog::baseline().product(ProductId::new(id)).unwrap(), None)
    }

    #[test]
    fn test_safe_return_path() {
        assert_eq!(safe_return_path(Some("/?category=2")), "/?category=2");
        assert_eq!(safe_return_path(Some("https://evil.example")), "/");
        assert_eq!(safe_return_path(Some("//evil.example")), "/");
        assert_eq!(safe_return_path(Some("/\\evil.example")), "/");
        assert_eq!(safe_return_path(None), "/");
    }

    #[test]
    fn test_product_card_badges() {
        let card = ProductCardView::new(&resolved(1), &Cart::new());
        assert_eq!(card.price, "R$ 29.99");
        assert_eq!(card.original_price.as_deref(), Some("R$ 34.99"));
        assert_eq!(card.discount_badge.as_deref(), Some("15% OFF"));
        assert_eq!(card.rating.as_deref(), Some("4.8"));
        assert!(!card.in_cart);

        let plain = ProductCardView::new(&resolved(9), &Cart::new());
        assert!(plain.discount_badge.is_none());
        assert!(plain.rating.is_none());
    }

    #[test]
    fn test_card_marks_cart_item() {
        let mut cart = Cart::new();
        cart.add(resolved(5));
        assert!(ProductCardView::new(&resolved(5), &cart).in_cart);
        assert!(!ProductCardView::new(&resolved(6), &cart).in_cart);
    }

    #[test]
    fn test_cart_panel_view() {
        let mut cart = Cart::new();
        let empty = CartPanelView::from(&cart);
        assert!(empty.item.is_none());
        assert_eq!(empty.total, "R$ 0.00");

        cart.add(resolved(5));
        cart.toggle_panel();
        let panel = CartPanelView::from(&cart);
        assert!(panel.is_open);
        assert_eq!(panel.item.unwrap().name, "Macarrão Carbonara");
        assert_eq!(panel.total, "R$ 27.99");
    }

    #[test]
    fn test_chrome_return_to_current_page() {
        let uri: Uri = "/?search=pizza".parse().unwrap();
        let chrome = PageChrome::new(&Cart::new(), &uri, Some(" pizza "));
        assert_eq!(chrome.return_to, "/?search=pizza");
        assert_eq!(chrome.search, "pizza");
        assert_eq!(chrome.cart_count(), 0);
    }
}
