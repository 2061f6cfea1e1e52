//! Single-slot cart.
//!
//! The cart holds at most one product. Adding replaces whatever was there.
//! Whether the cart panel is open is tracked independently of its contents.

use serde::{Deserialize, Serialize};

use crate::overlay::ResolvedProduct;
use crate::types::{Price, ProductId};

/// What the cart currently holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "product", rename_all = "snake_case")]
pub enum CartSlot {
    #[default]
    Empty,
    Holding(ResolvedProduct),
}

/// Per-visitor cart state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    slot: CartSlot,
    panel_open: bool,
}

impl Cart {
    /// An empty cart with the panel closed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a product in the cart, replacing any previous one.
    pub fn add(&mut self, product: ResolvedProduct) {
        self.slot = CartSlot::Holding(product);
    }

    /// Empty the cart. Does nothing if it is already empty.
    pub fn remove(&mut self) -> Option<ResolvedProduct> {
        match std::mem::take(&mut self.slot) {
            CartSlot::Holding(product) => Some(product),
            CartSlot::Empty => None,
        }
    }

    /// Open or close the cart panel.
    pub const fn toggle_panel(&mut self) {
        self.panel_open = !self.panel_open;
    }

    /// Product card button: removes the product if it is the one in the
    /// cart, adds it otherwise. Returns `true` if the product is now in the
    /// cart.
    pub fn toggle_item(&mut self, product: ResolvedProduct) -> bool {
        if self.contains(product.id()) {
            self.remove();
            false
        } else {
            self.add(product);
            true
        }
    }

    /// The product in the cart, if any.
    #[must_use]
    pub const fn item(&self) -> Option<&ResolvedProduct> {
        match &self.slot {
            CartSlot::Holding(product) => Some(product),
            CartSlot::Empty => None,
        }
    }

    #[must_use]
    pub const fn slot(&self) -> &CartSlot {
        &self.slot
    }

    /// Returns `true` if the product with this id is in the cart.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.item().is_some_and(|p| p.id() == id)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self.slot, CartSlot::Empty)
    }

    #[must_use]
    pub const fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    /// Price of the item, or zero.
    #[must_use]
    pub fn total(&self) -> Price {
        self.item().map_or(Price::ZERO, ResolvedProduct::price)
    }

    /// Checkout summary, or `None` if there is nothing to check out.
    #[must_use]
    pub fn summary(&self) -> Option<OrderSummary> {
        self.item().map(OrderSummary::for_item)
    }
}

/// Line items shown on the checkout page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub item: ResolvedProduct,
    pub subtotal: Price,
    pub delivery_fee: Price,
    pub total: Price,
}

impl OrderSummary {
    /// Flat delivery fee, R$ 5.00.
    pub const DELIVERY_FEE: Price = Price::from_cents(500);

    fn for_item(item: &ResolvedProduct) -> Self {
        let subtotal = item.price();
        Self {
            item: item.clone(),
            subtotal,
            delivery_fee: Self::DELIVERY_FEE,
            total: subtotal.saturating_add(Self::DELIVERY_FEE),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::overlay::resolve;

    fn product(id: i32) -> ResolvedProduct {
        let catalog = Catalog::baseline();
        resolve(catalog.product(ProductId::new(id)).unwrap(), None)
    }

    #[test]
    fn test_add_replaces() {
        let mut cart = Cart::new();
        cart.add(product(1));
        cart.add(product(2));
        assert_eq!(cart.item().unwrap().id(), ProductId::new(2));
        assert!(!cart.contains(ProductId::new(1)));
    }

    #[test]
    fn test_remove_on_empty_is_noop() {
        let mut cart = Cart::new();
        assert!(cart.remove().is_none());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_returns_item() {
        let mut cart = Cart::new();
        cart.add(product(7));
        assert_eq!(cart.remove().unwrap().id(), ProductId::new(7));
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Price::ZERO);
    }

    #[test]
    fn test_toggle_panel_independent_of_contents() {
        let mut cart = Cart::new();
        cart.toggle_panel();
        assert!(cart.is_panel_open());
        assert!(cart.is_empty());

        cart.add(product(3));
        cart.toggle_panel();
        assert!(!cart.is_panel_open());
        assert!(!cart.is_empty());
    }

    #[test]
    fn test_toggle_item() {
        let mut cart = Cart::new();
        assert!(cart.toggle_item(product(4)));
        assert!(cart.toggle_item(product(5)));
        assert!(cart.contains(ProductId::new(5)));
        assert!(!cart.toggle_item(product(5)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_panel_shows_only_latest_item() {
        let mut cart = Cart::new();
        cart.add(product(3));
        cart.toggle_panel();
        cart.add(product(5));

        assert!(cart.is_panel_open());
        assert_eq!(cart.item().unwrap().name(), "Macarrão Carbonara");
        assert_eq!(cart.total().to_string(), "R$ 27.99");
    }

    #[test]
    fn test_summary_adds_delivery_fee() {
        let mut cart = Cart::new();
        assert!(cart.summary().is_none());

        cart.add(product(3));
        let summary = cart.summary().unwrap();
        assert_eq!(summary.subtotal.to_string(), "R$ 24.99");
        assert_eq!(summary.delivery_fee.to_string(), "R$ 5.00");
        assert_eq!(summary.total.to_string(), "R$ 29.99");
    }

    #[test]
    fn test_session_round_trip() {
        let mut cart = Cart::new();
        cart.add(product(13));
        cart.toggle_panel();

        let json = serde_json::to_string(&cart).unwrap();
        let back: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cart);
    }
}
