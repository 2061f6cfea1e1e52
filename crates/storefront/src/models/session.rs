//! Session-related types.

/// Session keys.
pub mod keys {
    /// Key for the visitor's [`food_delivery_core::Cart`].
    pub const CART: &str = "cart";
}
