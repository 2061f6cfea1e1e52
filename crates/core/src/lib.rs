//! FoodDelivery Core - catalog, overlay, cart and settings storage.
//!
//! This crate is shared by every FoodDelivery component:
//! - `storefront` - Public catalog, cart and checkout pages
//! - `admin` - Product settings editor
//! - `cli` - Operator tools for inspecting and clearing persisted settings
//!
//! # Architecture
//!
//! Everything except [`settings`] is pure: the static catalog, the overlay
//! resolver and the single-slot cart never touch I/O. [`settings`] owns the
//! key-value store boundary and validates every persisted document before it
//! reaches the rest of the system.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, colors, discounts, ratings and emails
//! - [`catalog`] - Static products and categories, plus catalog queries
//! - [`overlay`] - Per-product checkout/image overrides and the resolver
//! - [`cart`] - Single-slot cart state machine and order summary
//! - [`settings`] - Persisted overlay and custom products

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod overlay;
pub mod settings;
pub mod types;

pub use cart::{Cart, CartSlot, OrderSummary};
pub use catalog::{Catalog, Category, CategoryIcon, Product, ProductQuery};
pub use overlay::{CheckoutTarget, OverlayEntry, ResolvedProduct, SettingsOverlay};
pub use settings::{
    FileStore, MemoryStore, OverlayOrigin, ProductSettings, SettingsError, SettingsRepository,
    SettingsStore,
};
pub use types::*;
