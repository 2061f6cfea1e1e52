//! Storefront models: session keys and checkout form handling.

pub mod checkout;
pub mod session;

pub use checkout::{CheckoutForm, DeliveryDetails, PaymentMethod};
pub use session::keys as session_keys;
