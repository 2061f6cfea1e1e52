//! Core types for FoodDelivery.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod color;
pub mod discount;
pub mod email;
pub mod id;
pub mod price;
pub mod rating;

pub use color::{ColorError, HexColor};
pub use discount::{Discount, DiscountError};
pub use email::{Email, EmailError};
pub use id::*;
pub use price::{Price, PriceError};
pub use rating::{Rating, RatingError};
