//! Persisted document shapes.
//!
//! Documents are decoded into these records first and converted into
//! domain types afterwards, so a malformed document never reaches the
//! resolver.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::overlay::{OverlayEntry, SettingsOverlay};
use crate::types::ProductId;

/// Reasons a decoded document is rejected as a whole.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("product id must be positive, got {0}")]
    InvalidId(i32),

    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),
}

// =============================================================================
// Records
// =============================================================================

/// One element of the `productSettings` array.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayRecord {
    pub id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub checkout_url: String,
    #[serde(default)]
    pub image_url: String,
}

/// One element of the legacy `productCheckoutUrls` array.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyCheckoutRecord {
    pub id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub checkout_url: String,
}

fn checked_id(id: i32) -> Result<ProductId, SchemaError> {
    let id = ProductId::new(id);
    if id.is_valid() { Ok(id) } else { Err(SchemaError::InvalidId(id.as_i32())) }
}

/// Every document lists a product at most once.
fn unique_id(id: i32, seen: &mut HashSet<ProductId>) -> Result<ProductId, SchemaError> {
    let id = checked_id(id)?;
    if seen.insert(id) { Ok(id) } else { Err(SchemaError::DuplicateId(id)) }
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode a `productSettings` document.
///
/// # Errors
///
/// Returns [`SchemaError`] if the JSON does not match the record shape or
/// an id is not positive or repeated.
pub fn decode_overlay(json: &str) -> Result<SettingsOverlay, SchemaError> {
    let records: Vec<OverlayRecord> = serde_json::from_str(json)?;
    let mut seen = HashSet::new();
    records
        .into_iter()
        .map(|r| {
            let id = unique_id(r.id, &mut seen)?;
            Ok((id, OverlayEntry::new(&r.checkout_url, &r.image_url)))
        })
        .collect()
}

/// Decode a legacy `productCheckoutUrls` document.
///
/// # Errors
///
/// Returns [`SchemaError`] if the JSON does not match the record shape or
/// an id is not positive or repeated.
pub fn decode_legacy(json: &str) -> Result<SettingsOverlay, SchemaError> {
    let records: Vec<LegacyCheckoutRecord> = serde_json::from_str(json)?;
    let mut seen = HashSet::new();
    let pairs = records
        .into_iter()
        .map(|r| Ok((unique_id(r.id, &mut seen)?, r.checkout_url)))
        .collect::<Result<Vec<_>, SchemaError>>()?;
    Ok(SettingsOverlay::from_legacy(pairs))
}

/// Decode a `customProducts` document.
///
/// Field-level rules (non-negative prices, discount range, rating range,
/// color format) are enforced by the field types themselves.
///
/// # Errors
///
/// Returns [`SchemaError`] on a shape mismatch, a non-positive id, or a
/// repeated id.
pub fn decode_custom_products(json: &str) -> Result<Vec<Product>, SchemaError> {
    let products: Vec<Product> = serde_json::from_str(json)?;
    let mut seen = HashSet::new();
    for product in &products {
        unique_id(product.id.as_i32(), &mut seen)?;
    }
    Ok(products)
}

// =============================================================================
// Encoding
// =============================================================================

/// Build `productSettings` records, naming each entry after its product.
pub fn overlay_records<'a>(
    overlay: &SettingsOverlay,
    name_of: impl Fn(ProductId) -> Option<&'a str>,
) -> Vec<OverlayRecord> {
    overlay
        .iter()
        .map(|(id, entry)| OverlayRecord {
            id: id.as_i32(),
            name: name_of(id).map(ToString::to_string),
            checkout_url: entry.checkout_url.clone(),
            image_url: entry.image_url.clone(),
        })
        .collect()
}

/// Build legacy records from the same overlay.
pub fn legacy_records<'a>(
    overlay: &SettingsOverlay,
    name_of: impl Fn(ProductId) -> Option<&'a str>,
) -> Vec<LegacyCheckoutRecord> {
    overlay
        .iter()
        .map(|(id, entry)| LegacyCheckoutRecord {
            id: id.as_i32(),
            name: name_of(id).map(ToString::to_string),
            checkout_url: entry.checkout_url.clone(),
        })
        .collect()
}
