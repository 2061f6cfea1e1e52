//! Per-product checkout and image overrides.
//!
//! The overlay never mutates the catalog. [`resolve`] combines a baseline
//! [`Product`] with its overlay entry at read time, producing a
//! [`ResolvedProduct`] whose checkout URL is never empty.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::catalog::{Catalog, Product};
use crate::types::{Price, ProductId};

/// Overrides for one product. Blank values mean "fall back".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayEntry {
    #[serde(default)]
    pub checkout_url: String,
    #[serde(default)]
    pub image_url: String,
}

impl OverlayEntry {
    /// Build an entry, trimming both values.
    #[must_use]
    pub fn new(checkout_url: &str, image_url: &str) -> Self {
        Self {
            checkout_url: checkout_url.trim().to_string(),
            image_url: image_url.trim().to_string(),
        }
    }

    /// The checkout override, if it is not blank.
    #[must_use]
    pub fn checkout_url(&self) -> Option<&str> {
        non_blank(&self.checkout_url)
    }

    /// The image override, if it is not blank.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        non_blank(&self.image_url)
    }

    /// Returns `true` if neither value overrides anything.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.checkout_url().is_none() && self.image_url().is_none()
    }
}

/// Overlay entries keyed by product id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverlay {
    entries: BTreeMap<ProductId, OverlayEntry>,
}

impl SettingsOverlay {
    /// An empty overlay.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an overlay from the legacy checkout-only shape.
    pub fn from_legacy<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (ProductId, S)>,
        S: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .map(|(id, url)| (id, OverlayEntry::new(url.as_ref(), "")))
            .collect();
        Self { entries }
    }

    /// An overlay pre-filled with every product's own links.
    ///
    /// This is what the admin tabs show before anything was ever saved.
    #[must_use]
    pub fn seeded_from(catalog: &Catalog) -> Self {
        let entries = catalog
            .products()
            .iter()
            .map(|p| (p.id, OverlayEntry::new(&p.checkout_url, &p.image_url)))
            .collect();
        Self { entries }
    }

    /// The entry for a product, if any.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&OverlayEntry> {
        self.entries.get(&id)
    }

    /// Replace the entry for a product.
    pub fn set(&mut self, id: ProductId, entry: OverlayEntry) {
        self.entries.insert(id, entry);
    }

    /// Set only the checkout override, keeping any image override.
    pub fn set_checkout_url(&mut self, id: ProductId, url: &str) {
        self.entries.entry(id).or_default().checkout_url = url.trim().to_string();
    }

    /// Set only the image override, keeping any checkout override.
    pub fn set_image_url(&mut self, id: ProductId, url: &str) {
        self.entries.entry(id).or_default().image_url = url.trim().to_string();
    }

    /// Remove a product's entry.
    pub fn remove(&mut self, id: ProductId) -> Option<OverlayEntry> {
        self.entries.remove(&id)
    }

    /// Drop entries for ids the catalog does not know, returning them.
    pub fn retain_known(&mut self, catalog: &Catalog) -> Vec<ProductId> {
        let unknown: Vec<ProductId> = self
            .entries
            .keys()
            .copied()
            .filter(|id| !catalog.contains(*id))
            .collect();
        for id in &unknown {
            self.entries.remove(id);
        }
        unknown
    }

    /// Iterate entries in id order.
    pub fn iter(&self) -> impl Iterator<Item = (ProductId, &OverlayEntry)> {
        self.entries.iter().map(|(id, entry)| (*id, entry))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(ProductId, OverlayEntry)> for SettingsOverlay {
    fn from_iter<T: IntoIterator<Item = (ProductId, OverlayEntry)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Where a resolved checkout URL leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutTarget {
    /// An absolute http(s) URL on another site.
    External(Url),
    /// A path on this site.
    Internal(String),
}

impl CheckoutTarget {
    /// Classify a checkout URL. Returns `None` for anything that is neither
    /// an absolute http(s) URL nor a site path.
    #[must_use]
    pub fn classify(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.starts_with('/') && !value.starts_with("//") {
            return Some(Self::Internal(value.to_string()));
        }
        let url = Url::parse(value).ok()?;
        matches!(url.scheme(), "http" | "https").then_some(Self::External(url))
    }

    /// The location to redirect to.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::External(url) => url.as_str(),
            Self::Internal(path) => path,
        }
    }

    /// Returns `true` for links that leave the site.
    #[must_use]
    pub const fn is_external(&self) -> bool {
        matches!(self, Self::External(_))
    }
}

/// A product with its effective checkout and image URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedProduct {
    pub product: Product,
    pub checkout_url: String,
    /// Empty when neither the overlay nor the catalog has an image.
    pub image_url: String,
}

impl ResolvedProduct {
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.product.name
    }

    #[must_use]
    pub const fn price(&self) -> Price {
        self.product.price
    }

    /// Classified checkout destination.
    #[must_use]
    pub fn checkout_target(&self) -> CheckoutTarget {
        CheckoutTarget::classify(&self.checkout_url)
            .unwrap_or_else(|| CheckoutTarget::Internal(fallback_checkout_path(self.id())))
    }

    /// The image to render: the resolved URL, or a generated placeholder.
    #[must_use]
    pub fn display_image(&self) -> String {
        if self.image_url.is_empty() {
            placeholder_image(&self.product.name, self.product.color_or_default())
        } else {
            self.image_url.clone()
        }
    }
}

impl AsRef<Product> for ResolvedProduct {
    fn as_ref(&self) -> &Product {
        &self.product
    }
}

/// The on-site checkout page for a product.
#[must_use]
pub fn fallback_checkout_path(id: ProductId) -> String {
    format!("/product/{id}/checkout")
}

/// Combine a product with its overlay entry.
///
/// Checkout URL: overlay, then catalog, then [`fallback_checkout_path`].
/// Image URL: overlay, then catalog (possibly empty).
#[must_use]
pub fn resolve(product: &Product, overlay: Option<&SettingsOverlay>) -> ResolvedProduct {
    let entry = overlay.and_then(|o| o.get(product.id));

    let checkout_url = entry
        .and_then(OverlayEntry::checkout_url)
        .or_else(|| non_blank(&product.checkout_url))
        .map_or_else(|| fallback_checkout_path(product.id), ToString::to_string);

    let image_url = entry
        .and_then(OverlayEntry::image_url)
        .or_else(|| non_blank(&product.image_url))
        .unwrap_or_default()
        .to_string();

    ResolvedProduct {
        product: product.clone(),
        checkout_url,
        image_url,
    }
}

/// Resolve every product in the catalog, preserving order.
#[must_use]
pub fn resolve_all(catalog: &Catalog, overlay: Option<&SettingsOverlay>) -> Vec<ResolvedProduct> {
    catalog
        .products()
        .iter()
        .map(|p| resolve(p, overlay))
        .collect()
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn placeholder_image(name: &str, color: &str) -> String {
    let svg = format!(
        "<svg xmlns='http://www.w3.org/2000/svg' width='100%' height='100%' viewBox='0 0 80 80'>\
         <rect fill='#{color}' width='80' height='80'/>\
         <text fill='#555' font-family='sans-serif' font-size='10' x='50%' y='50%' \
         dominant-baseline='middle' text-anchor='middle'>{}</text></svg>",
        escape_xml(name)
    );
    format!("data:image/svg+xml,{}", urlencoding::encode(&svg))
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::types::{CategoryId, Discount, HexColor};

    fn bare(id: i32, checkout: &str, image: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: "Esfiha & Cia".to_string(),
            description: "Aberta".to_string(),
            price: Price::from_cents(900),
            original_price: None,
            discount: Discount::NONE,
            rating: None,
            category_id: CategoryId::new(7),
            is_featured: false,
            color: None,
            checkout_url: checkout.to_string(),
            image_url: image.to_string(),
        }
    }

    #[test]
    fn test_overlay_checkout_wins() {
        let product = bare(1, "/product/1/checkout", "/images/a.jpg");
        let mut overlay = SettingsOverlay::new();
        overlay.set_checkout_url(ProductId::new(1), "https://pay.example/1");

        let resolved = resolve(&product, Some(&overlay));
        assert_eq!(resolved.checkout_url, "https://pay.example/1");
        assert_eq!(resolved.image_url, "/images/a.jpg");
    }

    #[test]
    fn test_no_overlay_uses_catalog_value() {
        let product = bare(2, "https://loja.example/2", "");
        assert_eq!(resolve(&product, None).checkout_url, "https://loja.example/2");
    }

    #[test]
    fn test_falls_back_to_product_page() {
        let product = bare(42, "", "");
        let resolved = resolve(&product, Some(&SettingsOverlay::new()));
        assert_eq!(resolved.checkout_url, "/product/42/checkout");
        assert_eq!(resolved.image_url, "");
    }

    #[test]
    fn test_blank_overlay_values_fall_back() {
        let product = bare(3, "/product/3/checkout", "/images/c.jpg");
        let mut overlay = SettingsOverlay::new();
        overlay.set(ProductId::new(3), OverlayEntry::new("   ", ""));

        let resolved = resolve(&product, Some(&overlay));
        assert_eq!(resolved.checkout_url, "/product/3/checkout");
        assert_eq!(resolved.image_url, "/images/c.jpg");
    }

    #[test]
    fn test_image_override() {
        let product = bare(4, "", "");
        let mut overlay = SettingsOverlay::new();
        overlay.set_image_url(ProductId::new(4), " https://cdn.example/4.png ");
        overlay.set_checkout_url(ProductId::new(4), "/promo");

        let resolved = resolve(&product, Some(&overlay));
        assert_eq!(resolved.image_url, "https://cdn.example/4.png");
        assert_eq!(resolved.checkout_url, "/promo");
    }

    #[test]
    fn test_resolve_all_baseline() {
        let resolved = resolve_all(Catalog::baseline(), None);
        assert_eq!(resolved.len(), 16);
        assert!(resolved.iter().all(|r| !r.checkout_url.is_empty()));
        assert!(resolved[0].checkout_target().is_external());
        assert_eq!(resolved[1].checkout_url, "/product/2/checkout");
    }

    #[test]
    fn test_retain_known_drops_unknown_ids() {
        let mut overlay = SettingsOverlay::new();
        overlay.set_checkout_url(ProductId::new(1), "/a");
        overlay.set_checkout_url(ProductId::new(99), "/b");

        let dropped = overlay.retain_known(Catalog::baseline());
        assert_eq!(dropped, vec![ProductId::new(99)]);
        assert_eq!(overlay.len(), 1);
    }

    #[test]
    fn test_from_legacy() {
        let overlay = SettingsOverlay::from_legacy([(ProductId::new(2), "https://pay.example/2")]);
        let entry = overlay.get(ProductId::new(2)).unwrap();
        assert_eq!(entry.checkout_url(), Some("https://pay.example/2"));
        assert_eq!(entry.image_url(), None);
    }

    #[test]
    fn test_seeded_from_copies_catalog_links() {
        let overlay = SettingsOverlay::seeded_from(Catalog::baseline());
        assert_eq!(overlay.len(), 16);
        assert_eq!(
            overlay.get(ProductId::new(3)).unwrap().image_url,
            "/images/hamburguer-classico.jpg"
        );
    }

    #[test]
    fn test_checkout_target_classify() {
        assert!(matches!(
            CheckoutTarget::classify("https://pay.example/1"),
            Some(CheckoutTarget::External(_))
        ));
        assert_eq!(
            CheckoutTarget::classify("/product/1/checkout"),
            Some(CheckoutTarget::Internal("/product/1/checkout".to_string()))
        );
        assert_eq!(CheckoutTarget::classify("javascript:alert(1)"), None);
        assert_eq!(CheckoutTarget::classify("//evil.example"), None);
        assert_eq!(CheckoutTarget::classify("pagamento"), None);
    }

    #[test]
    fn test_unusable_checkout_url_redirects_on_site() {
        let mut resolved = resolve(&bare(5, "", ""), None);
        resolved.checkout_url = "ftp://files.example".to_string();
        assert_eq!(resolved.checkout_target().as_str(), "/product/5/checkout");
    }

    #[test]
    fn test_placeholder_image() {
        let mut product = bare(6, "", "");
        product.color = Some(HexColor::parse("c2185b").unwrap());
        let image = resolve(&product, None).display_image();

        assert!(image.starts_with("data:image/svg+xml,"));
        assert!(image.contains("%23C2185B"));
        assert!(image.contains("Esfiha%20%26amp%3B%20Cia"));
    }

    #[test]
    fn test_placeholder_default_color() {
        let image = resolve(&bare(7, "", ""), None).display_image();
        assert!(image.contains("%23F5F5F5"));
    }
}
