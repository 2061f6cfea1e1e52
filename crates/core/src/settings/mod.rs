//! Persisted product settings.
//!
//! Three documents live in the key-value store:
//!
//! | Key | Shape |
//! |-----|-------|
//! | `productSettings` | `[{id, name?, checkoutUrl, imageUrl}]` |
//! | `productCheckoutUrls` | `[{id, name?, checkoutUrl}]` (older shape, still written) |
//! | `customProducts` | `[Product]` |
//!
//! Loading never fails. A missing document means "never saved"; a document
//! that cannot be read or decoded is logged and treated as empty. The older
//! checkout-only document is only consulted when `productSettings` has never
//! been written.

pub mod schema;
pub mod store;

pub use store::{FileStore, MemoryStore, SettingsStore};

use crate::catalog::{Catalog, Product};
use crate::overlay::{self, ResolvedProduct, SettingsOverlay};
use crate::types::ProductId;

/// Storage keys.
pub mod keys {
    /// Current overlay document.
    pub const PRODUCT_SETTINGS: &str = "productSettings";
    /// Checkout-only overlay document from before images could be overridden.
    pub const LEGACY_CHECKOUT_URLS: &str = "productCheckoutUrls";
    /// Products created in the admin.
    pub const CUSTOM_PRODUCTS: &str = "customProducts";

    /// Every key this crate writes.
    pub const ALL: [&str; 3] = [PRODUCT_SETTINGS, LEGACY_CHECKOUT_URLS, CUSTOM_PRODUCTS];
}

/// Errors from the settings store.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("storage I/O failed for {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid storage key {0:?}")]
    InvalidKey(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Where the loaded overlay came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverlayOrigin {
    /// Nothing usable was saved.
    #[default]
    Absent,
    /// The `productSettings` document.
    Current,
    /// The older `productCheckoutUrls` document.
    Legacy,
}

/// Everything the admin has saved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductSettings {
    pub overlay: SettingsOverlay,
    pub custom_products: Vec<Product>,
    pub overlay_origin: OverlayOrigin,
}

impl ProductSettings {
    /// Baseline catalog plus custom products.
    #[must_use]
    pub fn catalog(&self) -> Catalog {
        Catalog::baseline().with_custom(&self.custom_products)
    }

    /// Find a product (baseline first, then custom) and resolve it.
    #[must_use]
    pub fn resolve(&self, id: ProductId) -> Option<ResolvedProduct> {
        Catalog::baseline()
            .product(id)
            .or_else(|| self.custom_product(id))
            .map(|p| overlay::resolve(p, Some(&self.overlay)))
    }

    /// Every product, resolved, baseline first.
    #[must_use]
    pub fn resolved_products(&self) -> Vec<ResolvedProduct> {
        overlay::resolve_all(&self.catalog(), Some(&self.overlay))
    }

    /// A custom product by id.
    #[must_use]
    pub fn custom_product(&self, id: ProductId) -> Option<&Product> {
        self.custom_products.iter().find(|p| p.id == id)
    }

    /// Returns `true` if the id belongs to an admin-created product.
    #[must_use]
    pub fn is_custom(&self, id: ProductId) -> bool {
        !Catalog::baseline().contains(id) && self.custom_product(id).is_some()
    }

    /// The id the next created product receives.
    #[must_use]
    pub fn next_product_id(&self) -> Option<ProductId> {
        self.catalog().next_product_id()
    }

    /// The overlay as the admin tabs should present it.
    ///
    /// Until something has been saved, every product is listed with its own
    /// catalog links.
    #[must_use]
    pub fn editable_overlay(&self) -> SettingsOverlay {
        match self.overlay_origin {
            OverlayOrigin::Absent => SettingsOverlay::seeded_from(&self.catalog()),
            OverlayOrigin::Current | OverlayOrigin::Legacy => self.overlay.clone(),
        }
    }
}

enum Document<T> {
    Missing,
    Unusable,
    Valid(T),
}

impl<T> Document<T> {
    fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        match self {
            Self::Valid(value) => value,
            Self::Missing | Self::Unusable => T::default(),
        }
    }
}

/// Loads and saves [`ProductSettings`] through a [`SettingsStore`].
#[derive(Debug, Clone)]
pub struct SettingsRepository<S> {
    store: S,
}

impl<S: SettingsStore> SettingsRepository<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Load saved settings, defaulting anything missing or malformed.
    #[tracing::instrument(skip(self))]
    pub async fn load(&self) -> ProductSettings {
        let custom_products = self
            .load_document(keys::CUSTOM_PRODUCTS, schema::decode_custom_products)
            .await
            .unwrap_or_default();

        let (mut overlay, overlay_origin) =
            match self.load_document(keys::PRODUCT_SETTINGS, schema::decode_overlay).await {
                Document::Valid(overlay) => (overlay, OverlayOrigin::Current),
                Document::Unusable => (SettingsOverlay::new(), OverlayOrigin::Absent),
                Document::Missing => match self
                    .load_document(keys::LEGACY_CHECKOUT_URLS, schema::decode_legacy)
                    .await
                {
                    Document::Valid(overlay) => (overlay, OverlayOrigin::Legacy),
                    Document::Missing | Document::Unusable => {
                        (SettingsOverlay::new(), OverlayOrigin::Absent)
                    }
                },
            };

        let catalog = Catalog::baseline().with_custom(&custom_products);
        for id in overlay.retain_known(&catalog) {
            tracing::warn!(product_id = %id, "Dropping settings for unknown product");
        }

        ProductSettings {
            overlay,
            custom_products,
            overlay_origin,
        }
    }

    /// Persist the overlay and custom products.
    ///
    /// Writes `productSettings`, the older `productCheckoutUrls` and
    /// `customProducts`, in that order.
    ///
    /// # Errors
    ///
    /// Returns the first write or serialization failure.
    #[tracing::instrument(skip_all, fields(entries = overlay.len(), custom = custom_products.len()))]
    pub async fn save(
        &self,
        overlay: &SettingsOverlay,
        custom_products: &[Product],
    ) -> Result<(), SettingsError> {
        let catalog = Catalog::baseline().with_custom(custom_products);
        let name_of = |id| catalog.product(id).map(|p| p.name.as_str());

        let current = serde_json::to_string(&schema::overlay_records(overlay, name_of))?;
        let legacy = serde_json::to_string(&schema::legacy_records(overlay, name_of))?;
        let custom = serde_json::to_string(custom_products)?;

        self.store.set(keys::PRODUCT_SETTINGS, current).await?;
        self.store.set(keys::LEGACY_CHECKOUT_URLS, legacy).await?;
        self.store.set(keys::CUSTOM_PRODUCTS, custom).await?;

        tracing::info!("Product settings saved");
        Ok(())
    }

    /// Save a whole [`ProductSettings`].
    ///
    /// # Errors
    ///
    /// See [`Self::save`].
    pub async fn save_settings(&self, settings: &ProductSettings) -> Result<(), SettingsError> {
        self.save(&settings.overlay, &settings.custom_products).await
    }

    /// Remove every persisted document.
    ///
    /// # Errors
    ///
    /// Returns the first removal failure.
    #[tracing::instrument(skip(self))]
    pub async fn clear(&self) -> Result<(), SettingsError> {
        for key in keys::ALL {
            self.store.remove(key).await?;
        }
        tracing::info!("Product settings cleared");
        Ok(())
    }

    async fn load_document<T, E: std::fmt::Display>(
        &self,
        key: &str,
        decode: impl FnOnce(&str) -> Result<T, E>,
    ) -> Document<T> {
        let raw = match self.store.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Document::Missing,
            Err(e) => {
                tracing::warn!(key, error = %e, "Could not read settings document, using defaults");
                return Document::Unusable;
            }
        };

        match decode(&raw) {
            Ok(value) => Document::Valid(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "Malformed settings document, using defaults");
                Document::Unusable
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::overlay::OverlayEntry;
    use crate::types::{CategoryId, Discount, HexColor, Price};

    fn repo() -> SettingsRepository<MemoryStore> {
        SettingsRepository::new(MemoryStore::new())
    }

    fn custom(id: i32) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Especial {id}"),
            description: "Receita da casa".to_string(),
            price: Price::from_cents(1500),
            original_price: None,
            discount: Discount::NONE,
            rating: None,
            category_id: CategoryId::new(1),
            is_featured: false,
            color: Some(HexColor::default()),
            checkout_url: String::new(),
            image_url: String::new(),
        }
    }

    #[tokio::test]
    async fn test_load_never_saved() {
        let settings = repo().load().await;
        assert_eq!(settings, ProductSettings::default());
        assert_eq!(settings.next_product_id(), Some(ProductId::new(17)));
        assert_eq!(settings.editable_overlay().len(), 16);
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let repo = repo();
        let mut overlay = SettingsOverlay::new();
        overlay.set_checkout_url(ProductId::new(1), "https://pay.example/1");
        overlay.set(ProductId::new(17), OverlayEntry::new("/especial", ""));

        repo.save(&overlay, &[custom(17)]).await.unwrap();
        let settings = repo.load().await;

        assert_eq!(settings.overlay_origin, OverlayOrigin::Current);
        assert_eq!(settings.overlay, overlay);
        assert_eq!(settings.custom_products, vec![custom(17)]);
        assert_eq!(settings.next_product_id(), Some(ProductId::new(18)));
        assert_eq!(settings.resolve(ProductId::new(17)).unwrap().checkout_url, "/especial");
        assert!(settings.is_custom(ProductId::new(17)));
        assert!(!settings.is_custom(ProductId::new(1)));
    }

    #[tokio::test]
    async fn test_save_writes_legacy_document() {
        let repo = repo();
        let mut overlay = SettingsOverlay::new();
        overlay.set(ProductId::new(2), OverlayEntry::new("/x", "/y.jpg"));
        repo.save(&overlay, &[]).await.unwrap();

        let legacy = repo.store().get(keys::LEGACY_CHECKOUT_URLS).await.unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&legacy).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{"id": 2, "name": "Pizza Pepperoni", "checkoutUrl": "/x"}])
        );
    }

    #[tokio::test]
    async fn test_legacy_used_only_when_current_missing() {
        let repo = repo();
        repo.store()
            .set(keys::LEGACY_CHECKOUT_URLS, r#"[{"id": 4, "checkoutUrl": "/velho"}]"#.to_string())
            .await
            .unwrap();

        let settings = repo.load().await;
        assert_eq!(settings.overlay_origin, OverlayOrigin::Legacy);
        assert_eq!(settings.resolve(ProductId::new(4)).unwrap().checkout_url, "/velho");

        repo.store()
            .set(keys::PRODUCT_SETTINGS, "[]".to_string())
            .await
            .unwrap();
        let settings = repo.load().await;
        assert_eq!(settings.overlay_origin, OverlayOrigin::Current);
        assert_eq!(
            settings.resolve(ProductId::new(4)).unwrap().checkout_url,
            "/product/4/checkout"
        );
    }

    #[tokio::test]
    async fn test_malformed_documents_default() {
        let repo = repo();
        repo.store().set(keys::PRODUCT_SETTINGS, "{oops".to_string()).await.unwrap();
        repo.store().set(keys::CUSTOM_PRODUCTS, r#"[{"id": "x"}]"#.to_string()).await.unwrap();
        repo.store()
            .set(keys::LEGACY_CHECKOUT_URLS, r#"[{"id": 1, "checkoutUrl": "/legado"}]"#.to_string())
            .await
            .unwrap();

        let settings = repo.load().await;
        assert!(settings.overlay.is_empty());
        assert!(settings.custom_products.is_empty());
        assert_eq!(settings.overlay_origin, OverlayOrigin::Absent);
    }

    #[tokio::test]
    async fn test_unknown_overlay_ids_dropped() {
        let repo = repo();
        repo.store()
            .set(
                keys::PRODUCT_SETTINGS,
                r#"[{"id": 1, "checkoutUrl": "/a"}, {"id": 404, "checkoutUrl": "/b"}]"#.to_string(),
            )
            .await
            .unwrap();

        let settings = repo.load().await;
        assert_eq!(settings.overlay.len(), 1);
        assert!(settings.overlay.get(ProductId::new(404)).is_none());
    }

    #[tokio::test]
    async fn test_clear() {
        let repo = repo();
        repo.save(&SettingsOverlay::new(), &[custom(17)]).await.unwrap();
        assert_eq!(repo.store().len().await, 3);

        repo.clear().await.unwrap();
        assert!(repo.store().is_empty().await);
        assert_eq!(repo.load().await, ProductSettings::default());
    }

    #[tokio::test]
    async fn test_resolved_products_include_custom() {
        let settings = ProductSettings {
            custom_products: vec![custom(17)],
            ..ProductSettings::default()
        };
        let resolved = settings.resolved_products();
        assert_eq!(resolved.len(), 17);
        assert_eq!(resolved[16].checkout_url, "/product/17/checkout");
    }
}
