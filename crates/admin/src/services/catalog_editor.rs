//! Product editing for the admin page.
//!
//! A [`CatalogEditor`] is a working copy of the saved overlay and custom
//! products. Every admin action builds one from the loaded settings, applies
//! a single change, and only on success writes it back with
//! [`CatalogEditor::save`]. Nothing is visible to the storefront until then.

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use food_delivery_core::{
    Catalog, CategoryId, ColorError, Discount, DiscountError, HexColor, OverlayEntry, Price,
    PriceError, Product, ProductId, ProductSettings, SettingsError, SettingsOverlay,
    SettingsRepository, SettingsStore,
};

/// Errors from validating or applying an admin edit.
///
/// Messages are shown to the admin as-is.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditorError {
    #[error("Por favor, preencha todos os campos obrigatórios!")]
    MissingRequired,

    #[error("Preço inválido: {0}")]
    InvalidPrice(PriceError),

    #[error("Preço original inválido: {0}")]
    InvalidOriginalPrice(PriceError),

    #[error("Desconto inválido: {0}")]
    InvalidDiscount(String),

    #[error("Categoria inválida: {0}")]
    UnknownCategory(String),

    #[error("Cor inválida: {0}")]
    InvalidColor(ColorError),

    #[error("{field} inválido para o produto {id}: {value:?}")]
    InvalidLink {
        id: ProductId,
        field: LinkField,
        value: String,
    },

    #[error("Produto {0} não encontrado")]
    UnknownProduct(ProductId),

    #[error("O produto {0} não é um produto personalizado")]
    NotCustom(ProductId),

    #[error("Não há mais IDs disponíveis para novos produtos")]
    IdsExhausted,
}

impl From<DiscountError> for EditorError {
    fn from(err: DiscountError) -> Self {
        Self::InvalidDiscount(err.0.to_string())
    }
}

/// The two per-product links an overlay entry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkField {
    Checkout,
    Image,
}

impl LinkField {
    /// Prefix of the tab form's input names (`checkout_url_7`).
    #[must_use]
    pub const fn input_prefix(&self) -> &'static str {
        match self {
            Self::Checkout => "checkout_url_",
            Self::Image => "image_url_",
        }
    }
}

impl std::fmt::Display for LinkField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Checkout => "Link de checkout",
            Self::Image => "URL da imagem",
        })
    }
}

/// Check a link typed into the admin.
///
/// Empty (use the fallback), a site path starting with `/`, or an absolute
/// http(s) URL. Returns the trimmed value, or `None` for anything else.
fn normalize_link(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || (value.starts_with('/') && !value.starts_with("//")) {
        return Some(value.to_string());
    }
    Url::parse(value)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .map(|_| value.to_string())
}

// =============================================================================
// Product Form
// =============================================================================

/// Raw product form as submitted.
///
/// Every field is kept as text so a rejected submission can be shown again
/// exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub original_price: String,
    pub discount: String,
    pub category_id: String,
    pub image_url: String,
    pub checkout_url: String,
    pub color: String,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: String::new(),
            original_price: String::new(),
            discount: "0".to_string(),
            category_id: "1".to_string(),
            image_url: String::new(),
            checkout_url: String::new(),
            color: HexColor::DEFAULT.to_string(),
        }
    }
}

impl ProductForm {
    /// The empty "Adicionar Novo Produto" form.
    #[must_use]
    pub fn blank() -> Self {
        Self::default()
    }

    /// Pre-fill the form for editing `product`.
    ///
    /// Links come from the product's overlay entry when there is one.
    #[must_use]
    pub fn for_product(product: &Product, entry: Option<&OverlayEntry>) -> Self {
        let (checkout_url, image_url) = entry.map_or_else(
            || (product.checkout_url.clone(), product.image_url.clone()),
            |e| (e.checkout_url.clone(), e.image_url.clone()),
        );
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.amount().to_string(),
            original_price: product
                .original_price
                .map(|p| p.amount().to_string())
                .unwrap_or_default(),
            discount: product.discount.percent().to_string(),
            category_id: product.category_id.to_string(),
            image_url,
            checkout_url,
            color: product.color_or_default().to_string(),
        }
    }

    /// Validate the form against `catalog`'s categories.
    ///
    /// # Errors
    ///
    /// Returns the first problem found, checking required fields first.
    pub fn validate(&self, catalog: &Catalog) -> Result<ProductDraft, EditorError> {
        let name = self.name.trim();
        let description = self.description.trim();
        if name.is_empty() || description.is_empty() || self.price.trim().is_empty() {
            return Err(EditorError::MissingRequired);
        }

        let price = Price::parse(&self.price).map_err(EditorError::InvalidPrice)?;
        let original_price = match self.original_price.trim() {
            "" => None,
            raw => Some(Price::parse(raw).map_err(EditorError::InvalidOriginalPrice)?),
        }
        .filter(|p| !p.is_zero());

        let discount = match self.discount.trim() {
            "" => Discount::NONE,
            raw => {
                let percent = raw
                    .parse::<i64>()
                    .map_err(|_| EditorError::InvalidDiscount(raw.to_string()))?;
                Discount::new(percent)?
            }
        };

        let category_id = match self.category_id.trim() {
            "" => CategoryId::new(1),
            raw => raw
                .parse::<CategoryId>()
                .map_err(|_| EditorError::UnknownCategory(raw.to_string()))?,
        };
        if catalog.category(category_id).is_none() {
            return Err(EditorError::UnknownCategory(category_id.to_string()));
        }

        let color = match self.color.trim() {
            "" => HexColor::default(),
            raw => HexColor::parse(raw).map_err(EditorError::InvalidColor)?,
        };

        Ok(ProductDraft {
            name: name.to_string(),
            description: description.to_string(),
            price,
            original_price,
            discount,
            category_id,
            image_url: self.image_url.trim().to_string(),
            checkout_url: self.checkout_url.trim().to_string(),
            color,
        })
    }
}

/// A validated product form.
///
/// Links are checked when the draft is applied, since the error needs the
/// product id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub original_price: Option<Price>,
    pub discount: Discount,
    pub category_id: CategoryId,
    pub image_url: String,
    pub checkout_url: String,
    pub color: HexColor,
}

impl ProductDraft {
    fn checked_links(&self, id: ProductId) -> Result<OverlayEntry, EditorError> {
        let checkout = normalize_link(&self.checkout_url).ok_or_else(|| EditorError::InvalidLink {
            id,
            field: LinkField::Checkout,
            value: self.checkout_url.clone(),
        })?;
        let image = normalize_link(&self.image_url).ok_or_else(|| EditorError::InvalidLink {
            id,
            field: LinkField::Image,
            value: self.image_url.clone(),
        })?;
        Ok(OverlayEntry::new(&checkout, &image))
    }

    fn into_product(self, id: ProductId, links: &OverlayEntry) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            original_price: self.original_price,
            discount: self.discount,
            rating: None,
            category_id: self.category_id,
            is_featured: false,
            color: Some(self.color),
            checkout_url: links.checkout_url.clone(),
            image_url: links.image_url.clone(),
        }
    }
}

// =============================================================================
// Catalog Editor
// =============================================================================

/// Working copy of everything the admin can change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEditor {
    overlay: SettingsOverlay,
    custom_products: Vec<Product>,
}

impl CatalogEditor {
    /// Start from the loaded settings.
    ///
    /// When nothing was saved yet, the overlay starts out filled with each
    /// product's own links, which is what the tabs display.
    #[must_use]
    pub fn new(settings: &ProductSettings) -> Self {
        Self {
            overlay: settings.editable_overlay(),
            custom_products: settings.custom_products.clone(),
        }
    }

    /// Baseline plus custom products, as edited so far.
    #[must_use]
    pub fn catalog(&self) -> Catalog {
        Catalog::baseline().with_custom(&self.custom_products)
    }

    #[must_use]
    pub const fn overlay(&self) -> &SettingsOverlay {
        &self.overlay
    }

    #[must_use]
    pub fn custom_products(&self) -> &[Product] {
        &self.custom_products
    }

    /// The current link of one kind for a product, blank if unset.
    #[must_use]
    pub fn link(&self, id: ProductId, field: LinkField) -> &str {
        self.overlay.get(id).map_or("", |entry| match field {
            LinkField::Checkout => entry.checkout_url.as_str(),
            LinkField::Image => entry.image_url.as_str(),
        })
    }

    fn is_custom(&self, id: ProductId) -> bool {
        !Catalog::baseline().contains(id) && self.custom_products.iter().any(|p| p.id == id)
    }

    /// Add a new custom product with the next free id.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidLink`] if either link is malformed, or
    /// [`EditorError::IdsExhausted`] once the highest id is `i32::MAX`.
    pub fn create(&mut self, draft: ProductDraft) -> Result<ProductId, EditorError> {
        let id = self
            .catalog()
            .next_product_id()
            .ok_or(EditorError::IdsExhausted)?;
        let links = draft.checked_links(id)?;

        self.custom_products.push(draft.into_product(id, &links));
        self.overlay.set(id, links);

        tracing::info!(product_id = %id, "Custom product created");
        Ok(id)
    }

    /// Apply the form to an existing product.
    ///
    /// Custom products take every field; baseline products only take the two
    /// links, since the catalog itself is read-only. Blank links are saved
    /// blank.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::UnknownProduct`] for an id the catalog does not
    /// have, or [`EditorError::InvalidLink`] for a malformed link.
    pub fn update(&mut self, id: ProductId, draft: ProductDraft) -> Result<(), EditorError> {
        if !self.catalog().contains(id) {
            return Err(EditorError::UnknownProduct(id));
        }
        let links = draft.checked_links(id)?;

        if self.is_custom(id) {
            let updated = draft.into_product(id, &links);
            if let Some(slot) = self.custom_products.iter_mut().find(|p| p.id == id) {
                *slot = updated;
            }
        }
        self.overlay.set(id, links);

        tracing::info!(product_id = %id, "Product updated");
        Ok(())
    }

    /// Remove a custom product and its overlay entry.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NotCustom`] for baseline ids and
    /// [`EditorError::UnknownProduct`] for ids that do not exist.
    pub fn delete(&mut self, id: ProductId) -> Result<Product, EditorError> {
        if Catalog::baseline().contains(id) {
            return Err(EditorError::NotCustom(id));
        }
        let position = self
            .custom_products
            .iter()
            .position(|p| p.id == id)
            .ok_or(EditorError::UnknownProduct(id))?;

        let removed = self.custom_products.remove(position);
        self.overlay.remove(id);

        tracing::info!(product_id = %id, "Custom product deleted");
        Ok(removed)
    }

    /// Apply one column of the checkout or image tab.
    ///
    /// Every submitted value is written to the working copy, so a rejected
    /// submission can be shown again as typed. Ids the catalog does not know
    /// are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidLink`] for the first malformed value.
    pub fn set_links<I>(&mut self, field: LinkField, links: I) -> Result<(), EditorError>
    where
        I: IntoIterator<Item = (ProductId, String)>,
    {
        let catalog = self.catalog();
        let mut first_error = None;

        for (id, value) in links {
            if !catalog.contains(id) {
                tracing::warn!(product_id = %id, "Ignoring link for unknown product");
                continue;
            }
            let normalized = normalize_link(&value);
            if normalized.is_none() && first_error.is_none() {
                first_error = Some(EditorError::InvalidLink {
                    id,
                    field,
                    value: value.clone(),
                });
            }
            let value = normalized.unwrap_or(value);
            match field {
                LinkField::Checkout => self.overlay.set_checkout_url(id, &value),
                LinkField::Image => self.overlay.set_image_url(id, &value),
            }
        }

        first_error.map_or(Ok(()), Err)
    }

    /// Write the working copy to the store.
    ///
    /// # Errors
    ///
    /// Returns the store's error if any document could not be written.
    pub async fn save<S: SettingsStore>(
        &self,
        repository: &SettingsRepository<S>,
    ) -> Result<(), SettingsError> {
        repository.save(&self.overlay, &self.custom_products).await
    }
}

/// Pull `(id, value)` pairs for one link column out of a tab form.
///
/// Input names look like `checkout_url_7`; other fields are skipped.
#[must_use]
pub fn link_fields(field: LinkField, form: &[(String, String)]) -> Vec<(ProductId, String)> {
    form.iter()
        .filter_map(|(name, value)| {
            let id = name
                .strip_prefix(field.input_prefix())?
                .parse::<ProductId>()
                .ok()
                .filter(ProductId::is_valid)?;
            Some((id, value.clone()))
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use food_delivery_core::{MemoryStore, OverlayOrigin};

    use super::*;

    fn form(name: &str, description: &str, price: &str) -> ProductForm {
        ProductForm {
            name: name.to_string(),
            description: description.to_string(),
            price: price.to_string(),
            ..ProductForm::blank()
        }
    }

    fn fresh_editor() -> CatalogEditor {
        CatalogEditor::new(&ProductSettings::default())
    }

    #[test]
    fn test_blank_form_defaults() {
        let blank = ProductForm::blank();
        assert_eq!(blank.category_id, "1");
        assert_eq!(blank.color, "F5F5F5");
        assert_eq!(blank.discount, "0");
    }

    #[test]
    fn test_required_fields() {
        let catalog = Catalog::baseline();
        assert_eq!(
            form("", "Molho e queijo", "29.90").validate(catalog),
            Err(EditorError::MissingRequired)
        );
        assert_eq!(
            form("Pizza Margherita", "  ", "29.90").validate(catalog),
            Err(EditorError::MissingRequired)
        );
        assert_eq!(
            form("Pizza Margherita", "Molho e queijo", "").validate(catalog),
            Err(EditorError::MissingRequired)
        );
    }

    #[test]
    fn test_validate_optional_fields() {
        let draft = form("Pizza Margherita", "Molho e queijo", "29,90")
            .validate(Catalog::baseline())
            .unwrap();
        assert_eq!(draft.price, Price::from_cents(2990));
        assert_eq!(draft.original_price, None);
        assert_eq!(draft.discount, Discount::NONE);
        assert_eq!(draft.category_id, CategoryId::new(1));
        assert_eq!(draft.color.as_str(), "F5F5F5");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let catalog = Catalog::baseline();

        let mut bad = form("Pizza", "Boa", "abc");
        assert!(matches!(bad.validate(catalog), Err(EditorError::InvalidPrice(_))));

        bad = form("Pizza", "Boa", "10");
        bad.discount = "120".to_string();
        assert_eq!(
            bad.validate(catalog),
            Err(EditorError::InvalidDiscount("120".to_string()))
        );

        bad = form("Pizza", "Boa", "10");
        bad.category_id = "99".to_string();
        assert_eq!(
            bad.validate(catalog),
            Err(EditorError::UnknownCategory("99".to_string()))
        );

        bad = form("Pizza", "Boa", "10");
        bad.color = "red".to_string();
        assert!(matches!(bad.validate(catalog), Err(EditorError::InvalidColor(_))));
    }

    #[test]
    fn test_normalize_link() {
        assert_eq!(normalize_link("  "), Some(String::new()));
        assert_eq!(
            normalize_link(" /product/3/checkout "),
            Some("/product/3/checkout".to_string())
        );
        assert_eq!(
            normalize_link("https://pay.example/1"),
            Some("https://pay.example/1".to_string())
        );
        assert_eq!(normalize_link("//evil.example"), None);
        assert_eq!(normalize_link("javascript:alert(1)"), None);
        assert_eq!(normalize_link("pay.example/1"), None);
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let mut editor = fresh_editor();
        let draft = form("Pizza Margherita", "Molho e queijo", "29.90")
            .validate(Catalog::baseline())
            .unwrap();

        assert_eq!(editor.create(draft.clone()).unwrap(), ProductId::new(17));
        assert_eq!(editor.create(draft).unwrap(), ProductId::new(18));
        assert_eq!(editor.custom_products().len(), 2);
        assert!(!editor.custom_products()[0].is_featured);
    }

    #[test]
    fn test_create_refuses_when_ids_exhausted() {
        let last = form("Última Pizza", "Borda recheada", "30")
            .validate(Catalog::baseline())
            .unwrap()
            .into_product(ProductId::new(i32::MAX), &OverlayEntry::default());
        let settings = ProductSettings {
            custom_products: vec![last],
            ..ProductSettings::default()
        };
        let mut editor = CatalogEditor::new(&settings);
        let draft = form("Pizza Margherita", "Molho e queijo", "29.90")
            .validate(Catalog::baseline())
            .unwrap();

        assert_eq!(editor.create(draft), Err(EditorError::IdsExhausted));
        assert_eq!(editor.custom_products().len(), 1);
        assert_eq!(editor.custom_products()[0].id, ProductId::new(i32::MAX));
    }

    #[test]
    fn test_create_keeps_seeded_links() {
        let mut editor = fresh_editor();
        let mut input = form("Suco Verde", "Couve e limão", "12");
        input.checkout_url = "https://pay.example/verde".to_string();
        let draft = input.validate(Catalog::baseline()).unwrap();

        let id = editor.create(draft).unwrap();

        assert_eq!(editor.link(id, LinkField::Checkout), "https://pay.example/verde");
        // the tabs were never saved, so baseline rows keep their own links
        assert_eq!(editor.link(ProductId::new(2), LinkField::Checkout), "/product/2/checkout");
    }

    #[test]
    fn test_create_rejects_bad_link() {
        let mut editor = fresh_editor();
        let mut input = form("Suco Verde", "Couve e limão", "12");
        input.image_url = "ftp://files.example/suco.jpg".to_string();
        let draft = input.validate(Catalog::baseline()).unwrap();

        let err = editor.create(draft).unwrap_err();
        assert!(matches!(err, EditorError::InvalidLink { field: LinkField::Image, .. }));
        assert!(editor.custom_products().is_empty());
    }

    #[test]
    fn test_update_custom_product_clears_blank_links() {
        let mut editor = fresh_editor();
        let mut input = form("Suco Verde", "Couve e limão", "12");
        input.image_url = "https://img.example/suco.jpg".to_string();
        let id = editor
            .create(input.validate(Catalog::baseline()).unwrap())
            .unwrap();

        let mut edit = form("Suco Verde Detox", "Couve, limão e gengibre", "13.50");
        edit.category_id = "7".to_string();
        editor
            .update(id, edit.validate(Catalog::baseline()).unwrap())
            .unwrap();

        let product = &editor.custom_products()[0];
        assert_eq!(product.name, "Suco Verde Detox");
        assert_eq!(product.price, Price::from_cents(1350));
        assert_eq!(product.category_id, CategoryId::new(7));
        assert_eq!(product.image_url, "");
        assert_eq!(editor.link(id, LinkField::Image), "");
    }

    #[test]
    fn test_update_baseline_only_changes_links() {
        let mut editor = fresh_editor();
        let mut edit = form("Outro nome", "Outra descrição", "1");
        edit.checkout_url = "https://pay.example/3".to_string();

        editor
            .update(ProductId::new(3), edit.validate(Catalog::baseline()).unwrap())
            .unwrap();

        assert!(editor.custom_products().is_empty());
        assert_eq!(
            editor.link(ProductId::new(3), LinkField::Checkout),
            "https://pay.example/3"
        );
        assert_eq!(
            editor.catalog().product(ProductId::new(3)).unwrap().name,
            Catalog::baseline().product(ProductId::new(3)).unwrap().name
        );
    }

    #[test]
    fn test_update_unknown_product() {
        let mut editor = fresh_editor();
        let draft = form("Pizza", "Boa", "10").validate(Catalog::baseline()).unwrap();
        assert_eq!(
            editor.update(ProductId::new(99), draft),
            Err(EditorError::UnknownProduct(ProductId::new(99)))
        );
    }

    #[test]
    fn test_delete() {
        let mut editor = fresh_editor();
        let draft = form("Pizza", "Boa", "10").validate(Catalog::baseline()).unwrap();
        let id = editor.create(draft).unwrap();

        assert_eq!(
            editor.delete(ProductId::new(1)),
            Err(EditorError::NotCustom(ProductId::new(1)))
        );
        assert_eq!(
            editor.delete(ProductId::new(40)),
            Err(EditorError::UnknownProduct(ProductId::new(40)))
        );

        let removed = editor.delete(id).unwrap();
        assert_eq!(removed.id, id);
        assert!(editor.custom_products().is_empty());
        assert!(editor.overlay().get(id).is_none());
    }

    #[test]
    fn test_set_links_keeps_rejected_values() {
        let mut editor = fresh_editor();
        let result = editor.set_links(
            LinkField::Checkout,
            vec![
                (ProductId::new(1), "https://pay.example/1".to_string()),
                (ProductId::new(2), "not a url".to_string()),
                (ProductId::new(77), "/ignored".to_string()),
            ],
        );

        assert!(matches!(
            result,
            Err(EditorError::InvalidLink { id, .. }) if id == ProductId::new(2)
        ));
        assert_eq!(editor.link(ProductId::new(1), LinkField::Checkout), "https://pay.example/1");
        assert_eq!(editor.link(ProductId::new(2), LinkField::Checkout), "not a url");
        assert!(editor.overlay().get(ProductId::new(77)).is_none());
    }

    #[test]
    fn test_link_fields() {
        let form = vec![
            ("checkout_url_1".to_string(), "https://pay.example/1".to_string()),
            ("image_url_1".to_string(), "/img/1.jpg".to_string()),
            ("checkout_url_x".to_string(), "/nope".to_string()),
            ("checkout_url_0".to_string(), "/nope".to_string()),
        ];
        assert_eq!(
            link_fields(LinkField::Checkout, &form),
            vec![(ProductId::new(1), "https://pay.example/1".to_string())]
        );
        assert_eq!(
            link_fields(LinkField::Image, &form),
            vec![(ProductId::new(1), "/img/1.jpg".to_string())]
        );
    }

    #[tokio::test]
    async fn test_nothing_persists_until_save() {
        let repository = SettingsRepository::new(MemoryStore::default());
        let settings = repository.load().await;
        let mut editor = CatalogEditor::new(&settings);

        editor
            .set_links(
                LinkField::Checkout,
                vec![(ProductId::new(1), "https://pay.example/1".to_string())],
            )
            .unwrap();
        assert_eq!(repository.load().await.overlay_origin, OverlayOrigin::Absent);

        editor.save(&repository).await.unwrap();
        let reloaded = repository.load().await;
        assert_eq!(reloaded.overlay_origin, OverlayOrigin::Current);
        assert_eq!(
            reloaded.resolve(ProductId::new(1)).unwrap().checkout_url,
            "https://pay.example/1"
        );
        assert_eq!(
            reloaded.resolve(ProductId::new(2)).unwrap().checkout_url,
            "/product/2/checkout"
        );
    }
}
