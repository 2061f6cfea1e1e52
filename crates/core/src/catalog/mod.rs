//! Product catalog.
//!
//! The baseline catalog is static and built once per process. Products
//! created in the admin are appended with [`Catalog::with_custom`]; the
//! baseline itself is never mutated.

mod data;

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::types::{CategoryId, Discount, HexColor, Price, ProductId, Rating};

static BASELINE: LazyLock<Catalog> = LazyLock::new(data::baseline);

/// A product as defined in the catalog.
///
/// `checkout_url` and `image_url` may be empty, meaning "not set"; see
/// [`crate::overlay::resolve`] for how the effective values are chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Price>,
    #[serde(default)]
    pub discount: Discount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
    pub category_id: CategoryId,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<HexColor>,
    #[serde(default)]
    pub checkout_url: String,
    #[serde(default)]
    pub image_url: String,
}

impl Product {
    /// Case-insensitive substring match on name or description.
    ///
    /// `needle` must already be lowercase.
    #[must_use]
    pub fn matches_search(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }

    /// The swatch color, falling back to [`HexColor::DEFAULT`].
    #[must_use]
    pub fn color_or_default(&self) -> &str {
        self.color.as_ref().map_or(HexColor::DEFAULT, HexColor::as_str)
    }
}

impl AsRef<Self> for Product {
    fn as_ref(&self) -> &Self {
        self
    }
}

/// Icon tag for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryIcon {
    Pizza,
    Burger,
    Pasta,
    Dessert,
    Drink,
    Leaf,
    Food,
    Discount,
}

impl CategoryIcon {
    /// The tag as stored in the catalog.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pizza => "pizza",
            Self::Burger => "burger",
            Self::Pasta => "pasta",
            Self::Dessert => "dessert",
            Self::Drink => "drink",
            Self::Leaf => "leaf",
            Self::Food => "food",
            Self::Discount => "discount",
        }
    }

    /// Glyph rendered inside the category chip.
    #[must_use]
    pub const fn glyph(&self) -> &'static str {
        match self {
            Self::Pizza => "🍕",
            Self::Burger => "🍔",
            Self::Pasta => "🍝",
            Self::Dessert => "🍰",
            Self::Drink => "🥤",
            Self::Leaf => "🌱",
            Self::Food => "🥗",
            Self::Discount => "🏷️",
        }
    }
}

/// A product category. Categories are static and never overridden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub icon: CategoryIcon,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<HexColor>,
}

/// An immutable list of products and categories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
    categories: Vec<Category>,
}

impl Catalog {
    /// Build a catalog from explicit lists.
    #[must_use]
    pub const fn new(products: Vec<Product>, categories: Vec<Category>) -> Self {
        Self {
            products,
            categories,
        }
    }

    /// The static catalog shipped with the store.
    #[must_use]
    pub fn baseline() -> &'static Self {
        &BASELINE
    }

    /// A copy of this catalog with `custom` products appended.
    ///
    /// Custom products whose id is already taken are skipped, so ids stay
    /// unique across the combined set.
    #[must_use]
    pub fn with_custom(&self, custom: &[Product]) -> Self {
        let mut merged = self.clone();
        for product in custom {
            if merged.contains(product.id) {
                tracing::warn!(product_id = %product.id, "Skipping custom product with duplicate id");
                continue;
            }
            merged.products.push(product.clone());
        }
        merged
    }

    /// All products, baseline first.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// All categories in display order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a product by id.
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Look up a category by id.
    #[must_use]
    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Returns `true` if a product with this id exists.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.product(id).is_some()
    }

    /// Products in the given category.
    pub fn in_category(&self, id: CategoryId) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(move |p| p.category_id == id)
    }

    /// Products flagged as featured.
    pub fn featured(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.is_featured)
    }

    /// The highest product id, if there are any products.
    #[must_use]
    pub fn max_product_id(&self) -> Option<ProductId> {
        self.products.iter().map(|p| p.id).max()
    }

    /// The id a newly created product receives: one past the current
    /// maximum, or `1` for an empty catalog. `None` once ids are exhausted.
    #[must_use]
    pub fn next_product_id(&self) -> Option<ProductId> {
        self.max_product_id()
            .map_or(Some(ProductId::new(1)), |max| max.next())
    }
}

/// Catalog filter driven by the `search` and `category` query parameters.
///
/// A non-empty search term resets the category filter, mirroring how the
/// catalog page behaves when a search is submitted from the navbar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    search: Option<String>,
    category: Option<CategoryId>,
}

impl ProductQuery {
    /// Build a query. Blank searches and non-positive categories are ignored.
    #[must_use]
    pub fn new(search: Option<&str>, category: Option<CategoryId>) -> Self {
        let search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string);
        let category = if search.is_some() {
            None
        } else {
            category.filter(CategoryId::is_valid)
        };
        Self { search, category }
    }

    /// The active search term, as typed.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// The active category filter.
    #[must_use]
    pub const fn category(&self) -> Option<CategoryId> {
        self.category
    }

    /// Returns `true` if the product passes the filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = self.category
            && product.category_id != category
        {
            return false;
        }
        self.search
            .as_ref()
            .is_none_or(|term| product.matches_search(&term.to_lowercase()))
    }

    /// Keep the items that pass the filter, preserving order.
    pub fn apply<'a, T: AsRef<Product>>(&self, items: &'a [T]) -> Vec<&'a T> {
        items.iter().filter(|item| self.matches(item.as_ref())).collect()
    }
}
