//! Admin page tabs.

use core::fmt;

use serde::Deserialize;

/// The three sections of the admin page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    /// Checkout link per product.
    #[default]
    Checkout,
    /// Image URL per product, with previews.
    Images,
    /// Create, edit and delete custom products.
    Products,
}

impl Tab {
    pub const ALL: [Self; 3] = [Self::Checkout, Self::Images, Self::Products];

    /// Parse the `tab` query parameter, defaulting to the checkout tab.
    #[must_use]
    pub fn from_query(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("images") => Self::Images,
            Some("products") => Self::Products,
            _ => Self::Checkout,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Checkout => "checkout",
            Self::Images => "images",
            Self::Products => "products",
        }
    }

    /// Tab button text.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Checkout => "Links de Checkout",
            Self::Images => "Imagens dos Produtos",
            Self::Products => "Gerenciar Produtos",
        }
    }

    /// Page URL with this tab selected.
    #[must_use]
    pub fn href(&self) -> String {
        format!("/?tab={}", self.as_str())
    }

    /// Whether the tab is saved with the "Salvar Configurações" button.
    #[must_use]
    pub const fn has_settings_form(&self) -> bool {
        matches!(self, Self::Checkout | Self::Images)
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_query() {
        assert_eq!(Tab::from_query(None), Tab::Checkout);
        assert_eq!(Tab::from_query(Some("images")), Tab::Images);
        assert_eq!(Tab::from_query(Some(" products ")), Tab::Products);
        assert_eq!(Tab::from_query(Some("orders")), Tab::Checkout);
    }

    #[test]
    fn test_settings_form_tabs() {
        assert!(Tab::Checkout.has_settings_form());
        assert!(Tab::Images.has_settings_form());
        assert!(!Tab::Products.has_settings_form());
        assert_eq!(Tab::Products.href(), "/?tab=products");
    }
}
