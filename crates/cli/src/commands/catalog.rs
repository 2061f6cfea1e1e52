//! Catalog commands.
//!
//! # Usage
//!
//! ```bash
//! # Every product with its effective checkout link
//! fd-cli catalog list
//!
//! # Only one category, as JSON
//! fd-cli catalog list --category 2 --json
//! ```

use std::io::Write;

use food_delivery_core::{CategoryId, ProductQuery, SettingsRepository, SettingsStore};

use super::CommandError;

/// List the resolved catalog: baseline plus custom products, with saved
/// links applied.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub async fn list<S: SettingsStore>(
    repository: &SettingsRepository<S>,
    category: Option<i32>,
    json: bool,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let settings = repository.load().await;
    let catalog = settings.catalog();
    let products = settings.resolved_products();
    let query = ProductQuery::new(None, category.map(CategoryId::new));
    let selected = query.apply(&products);

    tracing::debug!(total = products.len(), shown = selected.len(), "Listing catalog");

    if json {
        serde_json::to_writer_pretty(&mut *out, &selected)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "{:>4}  {:<28} {:<14} {:>10}  CHECKOUT", "ID", "NAME", "CATEGORY", "PRICE")?;
    for resolved in &selected {
        let product = &resolved.product;
        let category = catalog
            .category(product.category_id)
            .map_or("-", |c| c.name.as_str());
        let marker = if settings.is_custom(product.id) { "*" } else { " " };
        writeln!(
            out,
            "{:>4}{} {:<28} {:<14} {:>10}  {}",
            product.id,
            marker,
            product.name,
            category,
            product.price.to_string(),
            resolved.checkout_url,
        )?;
    }
    writeln!(out, "{} product(s); * marks custom products", selected.len())?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use food_delivery_core::MemoryStore;

    use super::*;

    #[tokio::test]
    async fn test_list_baseline() {
        let repository = SettingsRepository::new(MemoryStore::new());
        let mut out = Vec::new();

        list(&repository, None, false, &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("  ID"));
        assert!(text.contains("/product/2/checkout"));
        assert!(text.ends_with("16 product(s); * marks custom products\n"));
    }

    #[tokio::test]
    async fn test_list_category_json() {
        let repository = SettingsRepository::new(MemoryStore::new());
        let mut out = Vec::new();

        list(&repository, Some(1), true, &mut out).await.unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let items = value.as_array().unwrap();
        assert!(!items.is_empty());
        assert!(items.iter().all(|item| item["product"]["categoryId"] == 1));
    }
}
