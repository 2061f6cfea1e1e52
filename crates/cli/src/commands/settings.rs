//! Saved settings commands.
//!
//! # Usage
//!
//! ```bash
//! # What the admin has saved
//! fd-cli settings show
//!
//! # Forget every saved link and custom product
//! fd-cli settings clear --yes
//! ```

use std::io::Write;

use food_delivery_core::{OverlayOrigin, SettingsRepository, SettingsStore};

use super::CommandError;

/// Print the saved overlay and custom products.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub async fn show<S: SettingsStore>(
    repository: &SettingsRepository<S>,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let settings = repository.load().await;

    let origin = match settings.overlay_origin {
        OverlayOrigin::Absent => "nothing saved",
        OverlayOrigin::Current => "productSettings",
        OverlayOrigin::Legacy => "productCheckoutUrls (legacy)",
    };
    writeln!(out, "Overlay source: {origin}")?;

    writeln!(out, "Overlay entries: {}", settings.overlay.len())?;
    for (id, entry) in settings.overlay.iter().filter(|(_, e)| !e.is_blank()) {
        writeln!(
            out,
            "  {id:>4}  checkout={}  image={}",
            entry.checkout_url().unwrap_or("-"),
            entry.image_url().unwrap_or("-"),
        )?;
    }

    writeln!(out, "Custom products: {}", settings.custom_products.len())?;
    for product in &settings.custom_products {
        writeln!(out, "  {:>4}  {}  {}", product.id, product.name, product.price)?;
    }

    Ok(())
}

/// Remove every saved settings document.
///
/// # Errors
///
/// Returns [`CommandError::NotConfirmed`] unless `confirmed`, or the store's
/// error if a document cannot be removed.
pub async fn clear<S: SettingsStore>(
    repository: &SettingsRepository<S>,
    confirmed: bool,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    if !confirmed {
        return Err(CommandError::NotConfirmed("clear saved settings"));
    }

    repository.clear().await?;
    writeln!(out, "Saved settings cleared")?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use food_delivery_core::{MemoryStore, ProductId, SettingsOverlay};

    use super::*;

    async fn saved_repository() -> SettingsRepository<MemoryStore> {
        let repository = SettingsRepository::new(MemoryStore::new());
        let mut overlay = SettingsOverlay::new();
        overlay.set_checkout_url(ProductId::new(1), "https://pay.example/1");
        repository.save(&overlay, &[]).await.unwrap();
        repository
    }

    #[tokio::test]
    async fn test_show_empty() {
        let repository = SettingsRepository::new(MemoryStore::new());
        let mut out = Vec::new();

        show(&repository, &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Overlay source: nothing saved"));
        assert!(text.contains("Custom products: 0"));
    }

    #[tokio::test]
    async fn test_show_saved_overlay() {
        let repository = saved_repository().await;
        let mut out = Vec::new();

        show(&repository, &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Overlay source: productSettings"));
        assert!(text.contains("checkout=https://pay.example/1  image=-"));
    }

    #[tokio::test]
    async fn test_clear_requires_confirmation() {
        let repository = saved_repository().await;
        let mut out = Vec::new();

        let err = clear(&repository, false, &mut out).await.unwrap_err();
        assert!(matches!(err, CommandError::NotConfirmed(_)));
        assert_eq!(repository.load().await.overlay_origin, OverlayOrigin::Current);

        clear(&repository, true, &mut out).await.unwrap();
        assert_eq!(repository.load().await.overlay_origin, OverlayOrigin::Absent);
        assert!(repository.store().is_empty().await);
    }
}
