//! Application state shared across handlers.

use std::sync::Arc;

use food_delivery_core::{FileStore, ProductSettings, SettingsRepository};

use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Saved settings are not cached here: every
/// request that renders products loads them, so admin saves show up on the
/// next page view.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    settings: SettingsRepository<FileStore>,
}

impl AppState {
    /// Create state backed by the configured data directory.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let settings = SettingsRepository::new(FileStore::new(config.data_dir.clone()));
        Self {
            inner: Arc::new(AppStateInner { config, settings }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the settings repository.
    #[must_use]
    pub fn settings(&self) -> &SettingsRepository<FileStore> {
        &self.inner.settings
    }

    /// Load the current product settings.
    pub async fn load_settings(&self) -> ProductSettings {
        self.inner.settings.load().await
    }
}
