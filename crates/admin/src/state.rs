//! Application state shared across handlers.

use std::sync::Arc;

use food_delivery_core::{FileStore, ProductSettings, SettingsRepository};

use crate::config::AdminConfig;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    settings: SettingsRepository<FileStore>,
}

impl AppState {
    /// Create state backed by the configured data directory.
    #[must_use]
    pub fn new(config: AdminConfig) -> Self {
        let settings = SettingsRepository::new(FileStore::new(config.data_dir.clone()));
        Self {
            inner: Arc::new(AppStateInner { config, settings }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get a reference to the settings repository.
    #[must_use]
    pub fn settings(&self) -> &SettingsRepository<FileStore> {
        &self.inner.settings
    }

    /// Load the saved product settings.
    pub async fn load_settings(&self) -> ProductSettings {
        self.inner.settings.load().await
    }
}
