//! Integration tests for FoodDelivery.
//!
//! Both applications are built in-process over one temporary data directory
//! and driven with `tower::ServiceExt::oneshot`, so no server or network is
//! needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p food-delivery-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `settings_store` - Persistence through the file store
//! - `storefront` - Catalog, cart and checkout pages
//! - `admin` - Settings tabs and product management, seen from the storefront

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use food_delivery_admin::{config::AdminConfig, state::AppState as AdminState};
use food_delivery_core::{FileStore, SettingsRepository};
use food_delivery_storefront::{config::StorefrontConfig, state::AppState as StorefrontState};

/// Both applications sharing one data directory.
pub struct TestContext {
    data_dir: TempDir,
    pub storefront: TestClient,
    pub admin: TestClient,
}

impl TestContext {
    /// Build both apps over a fresh, empty data directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory or configuration cannot be created.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn new() -> Self {
        let data_dir = tempfile::tempdir().unwrap();
        let dir = data_dir.path().to_string_lossy().into_owned();

        let storefront_config = StorefrontConfig::from_lookup(|key| match key {
            "FOOD_DATA_DIR" => Some(dir.clone()),
            "CHECKOUT_PROCESSING_DELAY_MS" => Some("0".to_string()),
            _ => None,
        })
        .unwrap();
        let admin_config = AdminConfig::from_lookup(|key| match key {
            "FOOD_DATA_DIR" => Some(dir.clone()),
            _ => None,
        })
        .unwrap();

        Self {
            storefront: TestClient::new(food_delivery_storefront::app(StorefrontState::new(
                storefront_config,
            ))),
            admin: TestClient::new(food_delivery_admin::app(AdminState::new(admin_config))),
            data_dir,
        }
    }

    /// The shared data directory.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        self.data_dir.path()
    }

    /// A repository over the shared data directory.
    #[must_use]
    pub fn repository(&self) -> SettingsRepository<FileStore> {
        SettingsRepository::new(FileStore::new(self.data_dir()))
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Drives one app and keeps its session cookie between requests.
pub struct TestClient {
    app: Router,
    cookie: Option<String>,
}

impl TestClient {
    #[must_use]
    pub const fn new(app: Router) -> Self {
        Self { app, cookie: None }
    }

    /// Whether a session cookie has been received.
    #[must_use]
    pub const fn has_session(&self) -> bool {
        self.cookie.is_some()
    }

    /// GET a path.
    pub async fn get(&mut self, path: &str) -> TestResponse {
        self.send(Request::get(path), Body::empty()).await
    }

    /// POST a urlencoded form.
    pub async fn post_form(&mut self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();
        let builder = Request::post(path).header(
            header::CONTENT_TYPE,
            "application/x-www-form-urlencoded",
        );
        self.send(builder, Body::from(body)).await
    }

    /// Send a request built by `builder`, attaching the session cookie.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    #[allow(clippy::unwrap_used)]
    pub async fn send(&mut self, builder: axum::http::request::Builder, body: Body) -> TestResponse {
        let builder = match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        };
        let request = builder.body(body).unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();

        if let Some(set_cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
        {
            let pair = set_cookie.split(';').next().unwrap_or_default();
            self.cookie = Some(pair.to_string());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

/// A fully read response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The `Location` header of a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }
}
