//! Common test utilities for API tests with a mock catalog.
//!
//! This module provides a test fixture that creates an in-process router
//! backed by a `MockCatalogSource` and a temporary site directory, so the
//! API can be exercised without a real catalog or network.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use quravel_core::testing::MockCatalogSource;
use quravel_core::{CatalogItem, Config, GlobalSearch};
use quravel_server::api::create_router;
use quravel_server::state::AppState;

/// Re-export fixtures for test convenience
pub use quravel_core::testing::fixtures;

/// Test fixture with a controllable catalog.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_search() {
///     let fixture = TestFixture::with_items(fixtures::nolan_movies()).await;
///
///     let response = fixture.get("/api/v1/search?q=incep").await;
///
///     assert_eq!(response.body["total"], 1);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock catalog source - configure items and failures
    pub source: Arc<MockCatalogSource>,
    /// The search component behind the router
    pub search: Arc<GlobalSearch>,
    /// Temporary static site directory
    pub site_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub text: String,
    /// Parsed JSON body, `Value::Null` when the body is not JSON
    pub body: Value,
}

impl TestFixture {
    /// Create a fixture serving `items`, already loaded.
    pub async fn with_items(items: Vec<CatalogItem>) -> Self {
        let fixture = Self::unloaded(items);
        fixture.search.load().await;
        fixture
    }

    /// Create a fixture whose catalog has not been loaded yet.
    pub fn unloaded(items: Vec<CatalogItem>) -> Self {
        let site_dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::write(site_dir.path().join("index.html"), "<h1>Quravel</h1>")
            .expect("Failed to write index.html");
        std::fs::write(site_dir.path().join("404.html"), "<h1>Not Found</h1>")
            .expect("Failed to write 404.html");

        let mut config = Config::default();
        config.server.site_dir = site_dir.path().to_path_buf();

        let source = Arc::new(MockCatalogSource::with_items(items));
        let search = Arc::new(GlobalSearch::new(
            Arc::clone(&source) as Arc<dyn quravel_core::CatalogSource>,
            config.search.clone(),
        ));

        let state = Arc::new(AppState::new(config, Arc::clone(&search)));
        let router = create_router(state);

        Self {
            router,
            source,
            search,
            site_dir,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post(&self, uri: &str) -> TestResponse {
        self.request(Request::post(uri).body(Body::empty()).unwrap())
            .await
    }

    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let text = String::from_utf8_lossy(&bytes).to_string();
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);

        TestResponse {
            status,
            content_type,
            text,
            body,
        }
    }
}

/// Titles of the results in a JSON search response.
pub fn titles(body: &Value) -> Vec<String> {
    body["results"]
        .as_array()
        .map(|results| {
            results
                .iter()
                .filter_map(|r| r["title"].as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}
