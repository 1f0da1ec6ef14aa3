//! Mock catalog source for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::catalog::{CatalogDocument, CatalogError, CatalogItem, CatalogSource};

/// Mock implementation of the CatalogSource trait.
///
/// Provides controllable behavior for testing:
/// - Serve a configurable list of items
/// - Count fetches for assertions
/// - Simulate failures
///
/// # Example
///
/// ```rust,ignore
/// use quravel_core::testing::{fixtures, MockCatalogSource};
///
/// let source = MockCatalogSource::with_items(fixtures::nolan_movies());
/// source.fail_next(CatalogError::ParseError("truncated".into())).await;
/// ```
#[derive(Debug, Default)]
pub struct MockCatalogSource {
    items: Arc<RwLock<Vec<CatalogItem>>>,
    fetches: Arc<RwLock<usize>>,
    /// If set, the next fetch will fail with this error.
    next_error: Arc<RwLock<Option<CatalogError>>>,
}

impl MockCatalogSource {
    /// Create a source serving an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source serving `items`.
    pub fn with_items(items: Vec<CatalogItem>) -> Self {
        Self {
            items: Arc::new(RwLock::new(items)),
            ..Default::default()
        }
    }

    /// Replace the served items.
    pub async fn set_items(&self, items: Vec<CatalogItem>) {
        *self.items.write().await = items;
    }

    /// Make the next fetch fail with `error`.
    pub async fn fail_next(&self, error: CatalogError) {
        *self.next_error.write().await = Some(error);
    }

    /// Number of fetches made so far (successful or not).
    pub async fn fetch_count(&self) -> usize {
        *self.fetches.read().await
    }
}

#[async_trait]
impl CatalogSource for MockCatalogSource {
    fn name(&self) -> &str {
        "mock"
    }

    fn location(&self) -> String {
        "mock://catalog".to_string()
    }

    async fn fetch(&self) -> Result<CatalogDocument, CatalogError> {
        *self.fetches.write().await += 1;

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }

        Ok(CatalogDocument {
            posts: self.items.read().await.clone(),
        })
    }
}
