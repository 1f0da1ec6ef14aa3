//! The search component: owns the index, its load status and the search
//! configuration.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

use super::facets::Facets;
use super::filter::FilterState;
use super::index::{build_index, IndexedItem};
use super::pipeline;
use crate::catalog::{CatalogItem, CatalogSource};
use crate::config::SearchConfig;
use crate::metrics::{
    CATALOG_ITEMS, CATALOG_LOADS, SEARCHES_TOTAL, SEARCH_DURATION, SEARCH_RESULTS,
};

/// Whether the index can serve queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadStatus {
    /// No load attempted yet (or the component was destroyed).
    NotLoaded,
    Ready,
    /// The last load failed; queries report the catalog as unavailable
    /// until a refresh succeeds.
    Unavailable { reason: String },
}

/// Result of one search request.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Results(Vec<CatalogItem>),
    NoResults,
    Unavailable(String),
}

impl SearchOutcome {
    pub fn items(&self) -> &[CatalogItem] {
        match self {
            Self::Results(items) => items,
            _ => &[],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Results(_) => "results",
            Self::NoResults => "no_results",
            Self::Unavailable(_) => "unavailable",
        }
    }
}

/// Which result cap a search uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    /// Inline preview under the search box.
    Preview,
    /// Dedicated results view.
    Full,
}

impl SearchScope {
    fn label(&self) -> &'static str {
        match self {
            Self::Preview => "preview",
            Self::Full => "full",
        }
    }
}

/// Snapshot of the component state.
#[derive(Debug, Clone, Serialize)]
pub struct SearchStats {
    pub source: String,
    pub status: LoadStatus,
    pub loaded_items: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaded_at: Option<DateTime<Utc>>,
    pub searches_run: u64,
}

struct IndexState {
    index: Arc<Vec<IndexedItem>>,
    status: LoadStatus,
    loaded_at: Option<DateTime<Utc>>,
}

impl IndexState {
    fn empty(status: LoadStatus) -> Self {
        Self {
            index: Arc::new(Vec::new()),
            status,
            loaded_at: None,
        }
    }
}

/// Catalog search component.
///
/// Constructed once at startup, loaded with [`GlobalSearch::load`], and
/// reloaded on demand with [`GlobalSearch::refresh`]. Queries never fail:
/// a catalog that could not be loaded is reported through
/// [`SearchOutcome::Unavailable`].
pub struct GlobalSearch {
    source: Arc<dyn CatalogSource>,
    config: SearchConfig,
    state: RwLock<IndexState>,
    searches_run: AtomicU64,
}

impl GlobalSearch {
    pub fn new(source: Arc<dyn CatalogSource>, config: SearchConfig) -> Self {
        Self {
            source,
            config,
            state: RwLock::new(IndexState::empty(LoadStatus::NotLoaded)),
            searches_run: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Fetch the catalog and rebuild the index.
    ///
    /// On failure the index is emptied and the status becomes
    /// [`LoadStatus::Unavailable`]. There is no retry.
    pub async fn load(&self) -> LoadStatus {
        let source = self.source.name().to_string();

        match self.source.fetch().await {
            Ok(document) => {
                let index = build_index(document.posts);
                let count = index.len();

                let mut state = self.state.write().await;
                *state = IndexState {
                    index: Arc::new(index),
                    status: LoadStatus::Ready,
                    loaded_at: Some(Utc::now()),
                };

                CATALOG_LOADS
                    .with_label_values(&[source.as_str(), "success"])
                    .inc();
                CATALOG_ITEMS.set(count as i64);
                info!(
                    "Loaded {} catalog items from {}",
                    count,
                    self.source.location()
                );
                state.status.clone()
            }
            Err(e) => {
                let reason = e.to_string();
                error!(
                    "Failed to load catalog from {}: {}",
                    self.source.location(),
                    reason
                );

                let mut state = self.state.write().await;
                *state = IndexState::empty(LoadStatus::Unavailable { reason });

                CATALOG_LOADS
                    .with_label_values(&[source.as_str(), "error"])
                    .inc();
                CATALOG_ITEMS.set(0);
                state.status.clone()
            }
        }
    }

    /// Re-run the load. Same success and failure behaviour as [`load`](Self::load).
    pub async fn refresh(&self) -> LoadStatus {
        info!("Refreshing catalog index");
        self.load().await
    }

    /// Drop the index and return to [`LoadStatus::NotLoaded`].
    pub async fn destroy(&self) {
        let mut state = self.state.write().await;
        *state = IndexState::empty(LoadStatus::NotLoaded);
        CATALOG_ITEMS.set(0);
        debug!("Search index destroyed");
    }

    pub async fn status(&self) -> LoadStatus {
        self.state.read().await.status.clone()
    }

    /// Preview search, capped at `max_results`.
    pub async fn search(&self, filters: &FilterState) -> SearchOutcome {
        self.search_scoped(filters, SearchScope::Preview).await
    }

    /// Full results search, capped at `max_view_all_results`.
    pub async fn search_all(&self, filters: &FilterState) -> SearchOutcome {
        self.search_scoped(filters, SearchScope::Full).await
    }

    pub async fn search_scoped(&self, filters: &FilterState, scope: SearchScope) -> SearchOutcome {
        let limit = match scope {
            SearchScope::Preview => self.config.max_results,
            SearchScope::Full => self.config.max_view_all_results,
        };

        let (index, status) = {
            let state = self.state.read().await;
            (Arc::clone(&state.index), state.status.clone())
        };

        let outcome = match status {
            LoadStatus::Unavailable { reason } => SearchOutcome::Unavailable(reason),
            LoadStatus::NotLoaded | LoadStatus::Ready => {
                let started = Instant::now();
                let hits = pipeline::run(&index, filters, &self.config.relevance, limit);
                self.searches_run.fetch_add(1, Ordering::Relaxed);

                SEARCH_DURATION
                    .with_label_values(&[scope.label()])
                    .observe(started.elapsed().as_secs_f64());
                SEARCH_RESULTS
                    .with_label_values(&[scope.label()])
                    .observe(hits.len() as f64);

                if hits.is_empty() {
                    SearchOutcome::NoResults
                } else {
                    SearchOutcome::Results(hits.into_iter().map(|h| h.item.clone()).collect())
                }
            }
        };

        SEARCHES_TOTAL
            .with_label_values(&[scope.label(), outcome.label()])
            .inc();

        outcome
    }

    /// Content types and genres present in the loaded catalog.
    pub async fn facets(&self) -> Facets {
        let index = Arc::clone(&self.state.read().await.index);
        Facets::from_index(&index)
    }

    pub async fn stats(&self) -> SearchStats {
        let state = self.state.read().await;
        SearchStats {
            source: self.source.name().to_string(),
            status: state.status.clone(),
            loaded_items: state.index.len(),
            loaded_at: state.loaded_at,
            searches_run: self.searches_run.load(Ordering::Relaxed),
        }
    }
}
