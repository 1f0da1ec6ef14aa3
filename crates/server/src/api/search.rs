//! Catalog search API handlers.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use quravel_core::{
    CatalogItem, Facets, FilterState, LoadStatus, SearchOutcome, SearchScope, SearchStats,
    SortMode,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    #[default]
    Json,
    Html,
}

/// Query string of the search endpoints.
///
/// `genres` is a comma separated list. An unknown `sort` falls back to
/// relevance rather than rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    #[serde(rename = "type", default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub genres: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub format: ResponseFormat,
}

impl SearchParams {
    pub fn to_filters(&self) -> FilterState {
        let mut filters = FilterState::new(self.q.clone());

        if let Some(content_type) = &self.content_type {
            filters = filters.with_content_type(content_type);
        }

        if let Some(genres) = &self.genres {
            for genre in genres.split(',') {
                filters = filters.with_genre(genre);
            }
        }

        if let Some(sort) = &self.sort {
            let sort = sort.parse().unwrap_or_else(|e| {
                debug!("{}, using relevance", e);
                SortMode::Relevance
            });
            filters = filters.with_sort(sort);
        }

        filters
    }
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    /// "ok", "no_results" or "unavailable"
    pub status: &'static str,
    pub query: String,
    pub results: Vec<CatalogItem>,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchResponse {
    fn new(query: String, outcome: SearchOutcome) -> Self {
        match outcome {
            SearchOutcome::Results(results) => Self {
                status: "ok",
                query,
                total: results.len(),
                results,
                error: None,
            },
            SearchOutcome::NoResults => Self {
                status: "no_results",
                query,
                results: Vec::new(),
                total: 0,
                error: None,
            },
            SearchOutcome::Unavailable(reason) => Self {
                status: "unavailable",
                query,
                results: Vec::new(),
                total: 0,
                error: Some(reason),
            },
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/v1/search
///
/// Inline preview search, capped at `search.max_results`.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Response {
    run_search(&state, &params, SearchScope::Preview).await
}

/// GET /api/v1/search/all
///
/// Full results view, capped at `search.max_view_all_results`.
pub async fn search_all(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Response {
    run_search(&state, &params, SearchScope::Full).await
}

async fn run_search(state: &AppState, params: &SearchParams, scope: SearchScope) -> Response {
    let filters = params.to_filters();
    let outcome = state.search().search_scoped(&filters, scope).await;

    match params.format {
        ResponseFormat::Html => {
            let markup = state.renderer().outcome(&outcome, &filters.query);
            Html(markup.into_string()).into_response()
        }
        ResponseFormat::Json => Json(SearchResponse::new(filters.query, outcome)).into_response(),
    }
}

/// GET /api/v1/search/stats
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<SearchStats> {
    Json(state.search().stats().await)
}

/// GET /api/v1/search/facets
///
/// Content types and genres for the filter dropdown.
pub async fn get_facets(State(state): State<Arc<AppState>>) -> Json<Facets> {
    Json(state.search().facets().await)
}

/// POST /api/v1/search/refresh
///
/// Reload the catalog and rebuild the index. Responds 503 with the stats
/// when the reload failed.
pub async fn refresh(State(state): State<Arc<AppState>>) -> (StatusCode, Json<SearchStats>) {
    let status = state.search().refresh().await;
    let stats = state.search().stats().await;

    match status {
        LoadStatus::Ready => (StatusCode::OK, Json(stats)),
        other => {
            warn!("Catalog refresh did not complete: {:?}", other);
            (StatusCode::SERVICE_UNAVAILABLE, Json(stats))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quravel_core::ContentTypeFilter;

    #[test]
    fn test_params_to_filters() {
        let params = SearchParams {
            q: "Spirit".to_string(),
            content_type: Some("Anime".to_string()),
            genres: Some("Fantasy, ,Animation".to_string()),
            sort: Some("top-imdb".to_string()),
            format: ResponseFormat::Json,
        };

        let filters = params.to_filters();
        assert_eq!(filters.query, "Spirit");
        assert_eq!(
            filters.content_type,
            ContentTypeFilter::Only("anime".to_string())
        );
        assert_eq!(
            filters.genres.iter().cloned().collect::<Vec<_>>(),
            vec!["animation".to_string(), "fantasy".to_string()]
        );
        assert_eq!(filters.sort, SortMode::TopRated);
    }

    #[test]
    fn test_unknown_sort_falls_back_to_relevance() {
        let params = SearchParams {
            sort: Some("alphabetical".to_string()),
            ..Default::default()
        };
        assert_eq!(params.to_filters().sort, SortMode::Relevance);
    }

    #[test]
    fn test_unavailable_response_carries_reason() {
        let outcome = SearchOutcome::Unavailable("down".to_string());
        let response = SearchResponse::new("x".to_string(), outcome);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["status"], "unavailable");
        assert_eq!(json["total"], 0);
        assert_eq!(json["error"], "down");
    }

    #[test]
    fn test_no_results_response_has_no_error() {
        let response = SearchResponse::new("x".to_string(), SearchOutcome::NoResults);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["status"], "no_results");
        assert!(json.get("error").is_none());
        assert_eq!(json["results"], serde_json::json!([]));
    }
}
