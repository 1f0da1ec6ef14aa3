use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use super::{handlers, middleware::metrics_middleware, search};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let site_dir = state.config().server.site_dir.clone();

    // The search API is read-only and may be called from any page origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Search
        .route("/search", get(search::search))
        .route("/search/all", get(search::search_all))
        .route("/search/stats", get(search::get_stats))
        .route("/search/facets", get(search::get_facets))
        .route("/search/refresh", post(search::refresh))
        .layer(cors)
        .with_state(state);

    // Serve the generated site, with its own 404 page
    let not_found = ServeFile::new(site_dir.join("404.html"));
    let serve_dir = ServeDir::new(&site_dir).not_found_service(not_found);

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/metrics", get(handlers::metrics))
        .fallback_service(serve_dir)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
}
