//! Search API tests against an in-process router.

mod common;

use axum::http::StatusCode;
use common::{fixtures, titles, TestFixture};
use quravel_core::CatalogError;

#[tokio::test]
async fn test_health_reports_catalog_status() {
    let fixture = TestFixture::with_items(fixtures::nolan_movies()).await;

    let response = fixture.get("/api/v1/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["catalog"]["state"], "ready");
}

#[tokio::test]
async fn test_config_is_sanitized() {
    let fixture = TestFixture::with_items(vec![]).await;

    let response = fixture.get("/api/v1/config").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["catalog"]["backend"], "file");
    assert_eq!(response.body["search"]["max_results"], 10);
}

#[tokio::test]
async fn test_prefix_query_matches_title() {
    let fixture = TestFixture::with_items(fixtures::nolan_movies()).await;

    let response = fixture.get("/api/v1/search?q=incep").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["query"], "incep");
    assert_eq!(response.body["total"], 1);
    assert_eq!(titles(&response.body), vec!["Inception"]);
}

#[tokio::test]
async fn test_empty_query_with_type_filter_returns_all_movies() {
    let fixture = TestFixture::with_items(fixtures::mixed_catalog()).await;

    let response = fixture.get("/api/v1/search?q=&type=movie").await;

    assert_eq!(titles(&response.body), vec!["Inception", "Interstellar"]);
}

#[tokio::test]
async fn test_unmatched_query_reports_no_results() {
    let fixture = TestFixture::with_items(fixtures::nolan_movies()).await;

    let response = fixture.get("/api/v1/search?q=xyz-nonexistent").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "no_results");
    assert_eq!(response.body["total"], 0);
    assert!(response.body.get("error").is_none());
}

#[tokio::test]
async fn test_top_rated_sort() {
    let mut movies = fixtures::nolan_movies();
    movies.reverse();
    let fixture = TestFixture::with_items(movies).await;

    let response = fixture.get("/api/v1/search?sort=top-rated").await;
    assert_eq!(titles(&response.body), vec!["Inception", "Interstellar"]);

    // Legacy alias
    let response = fixture.get("/api/v1/search?sort=top-imdb").await;
    assert_eq!(titles(&response.body), vec!["Inception", "Interstellar"]);
}

#[tokio::test]
async fn test_genre_filter_any_of() {
    let fixture = TestFixture::with_items(fixtures::mixed_catalog()).await;

    let response = fixture.get("/api/v1/search?genres=crime,fantasy").await;

    let mut found = titles(&response.body);
    found.sort();
    assert_eq!(found, vec!["Breaking Bad", "Spirited Away"]);
}

#[tokio::test]
async fn test_preview_and_full_caps() {
    let fixture = TestFixture::with_items(fixtures::numbered_movies(60)).await;

    let preview = fixture.get("/api/v1/search?q=movie").await;
    assert_eq!(preview.body["total"], 10);

    let full = fixture.get("/api/v1/search/all?q=movie").await;
    assert_eq!(full.body["total"], 50);
}

#[tokio::test]
async fn test_failed_load_reports_unavailable() {
    let fixture = TestFixture::unloaded(fixtures::nolan_movies());
    fixture
        .source
        .fail_next(CatalogError::ParseError("truncated document".to_string()))
        .await;
    fixture.search.load().await;

    let response = fixture.get("/api/v1/search?q=incep").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "unavailable");
    assert_eq!(response.body["total"], 0);
    assert!(response.body["error"]
        .as_str()
        .unwrap()
        .contains("truncated document"));

    let health = fixture.get("/api/v1/health").await;
    assert_eq!(health.body["catalog"]["state"], "unavailable");
}

#[tokio::test]
async fn test_refresh_recovers_after_failure() {
    let fixture = TestFixture::unloaded(fixtures::nolan_movies());
    fixture
        .source
        .fail_next(CatalogError::ParseError("truncated document".to_string()))
        .await;

    let failed = fixture.post("/api/v1/search/refresh").await;
    assert_eq!(failed.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(failed.body["status"]["state"], "unavailable");

    let refreshed = fixture.post("/api/v1/search/refresh").await;
    assert_eq!(refreshed.status, StatusCode::OK);
    assert_eq!(refreshed.body["loaded_items"], 2);
    assert_eq!(fixture.source.fetch_count().await, 2);

    let response = fixture.get("/api/v1/search?q=inter").await;
    assert_eq!(titles(&response.body), vec!["Interstellar"]);
}

#[tokio::test]
async fn test_refresh_picks_up_new_items() {
    let fixture = TestFixture::with_items(fixtures::nolan_movies()).await;
    fixture.source.set_items(fixtures::mixed_catalog()).await;

    fixture.post("/api/v1/search/refresh").await;

    let response = fixture.get("/api/v1/search?q=naruto").await;
    assert_eq!(titles(&response.body), vec!["Naruto"]);
}

#[tokio::test]
async fn test_stats_and_facets() {
    let fixture = TestFixture::with_items(fixtures::mixed_catalog()).await;
    fixture.get("/api/v1/search?q=a").await;

    let stats = fixture.get("/api/v1/search/stats").await;
    assert_eq!(stats.body["source"], "mock");
    assert_eq!(stats.body["loaded_items"], 5);
    assert_eq!(stats.body["searches_run"], 1);

    let facets = fixture.get("/api/v1/search/facets").await;
    assert_eq!(facets.body["total_items"], 5);
    assert_eq!(
        facets.body["types"],
        serde_json::json!(["anime", "movie", "tv-show"])
    );
}

#[tokio::test]
async fn test_html_format_renders_fragment() {
    let fixture = TestFixture::with_items(fixtures::mixed_catalog()).await;

    let response = fixture.get("/api/v1/search?q=spirit&format=html").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response
        .content_type
        .as_deref()
        .unwrap()
        .starts_with("text/html"));
    assert!(response
        .text
        .contains(r#"<span class="search-highlight">Spirit</span>ed Away"#));

    let empty = fixture.get("/api/v1/search/all?q=zzz&format=html").await;
    assert!(empty.text.contains("No results found"));
}

#[tokio::test]
async fn test_site_fallback_and_metrics() {
    let fixture = TestFixture::with_items(fixtures::nolan_movies()).await;

    let index = fixture.get("/").await;
    assert_eq!(index.status, StatusCode::OK);
    assert!(index.text.contains("Quravel"));

    let missing = fixture.get("/no/such/page").await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert!(missing.text.contains("Not Found"));

    let metrics = fixture.get("/metrics").await;
    assert_eq!(metrics.status, StatusCode::OK);
    assert!(metrics.text.contains("quravel_http_requests_total"));
}
