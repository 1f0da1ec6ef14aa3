//! Testing utilities and mock implementations.
//!
//! This module provides a mock catalog source and catalog fixtures so the
//! search component and the HTTP surface can be tested without a running
//! site.
//!
//! # Example
//!
//! ```rust,ignore
//! use quravel_core::testing::{fixtures, MockCatalogSource};
//!
//! let source = Arc::new(MockCatalogSource::with_items(fixtures::nolan_movies()));
//! let search = GlobalSearch::new(source, SearchConfig::default());
//! search.load().await;
//! ```

mod mock_catalog_source;

pub use mock_catalog_source::MockCatalogSource;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::catalog::CatalogItem;

    /// Create a catalog item with the fields the search pipeline reads.
    pub fn item(
        title: &str,
        content_type: &str,
        genres: &[&str],
        rating: Option<f64>,
    ) -> CatalogItem {
        CatalogItem {
            title: title.to_string(),
            content_type: Some(content_type.to_string()),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            rating,
            ..Default::default()
        }
    }

    /// Inception and Interstellar, in that order.
    pub fn nolan_movies() -> Vec<CatalogItem> {
        vec![
            item("Inception", "movie", &["Sci-Fi"], Some(8.8)),
            item("Interstellar", "movie", &["Sci-Fi", "Drama"], Some(8.6)),
        ]
    }

    /// A mixed catalog of movies, anime and TV shows.
    pub fn mixed_catalog() -> Vec<CatalogItem> {
        let mut spirited = item(
            "Spirited Away",
            "anime",
            &["Animation", "Fantasy"],
            Some(8.6),
        );
        spirited.title_jp = Some("Sen to Chihiro no Kamikakushi".to_string());
        spirited.year = Some("2001".to_string());
        spirited.poster = Some("/images/spirited-away.jpg".to_string());
        spirited.streaming_url = Some("/watch/spirited-away".to_string());
        spirited.duration = Some("2h 5m".to_string());
        spirited.popularity = Some(900.0);

        let mut breaking = item("Breaking Bad", "tv-show", &["Crime", "Drama"], Some(9.5));
        breaking.year = Some("2008".to_string());

        let mut naruto = item("Naruto", "anime", &["Action", "Adventure"], Some(8.4));
        naruto.alternative_titles = vec!["NARUTO -ナルト-".to_string()];

        vec![
            item("Inception", "movie", &["Sci-Fi", "Action"], Some(8.8)),
            spirited,
            breaking,
            naruto,
            item("Interstellar", "movie", &["Sci-Fi", "Drama"], Some(8.6)),
        ]
    }

    /// Movies "Movie 1".."Movie N" with rising ratings.
    pub fn numbered_movies(count: usize) -> Vec<CatalogItem> {
        (1..=count)
            .map(|i| {
                let title = format!("Movie {}", i);
                item(&title, "movie", &["Drama"], Some(i as f64 / 10.0))
            })
            .collect()
    }
}
