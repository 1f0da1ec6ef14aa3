//! Relevance scoring.

use std::collections::BTreeSet;

use super::filter::genre_overlaps;
use super::index::IndexedItem;
use crate::config::RelevanceWeights;

/// Additive relevance score for one item; higher ranks first.
///
/// `query` is the normalized (trimmed, lowercased) query and `genres` the
/// lowercased selected genres.
pub fn relevance_score(
    item: &IndexedItem,
    query: &str,
    genres: &BTreeSet<String>,
    weights: &RelevanceWeights,
) -> f64 {
    let mut score = 0.0;

    if !query.is_empty() {
        if item.primary_title.contains(query) {
            score += weights.primary_title;
        }
        if item.alternate_titles.iter().any(|t| t.contains(query)) {
            score += weights.alternate_title;
        }
    }

    let overlapping = genres.iter().filter(|g| genre_overlaps(item, g)).count();
    score += overlapping as f64 * weights.genre_match;

    score += item.item.popularity.unwrap_or(0.0) / weights.popularity_divisor;

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogItem;

    fn item(
        title: &str,
        alternates: &[&str],
        genres: &[&str],
        popularity: Option<f64>,
    ) -> IndexedItem {
        IndexedItem::new(CatalogItem {
            title: title.to_string(),
            alternative_titles: alternates.iter().map(|t| t.to_string()).collect(),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            popularity,
            ..Default::default()
        })
    }

    fn genres(selected: &[&str]) -> BTreeSet<String> {
        selected.iter().map(|g| g.to_string()).collect()
    }

    #[test]
    fn test_primary_title_bonus() {
        let weights = RelevanceWeights::default();
        let it = item("Inception", &[], &[], None);
        let score = relevance_score(&it, "incep", &genres(&[]), &weights);
        assert_eq!(score, 100.0);
    }

    #[test]
    fn test_alternate_title_bonus() {
        let weights = RelevanceWeights::default();
        let it = item("Kimi no Na wa", &["Your Name"], &[], None);
        assert_eq!(relevance_score(&it, "your", &genres(&[]), &weights), 30.0);
        assert_eq!(relevance_score(&it, "na", &genres(&[]), &weights), 130.0);
    }

    #[test]
    fn test_genre_bonus_per_overlapping_genre() {
        let weights = RelevanceWeights::default();
        let it = item("Interstellar", &[], &["Sci-Fi", "Drama"], None);
        let score = relevance_score(&it, "", &genres(&["sci-fi", "drama", "horror"]), &weights);
        assert_eq!(score, 40.0);
    }

    #[test]
    fn test_popularity_term() {
        let weights = RelevanceWeights::default();
        let it = item("Inception", &[], &[], Some(85.0));
        assert_eq!(relevance_score(&it, "", &genres(&[]), &weights), 8.5);
    }

    #[test]
    fn test_custom_weights() {
        let weights = RelevanceWeights {
            primary_title: 1.0,
            alternate_title: 0.0,
            genre_match: 0.0,
            popularity_divisor: 100.0,
        };
        let it = item("Inception", &[], &["Sci-Fi"], Some(50.0));
        let score = relevance_score(&it, "inception", &genres(&["sci-fi"]), &weights);
        assert_eq!(score, 1.5);
    }
}
