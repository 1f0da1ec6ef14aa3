//! The filter / sort / truncate pass.

use std::cmp::{Ordering, Reverse};

use tracing::debug;

use super::filter::{FilterState, SortMode};
use super::index::IndexedItem;
use super::scorer::relevance_score;
use crate::config::RelevanceWeights;

/// Run one search pass over `index`.
///
/// Filters with [`FilterState::matches`], orders by the selected sort mode
/// and keeps at most `limit` items. The sort is stable, so items with equal
/// keys stay in catalog order.
pub fn run<'a>(
    index: &'a [IndexedItem],
    filters: &FilterState,
    weights: &RelevanceWeights,
    limit: usize,
) -> Vec<&'a IndexedItem> {
    let query = filters.normalized_query();

    let matched: Vec<&IndexedItem> = index
        .iter()
        .filter(|item| filters.matches(item, &query))
        .collect();
    let matched_count = matched.len();

    let mut results = match filters.sort {
        SortMode::TopRated => {
            let mut items = matched;
            items.sort_by(|a, b| {
                let (a, b) = (a.item.rating_or_zero(), b.item.rating_or_zero());
                descending(a, b)
            });
            items
        }
        SortMode::Latest => {
            let mut items = matched;
            items.sort_by_key(|item| Reverse(item.item.date_added_or_epoch()));
            items
        }
        SortMode::Relevance => {
            let mut scored: Vec<(f64, &IndexedItem)> = matched
                .into_iter()
                .map(|item| {
                    let score = relevance_score(item, &query, &filters.genres, weights);
                    (score, item)
                })
                .collect();
            scored.sort_by(|a, b| descending(a.0, b.0));
            scored.into_iter().map(|(_, item)| item).collect()
        }
    };

    results.truncate(limit);

    debug!(
        "Search '{}' ({}, type={}, genres={}): {} matched, {} returned",
        query,
        filters.sort,
        filters.content_type,
        filters.genres.len(),
        matched_count,
        results.len()
    );

    results
}

fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}
