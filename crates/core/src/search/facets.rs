//! Filter dropdown data derived from the catalog.

use std::collections::BTreeMap;

use serde::Serialize;

use super::index::IndexedItem;

/// Distinct content types and genres present in the catalog.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Facets {
    pub types: Vec<String>,
    pub genres: Vec<String>,
    pub total_items: usize,
}

impl Facets {
    /// Values are deduplicated ignoring case, keeping the first spelling seen,
    /// and sorted case-insensitively.
    pub fn from_index(index: &[IndexedItem]) -> Self {
        let mut types = BTreeMap::new();
        let mut genres = BTreeMap::new();

        for entry in index {
            if let Some(t) = entry.item.content_type.as_deref() {
                insert_first_spelling(&mut types, t);
            }
            for genre in &entry.item.genres {
                insert_first_spelling(&mut genres, genre);
            }
        }

        Self {
            types: types.into_values().collect(),
            genres: genres.into_values().collect(),
            total_items: index.len(),
        }
    }
}

fn insert_first_spelling(seen: &mut BTreeMap<String, String>, value: &str) {
    let value = value.trim();
    if !value.is_empty() {
        seen.entry(value.to_lowercase())
            .or_insert_with(|| value.to_string());
    }
}
