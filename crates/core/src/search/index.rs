//! Search index construction.

use serde::Serialize;

use crate::catalog::CatalogItem;

/// Content type assigned to items that do not declare one.
pub const UNKNOWN_CONTENT_TYPE: &str = "Unknown";

/// A catalog item with its lookup fields precomputed.
///
/// Built once per catalog load and never mutated afterwards.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct IndexedItem {
    pub item: CatalogItem,
    /// Lowercased primary title (empty when the item has none).
    pub primary_title: String,
    /// Lowercased English, Japanese and alternative titles, deduplicated
    /// and without the primary title.
    pub alternate_titles: Vec<String>,
    /// Year as a string, empty when absent.
    pub normalized_year: String,
    /// Declared type, or [`UNKNOWN_CONTENT_TYPE`].
    pub content_type: String,
    /// Lowercased genres in catalog order.
    pub genres: Vec<String>,
}

impl IndexedItem {
    pub fn new(item: CatalogItem) -> Self {
        let primary_title = item.title.trim().to_lowercase();

        let mut alternate_titles: Vec<String> = Vec::new();
        let candidates = item
            .title_en
            .iter()
            .chain(item.title_jp.iter())
            .chain(item.alternative_titles.iter());
        for title in candidates {
            let lowered = title.trim().to_lowercase();
            if lowered.is_empty() || lowered == primary_title || alternate_titles.contains(&lowered)
            {
                continue;
            }
            alternate_titles.push(lowered);
        }

        let normalized_year = item.year.clone().unwrap_or_default();
        let content_type = item
            .content_type
            .clone()
            .unwrap_or_else(|| UNKNOWN_CONTENT_TYPE.to_string());
        let genres = item.genres.iter().map(|g| g.to_lowercase()).collect();

        Self {
            item,
            primary_title,
            alternate_titles,
            normalized_year,
            content_type,
            genres,
        }
    }

    /// Every searchable title, primary first.
    pub fn searchable_titles(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.primary_title.as_str())
            .filter(|t| !t.is_empty())
            .chain(self.alternate_titles.iter().map(String::as_str))
    }
}

/// Build the search index: one entry per catalog item, same order.
pub fn build_index(items: Vec<CatalogItem>) -> Vec<IndexedItem> {
    items.into_iter().map(IndexedItem::new).collect()
}
