//! Filter state and the filter predicate.

use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::index::IndexedItem;

/// Content type selector. `All` disables the filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ContentTypeFilter {
    #[default]
    All,
    /// Lowercased type name.
    Only(String),
}

impl FromStr for ContentTypeFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            Ok(Self::Only(s.to_lowercase()))
        }
    }
}

impl fmt::Display for ContentTypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Only(t) => write!(f, "{}", t),
        }
    }
}

/// Result ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    #[default]
    Relevance,
    #[serde(alias = "top-imdb")]
    TopRated,
    Latest,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::TopRated => "top-rated",
            Self::Latest => "latest",
        }
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "relevance" => Ok(Self::Relevance),
            "top-rated" | "top-imdb" => Ok(Self::TopRated),
            "latest" => Ok(Self::Latest),
            other => Err(format!("unknown sort mode: {}", other)),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the user has selected in the search box and filter dropdown.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub query: String,
    pub content_type: ContentTypeFilter,
    /// Lowercased selected genres.
    pub genres: BTreeSet<String>,
    pub sort: SortMode,
}

impl FilterState {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn with_content_type(mut self, content_type: &str) -> Self {
        self.content_type = content_type.parse().unwrap_or_default();
        self
    }

    pub fn with_genre(mut self, genre: &str) -> Self {
        let genre = genre.trim().to_lowercase();
        if !genre.is_empty() {
            self.genres.insert(genre);
        }
        self
    }

    pub fn with_sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }

    /// Reset content type, genres and sort, keeping the query.
    pub fn clear_filters(&mut self) {
        self.content_type = ContentTypeFilter::All;
        self.genres.clear();
        self.sort = SortMode::Relevance;
    }

    /// Trimmed, lowercased query used for matching.
    pub fn normalized_query(&self) -> String {
        self.query.trim().to_lowercase()
    }

    /// Whether `item` passes all three sub-predicates.
    ///
    /// `query` must be the output of [`FilterState::normalized_query`].
    pub fn matches(&self, item: &IndexedItem, query: &str) -> bool {
        matches_title(item, query)
            && matches_content_type(item, &self.content_type)
            && matches_genres(item, &self.genres)
    }
}

/// Empty query matches everything; otherwise any searchable title must
/// contain it.
pub fn matches_title(item: &IndexedItem, query: &str) -> bool {
    query.is_empty() || item.searchable_titles().any(|t| t.contains(query))
}

pub fn matches_content_type(item: &IndexedItem, filter: &ContentTypeFilter) -> bool {
    match filter {
        ContentTypeFilter::All => true,
        ContentTypeFilter::Only(wanted) => item.content_type.to_lowercase() == *wanted,
    }
}

/// No selection matches everything; otherwise one selected genre must be a
/// substring of one of the item's genres.
pub fn matches_genres(item: &IndexedItem, selected: &BTreeSet<String>) -> bool {
    selected.is_empty() || selected.iter().any(|genre| genre_overlaps(item, genre))
}

/// Whether a single (lowercased) selected genre overlaps the item's genres.
pub fn genre_overlaps(item: &IndexedItem, genre: &str) -> bool {
    item.genres.iter().any(|g| g.contains(genre))
}
