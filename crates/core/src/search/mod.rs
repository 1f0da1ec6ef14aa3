//! Catalog search.
//!
//! This module provides the search index builder, the filter/sort pipeline
//! and relevance scorer, the debounced query intake, and the `GlobalSearch`
//! component that ties them to a catalog source.

mod engine;
mod facets;
mod filter;
mod index;
mod intake;
pub mod pipeline;
mod scorer;

pub use engine::{GlobalSearch, LoadStatus, SearchOutcome, SearchScope, SearchStats};
pub use facets::Facets;
pub use filter::{
    genre_overlaps, matches_content_type, matches_genres, matches_title, ContentTypeFilter,
    FilterState, SortMode,
};
pub use index::{build_index, IndexedItem, UNKNOWN_CONTENT_TYPE};
pub use intake::{DebouncedSearch, IntakeEvent, IntakeState, IntakeUpdate, QueryIntake};
pub use scorer::relevance_score;
