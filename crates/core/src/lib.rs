pub mod catalog;
pub mod config;
pub mod metrics;
pub mod render;
pub mod search;
pub mod testing;

pub use catalog::{
    create_catalog_source, CatalogDocument, CatalogError, CatalogItem, CatalogSource,
    FileCatalogSource, HttpCatalogSource,
};
pub use config::{
    load_config, load_config_from_str, validate_config, CatalogBackend, CatalogConfig, Config,
    ConfigError, FileCatalogConfig, HttpCatalogConfig, RelevanceWeights, SanitizedConfig,
    SearchConfig, ServerConfig,
};
pub use render::ResultRenderer;
pub use search::{
    ContentTypeFilter, DebouncedSearch, Facets, FilterState, GlobalSearch, IndexedItem,
    LoadStatus, QueryIntake, SearchOutcome, SearchScope, SearchStats, SortMode,
};
