use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory holding the generated static site (served as fallback).
    #[serde(default = "default_site_dir")]
    pub site_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            site_dir: default_site_dir(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    8080
}

fn default_site_dir() -> PathBuf {
    PathBuf::from("_site")
}

/// Catalog source configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Where the catalog document comes from
    #[serde(default)]
    pub backend: CatalogBackend,
    /// HTTP source settings (required when backend = "http")
    #[serde(default)]
    pub http: Option<HttpCatalogConfig>,
    /// File source settings (required when backend = "file")
    #[serde(default)]
    pub file: Option<FileCatalogConfig>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            backend: CatalogBackend::File,
            http: None,
            file: Some(FileCatalogConfig::default()),
        }
    }
}

/// Available catalog backends
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CatalogBackend {
    Http,
    #[default]
    File,
}

/// HTTP catalog source configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpCatalogConfig {
    /// Site base URL (e.g., "https://quravel.example")
    pub base_url: String,
    /// Document path relative to the base URL
    #[serde(default = "default_document_path")]
    pub path: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

fn default_document_path() -> String {
    "data/posts.json".to_string()
}

fn default_timeout() -> u32 {
    30
}

/// Local file catalog source configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FileCatalogConfig {
    #[serde(default = "default_file_path")]
    pub path: PathBuf,
}

impl Default for FileCatalogConfig {
    fn default() -> Self {
        Self {
            path: default_file_path(),
        }
    }
}

fn default_file_path() -> PathBuf {
    PathBuf::from("_site/data/posts.json")
}

/// Search behaviour configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Cap for the inline preview results
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Cap for the full results view
    #[serde(default = "default_max_view_all_results")]
    pub max_view_all_results: usize,
    /// Quiet period before a typed query is committed
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Image used when an item has no poster
    #[serde(default = "default_placeholder_image")]
    pub placeholder_image: String,
    #[serde(default)]
    pub relevance: RelevanceWeights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            max_view_all_results: default_max_view_all_results(),
            debounce_ms: default_debounce_ms(),
            placeholder_image: default_placeholder_image(),
            relevance: RelevanceWeights::default(),
        }
    }
}

fn default_max_results() -> usize {
    10
}

fn default_max_view_all_results() -> usize {
    50
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_placeholder_image() -> String {
    "https://via.placeholder.com/60x90/2d3748/fff?text=No+Image".to_string()
}

/// Additive weights used by the relevance scorer
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct RelevanceWeights {
    /// Bonus when the primary title contains the query
    #[serde(default = "default_primary_title")]
    pub primary_title: f64,
    /// Bonus when an English/Japanese/alternative title contains the query
    #[serde(default = "default_alternate_title")]
    pub alternate_title: f64,
    /// Bonus per selected genre the item carries
    #[serde(default = "default_genre_match")]
    pub genre_match: f64,
    /// Popularity is divided by this before being added
    #[serde(default = "default_popularity_divisor")]
    pub popularity_divisor: f64,
}

impl Default for RelevanceWeights {
    fn default() -> Self {
        Self {
            primary_title: default_primary_title(),
            alternate_title: default_alternate_title(),
            genre_match: default_genre_match(),
            popularity_divisor: default_popularity_divisor(),
        }
    }
}

fn default_primary_title() -> f64 {
    100.0
}

fn default_alternate_title() -> f64 {
    30.0
}

fn default_genre_match() -> f64 {
    20.0
}

fn default_popularity_divisor() -> f64 {
    10.0
}

/// Sanitized config for API responses
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub catalog: SanitizedCatalogConfig,
    pub search: SearchConfig,
}

/// Catalog config as exposed over the API (only the source location)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedCatalogConfig {
    pub backend: String,
    pub location: Option<String>,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        let location = match config.catalog.backend {
            CatalogBackend::Http => config
                .catalog
                .http
                .as_ref()
                .map(|h| {
                    format!(
                        "{}/{}",
                        h.base_url.trim_end_matches('/'),
                        h.path.trim_start_matches('/')
                    )
                }),
            CatalogBackend::File => config
                .catalog
                .file
                .as_ref()
                .map(|f| f.path.display().to_string()),
        };

        Self {
            server: config.server.clone(),
            catalog: SanitizedCatalogConfig {
                backend: match config.catalog.backend {
                    CatalogBackend::Http => "http".to_string(),
                    CatalogBackend::File => "file".to_string(),
                },
                location,
            },
            search: config.search.clone(),
        }
    }
}
