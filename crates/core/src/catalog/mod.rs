//! Catalog model and loaders.
//!
//! The site publishes its whole catalog as one JSON document. This module
//! defines the item model and a `CatalogSource` trait with an HTTP backend
//! (the deployed site) and a file backend (a local build of the site).

mod file;
mod http;
pub(crate) mod lenient;
mod types;

pub use file::FileCatalogSource;
pub use http::HttpCatalogSource;
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{CatalogBackend, CatalogConfig};

/// Errors that can occur while fetching the catalog document.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("Catalog request failed: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Reading the local document failed.
    #[error("Failed to read catalog file {path}: {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON.
    #[error("Failed to parse catalog: {0}")]
    ParseError(String),

    /// Source not configured.
    #[error("Catalog source not configured: {0}")]
    NotConfigured(String),
}

/// A place the catalog document can be fetched from.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Short name used in logs and stats ("http", "file", "mock").
    fn name(&self) -> &str;

    /// Where the document lives (URL or path), for logs.
    fn location(&self) -> String;

    /// Fetch and parse the document.
    async fn fetch(&self) -> Result<CatalogDocument, CatalogError>;
}

/// Create the catalog source selected in the configuration.
pub fn create_catalog_source(
    config: &CatalogConfig,
) -> Result<Box<dyn CatalogSource>, CatalogError> {
    match config.backend {
        CatalogBackend::Http => {
            let http = config.http.as_ref().ok_or_else(|| {
                CatalogError::NotConfigured("missing [catalog.http] section".to_string())
            })?;
            Ok(Box::new(HttpCatalogSource::new(http)?))
        }
        CatalogBackend::File => {
            let file = config.file.as_ref().ok_or_else(|| {
                CatalogError::NotConfigured("missing [catalog.file] section".to_string())
            })?;
            Ok(Box::new(FileCatalogSource::new(file.path.clone())))
        }
    }
}
