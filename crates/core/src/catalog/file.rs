//! Catalog source reading a local build of the site.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use super::{CatalogDocument, CatalogError, CatalogSource};

pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    fn name(&self) -> &str {
        "file"
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<CatalogDocument, CatalogError> {
        debug!("Reading catalog from {:?}", self.path);

        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| CatalogError::IoError {
                path: self.location(),
                source,
            })?;

        CatalogDocument::from_json(&raw).map_err(|e| CatalogError::ParseError(e.to_string()))
    }
}
