use quravel_core::{Config, GlobalSearch, ResultRenderer, SanitizedConfig};
use std::sync::Arc;

/// Shared application state
pub struct AppState {
    config: Config,
    search: Arc<GlobalSearch>,
    renderer: ResultRenderer,
}

impl AppState {
    pub fn new(config: Config, search: Arc<GlobalSearch>) -> Self {
        let renderer = ResultRenderer::new(config.search.placeholder_image.clone());
        Self {
            config,
            search,
            renderer,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn search(&self) -> &GlobalSearch {
        &self.search
    }

    pub fn renderer(&self) -> &ResultRenderer {
        &self.renderer
    }
}
