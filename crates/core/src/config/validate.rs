use super::{
    types::{CatalogBackend, Config},
    ConfigError,
};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - The selected catalog backend has its section
/// - Result caps are non-zero and the preview cap fits in the full cap
/// - Relevance weights are finite and the popularity divisor is positive
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    match config.catalog.backend {
        CatalogBackend::Http => match &config.catalog.http {
            Some(http) if http.base_url.trim().is_empty() => {
                return Err(ConfigError::ValidationError(
                    "catalog.http.base_url cannot be empty".to_string(),
                ));
            }
            Some(_) => {}
            None => {
                return Err(ConfigError::ValidationError(
                    "catalog.backend = \"http\" requires a [catalog.http] section".to_string(),
                ));
            }
        },
        CatalogBackend::File => {
            if config.catalog.file.is_none() {
                return Err(ConfigError::ValidationError(
                    "catalog.backend = \"file\" requires a [catalog.file] section".to_string(),
                ));
            }
        }
    }

    let search = &config.search;
    if search.max_results == 0 || search.max_view_all_results == 0 {
        return Err(ConfigError::ValidationError(
            "search result caps must be greater than 0".to_string(),
        ));
    }
    if search.max_results > search.max_view_all_results {
        return Err(ConfigError::ValidationError(format!(
            "search.max_results ({}) cannot exceed search.max_view_all_results ({})",
            search.max_results, search.max_view_all_results
        )));
    }
    let weights = &search.relevance;
    let divisor = weights.popularity_divisor;
    if !(divisor.is_finite() && divisor > 0.0) {
        return Err(ConfigError::ValidationError(
            "search.relevance.popularity_divisor must be a positive finite number".to_string(),
        ));
    }
    for (name, weight) in [
        ("primary_title", weights.primary_title),
        ("alternate_title", weights.alternate_title),
        ("genre_match", weights.genre_match),
    ] {
        if !weight.is_finite() {
            return Err(ConfigError::ValidationError(format!(
                "search.relevance.{} must be a finite number",
                name
            )));
        }
    }

    Ok(())
}
