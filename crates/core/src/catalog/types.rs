//! Catalog document types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::lenient;

/// One movie / TV show / anime entry of the site catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    /// Site identifier (numeric ids are kept in their string form).
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    /// Primary title.
    #[serde(default, deserialize_with = "lenient::opt_string_or_empty")]
    pub title: String,
    /// English title.
    #[serde(
        default,
        rename = "title_en",
        alias = "titleEn",
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub title_en: Option<String>,
    /// Japanese title (romaji or kana).
    #[serde(
        default,
        rename = "title_jp",
        alias = "titleJp",
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub title_jp: Option<String>,
    /// Additional known titles.
    #[serde(
        default,
        rename = "alternative_titles",
        deserialize_with = "lenient::string_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub alternative_titles: Vec<String>,
    /// Release year as written in the catalog.
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub year: Option<String>,
    /// Rating on a 0-10 scale.
    #[serde(
        default,
        deserialize_with = "lenient::opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub rating: Option<f64>,
    /// Content type ("movie", "anime", "tv-show", ...).
    #[serde(
        default,
        rename = "type",
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub content_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub genres: Vec<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub popularity: Option<f64>,
    /// When the entry was added to the site.
    #[serde(
        default,
        deserialize_with = "lenient::opt_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_added: Option<DateTime<Utc>>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub poster: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub backdrop: Option<String>,
    /// Link to the streaming page.
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub streaming_url: Option<String>,
    /// Runtime as displayed ("2h 28m", "24 min/ep").
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
}

impl CatalogItem {
    /// Create an item with only a title set.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Rating used for ordering; missing ratings rank as 0.
    pub fn rating_or_zero(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }

    /// Added date used for ordering; missing dates rank as the epoch.
    pub fn date_added_or_epoch(&self) -> DateTime<Utc> {
        self.date_added.unwrap_or(DateTime::UNIX_EPOCH)
    }
}

/// The catalog document served at `data/posts.json`.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CatalogDocument {
    pub posts: Vec<CatalogItem>,
}

impl CatalogDocument {
    /// Parse a catalog document, skipping entries that are not objects.
    ///
    /// A document without a `posts` array is an empty catalog.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(raw)?;
        Ok(Self::from_value(value))
    }

    /// Same as [`CatalogDocument::from_json`] for an already parsed value.
    pub fn from_value(value: Value) -> Self {
        let entries = match value {
            Value::Object(mut root) => match root.remove("posts") {
                Some(Value::Array(entries)) => entries,
                _ => Vec::new(),
            },
            _ => Vec::new(),
        };

        let mut posts = Vec::with_capacity(entries.len());
        for (position, entry) in entries.into_iter().enumerate() {
            if !entry.is_object() {
                warn!("Skipping catalog entry {}: not an object", position);
                continue;
            }
            match serde_json::from_value::<CatalogItem>(entry) {
                Ok(item) => posts.push(item),
                Err(e) => warn!("Skipping catalog entry {}: {}", position, e),
            }
        }

        Self { posts }
    }
}
