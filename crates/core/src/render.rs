//! HTML fragments for search results.
//!
//! The site's search popup and full results page inject these fragments
//! as-is, so everything here is markup only; styling lives in the site CSS.

use maud::{html, Markup};
use regex_lite::{Regex, RegexBuilder};

use crate::catalog::CatalogItem;
use crate::search::{SearchOutcome, UNKNOWN_CONTENT_TYPE};

/// Genres shown per result row.
const MAX_GENRES_SHOWN: usize = 3;

/// Renders search outcomes to HTML.
#[derive(Debug, Clone)]
pub struct ResultRenderer {
    placeholder_image: String,
}

impl ResultRenderer {
    pub fn new(placeholder_image: impl Into<String>) -> Self {
        Self {
            placeholder_image: placeholder_image.into(),
        }
    }

    /// Render whatever the outcome calls for: the result list, the empty
    /// state or the unavailable notice.
    pub fn outcome(&self, outcome: &SearchOutcome, query: &str) -> Markup {
        match outcome {
            SearchOutcome::Results(items) => self.results(items, query),
            SearchOutcome::NoResults => no_results(),
            SearchOutcome::Unavailable(_) => unavailable(),
        }
    }

    pub fn results(&self, items: &[CatalogItem], query: &str) -> Markup {
        let highlighter = Highlighter::new(query);
        html! {
            @for item in items {
                (self.result_item(item, &highlighter))
            }
        }
    }

    fn result_item(&self, item: &CatalogItem, highlighter: &Highlighter) -> Markup {
        let poster = item.poster.as_deref().unwrap_or(&self.placeholder_image);
        let href = item.streaming_url.as_deref().unwrap_or("#");

        html! {
            a.result-item href=(href) data-id=[item.id.as_deref()] {
                div.result-thumbnail {
                    img src=(poster) alt=(item.title) loading="lazy";
                }
                div.result-content {
                    h4.result-title { (highlighter.apply(&item.title)) }
                    div.result-meta { (meta_line(item)) }
                    div.result-genres {
                        @for genre in item.genres.iter().take(MAX_GENRES_SHOWN) {
                            span.result-genre { (genre) }
                        }
                    }
                    @if let Some(rating) = item.rating.filter(|r| *r > 0.0) {
                        div.result-rating { "★ " (rating) }
                    }
                }
            }
        }
    }
}

/// "type • year • duration", skipping an absent duration.
pub fn meta_line(item: &CatalogItem) -> String {
    let content_type = item.content_type.as_deref().unwrap_or(UNKNOWN_CONTENT_TYPE);
    let year = item.year.as_deref().unwrap_or("?");

    [Some(content_type), Some(year), item.duration.as_deref()]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" • ")
}

pub fn no_results() -> Markup {
    html! {
        div.no-results {
            h3 { "No results found" }
            p { "Try different search terms or adjust your filters" }
        }
    }
}

pub fn unavailable() -> Markup {
    html! {
        div.no-results {
            h3 { "⚠️ Search Unavailable" }
            p { "Unable to load content. Please try again later." }
        }
    }
}

/// Wraps case-insensitive occurrences of the query in highlight spans.
struct Highlighter {
    pattern: Option<Regex>,
}

impl Highlighter {
    fn new(query: &str) -> Self {
        let query = query.trim();
        let pattern = if query.is_empty() {
            None
        } else {
            RegexBuilder::new(&regex_lite::escape(query))
                .case_insensitive(true)
                .build()
                .ok()
        };
        Self { pattern }
    }

    fn apply(&self, text: &str) -> Markup {
        let Some(pattern) = &self.pattern else {
            return html! { (text) };
        };

        let mut segments: Vec<(&str, bool)> = Vec::new();
        let mut last = 0;
        for m in pattern.find_iter(text) {
            if m.start() > last {
                segments.push((&text[last..m.start()], false));
            }
            segments.push((m.as_str(), true));
            last = m.end();
        }
        if last < text.len() {
            segments.push((&text[last..], false));
        }

        html! {
            @for (segment, hit) in segments {
                @if hit {
                    span.search-highlight { (segment) }
                } @else {
                    (segment)
                }
            }
        }
    }
}
