//! Readability boundary.
//!
//! Boilerplate removal is delegated to an engine behind [`ReadabilityEngine`].
//! Engines receive the raw HTML and build their own throwaway document, so the
//! caller's [`Page`](crate::Page) is never mutated by scoring or stripping.

use dom_smoothie::Readability;
use tracing::debug;
use url::Url;

/// What a readability engine extracted from a page.
#[derive(Debug, Clone, Default)]
pub struct ReadableArticle {
    /// Title guessed by the engine.
    pub title: String,
    /// Byline, when the engine found one.
    pub byline: Option<String>,
    /// Sanitized article HTML.
    pub content_html: String,
}

/// A boilerplate-removal capability.
pub trait ReadabilityEngine: Send + Sync {
    /// Extract the main article, or `None` when the page has no readable article.
    fn parse(&self, html: &str, url: &Url) -> Option<ReadableArticle>;

    /// Engine name for tracing.
    fn name(&self) -> &str;
}

/// Engine backed by `dom_smoothie`, a port of Mozilla's Readability.
#[derive(Debug, Default, Clone, Copy)]
pub struct SmoothieEngine;

impl ReadabilityEngine for SmoothieEngine {
    fn parse(&self, html: &str, url: &Url) -> Option<ReadableArticle> {
        let mut reader = match Readability::new(html, Some(url.as_str()), None) {
            Ok(reader) => reader,
            Err(e) => {
                debug!(%url, error = %e, "readability could not load document");
                return None;
            }
        };

        match reader.parse() {
            Ok(article) => Some(ReadableArticle {
                title: article.title,
                byline: article.byline,
                content_html: article.content.to_string(),
            }),
            Err(e) => {
                debug!(%url, error = %e, "readability found no article");
                None
            }
        }
    }

    fn name(&self) -> &str {
        "dom_smoothie"
    }
}
