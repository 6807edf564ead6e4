//! Index-page link harvesting and one-level article crawl.
//!
//! When a URL does not read as a single article it is assumed to be an index
//! (blog home, archive, tag page). Same-origin links with at least two path
//! segments are collected and each one is scraped as an article, strictly one
//! at a time and never more than one level deep.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use tracing::{debug, info, instrument, warn};
use url::Url;

use distill_extract::{Page, ReadabilityEngine, extract_article};
use distill_shared::{KnowledgeBatch, ProgressReporter};

use crate::fetch::Fetcher;

/// Minimum non-empty path segments for a link to count as an article.
/// Filters out the home link and top-level section links.
const MIN_ARTICLE_SEGMENTS: usize = 2;

/// Summary of a completed crawl.
#[derive(Debug, Clone, Default)]
pub struct CrawlSummary {
    /// Candidate links harvested from the index page.
    pub candidates: usize,
    /// Candidates that produced a knowledge item.
    pub extracted: usize,
    /// Candidates fetched but declined by the article extractor.
    pub declined: usize,
    /// Candidates that could not be fetched.
    pub failed: usize,
    /// Total duration of the crawl.
    pub duration: Duration,
}

/// Collect article candidate links from an index page.
///
/// Every `<a href>` is resolved against `base_url`; a link is kept when it
/// shares the base URL's origin and has at least two non-empty path segments.
/// Duplicates (exact URL string) are dropped, first occurrence order is kept.
pub fn harvest_links(base_url: &Url, html: &str) -> Vec<Url> {
    let page = Page::parse(html, base_url);
    let origin = base_url.origin();
    let mut seen = HashSet::new();

    page.find_all(|el| el.is("a"))
        .into_iter()
        .filter_map(|a| a.attr("href").filter(|h| !h.is_empty()))
        .filter_map(|href| page.resolve(href))
        .filter(|url| url.origin() == origin && path_segment_count(url) >= MIN_ARTICLE_SEGMENTS)
        .filter(|url| seen.insert(url.as_str().to_string()))
        .collect()
}

fn path_segment_count(url: &Url) -> usize {
    url.path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).count())
        .unwrap_or(0)
}

/// Scrape every harvested link on an index page as an article.
///
/// Links are visited sequentially. A failed fetch is logged, recorded on the
/// batch, and skipped; it never aborts the remaining links.
#[instrument(skip_all, fields(base_url = %base_url, engine = engine.name()))]
pub async fn crawl_and_scrape(
    base_url: &Url,
    html: &str,
    fetcher: &Fetcher,
    engine: &dyn ReadabilityEngine,
    batch: &mut KnowledgeBatch,
    progress: &dyn ProgressReporter,
) -> CrawlSummary {
    let start = Instant::now();
    let links = harvest_links(base_url, html);
    let mut summary = CrawlSummary {
        candidates: links.len(),
        ..CrawlSummary::default()
    };

    if links.is_empty() {
        info!("no further article links found on this page");
        return summary;
    }

    info!(candidates = links.len(), "crawling harvested links");

    for (i, link) in links.iter().enumerate() {
        progress.link_visited(link.as_str(), i + 1, links.len());

        let page_html = match fetcher.fetch_html(link).await {
            Ok(body) => body,
            Err(e) => {
                warn!(url = %link, error = %e, "failed to fetch link, skipping");
                batch.record_failure(link.as_str(), e.to_string());
                summary.failed += 1;
                continue;
            }
        };

        if extract_article(link, &page_html, engine, batch, progress) {
            summary.extracted += 1;
        } else {
            debug!(url = %link, "link is not an article");
            summary.declined += 1;
        }
    }

    summary.duration = start.elapsed();
    info!(
        candidates = summary.candidates,
        extracted = summary.extracted,
        declined = summary.declined,
        failed = summary.failed,
        duration_ms = summary.duration.as_millis(),
        "crawl completed"
    );

    summary
}
