//! End-to-end run: source → fetch or decode → extract → batch.

use std::time::Instant;

use tracing::{info, instrument, warn};
use url::Url;

use distill_book::process_pdf;
use distill_crawler::{Fetcher, crawl_and_scrape};
use distill_extract::{ReadabilityEngine, SmoothieEngine, extract_article};
use distill_shared::{
    AppConfig, BookOptions, FetchConfig, KnowledgeBatch, ProgressReporter, Result,
};

use crate::source::Source;

/// Everything a run needs besides the source itself.
pub struct Pipeline {
    fetcher: Fetcher,
    engine: Box<dyn ReadabilityEngine>,
    book: BookOptions,
}

impl Pipeline {
    /// Pipeline with the default readability engine.
    pub fn new(config: &AppConfig) -> Result<Self> {
        Self::with_engine(
            &FetchConfig::from(config),
            BookOptions::from(config),
            Box::new(SmoothieEngine),
        )
    }

    /// Pipeline with a caller-chosen readability engine.
    pub fn with_engine(
        fetch: &FetchConfig,
        book: BookOptions,
        engine: Box<dyn ReadabilityEngine>,
    ) -> Result<Self> {
        Ok(Self {
            fetcher: Fetcher::new(fetch)?,
            engine,
            book,
        })
    }
}

/// Process one source and return everything it produced.
///
/// Per-source failures are logged and recorded on the returned batch; the
/// function itself cannot fail.
#[instrument(skip_all, fields(source = %source))]
pub async fn process_source(
    source: &Source,
    pipeline: &Pipeline,
    progress: &dyn ProgressReporter,
) -> KnowledgeBatch {
    let start = Instant::now();
    let mut batch = KnowledgeBatch::new();

    match source {
        Source::Url(url) => process_url(url, pipeline, &mut batch, progress).await,
        Source::Pdf(path) => process_pdf(path, pipeline.book, &mut batch, progress).await,
    }

    info!(
        items = batch.len(),
        failures = batch.failures().len(),
        elapsed_ms = start.elapsed().as_millis(),
        "source processed"
    );
    batch
}

async fn process_url(
    url: &Url,
    pipeline: &Pipeline,
    batch: &mut KnowledgeBatch,
    progress: &dyn ProgressReporter,
) {
    progress.phase("Fetching page");
    let html = match pipeline.fetcher.fetch_html(url).await {
        Ok(html) => html,
        Err(e) => {
            warn!(error = %e, "failed to fetch source URL");
            batch.record_failure(url.as_str(), e.to_string());
            return;
        }
    };

    progress.phase("Extracting article");
    if extract_article(url, &html, pipeline.engine.as_ref(), batch, progress) {
        return;
    }

    warn!("could not parse as a single article, treating it as an index page and crawling");
    progress.phase("Crawling index page");
    crawl_and_scrape(
        url,
        &html,
        &pipeline.fetcher,
        pipeline.engine.as_ref(),
        batch,
        progress,
    )
    .await;
}
