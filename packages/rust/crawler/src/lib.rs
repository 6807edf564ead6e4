//! Page fetching and one-level crawling of index pages.
//!
//! - [`Fetcher`]: HTTP client with a browser User-Agent and bounded redirects
//! - [`harvest_links`]: same-origin article candidates on an index page
//! - [`crawl_and_scrape`]: sequential scrape of every harvested link

pub mod crawl;
pub mod fetch;

pub use crawl::{CrawlSummary, crawl_and_scrape, harvest_links};
pub use fetch::Fetcher;
