//! Single-article extraction.

use tracing::{debug, info, instrument, warn};
use url::Url;

use distill_shared::{KnowledgeBatch, KnowledgeItem, ProgressReporter};

use crate::author::resolve_author;
use crate::page::Page;
use crate::readability::ReadabilityEngine;
use crate::title::resolve_title;

/// Try to read `html` as one article and append it to `batch`.
///
/// Returns `false` (and appends nothing) when the engine finds no article or
/// the article cannot be converted; the caller then treats the page as an
/// index. Errors are logged, never propagated.
#[instrument(skip_all, fields(url = %url, engine = engine.name()))]
pub fn extract_article(
    url: &Url,
    html: &str,
    engine: &dyn ReadabilityEngine,
    batch: &mut KnowledgeBatch,
    progress: &dyn ProgressReporter,
) -> bool {
    let page = Page::parse(html, url);

    let Some(article) = engine.parse(html, url) else {
        debug!("no readable article");
        return false;
    };

    if article.content_html.trim().is_empty() {
        debug!("readable article has empty content");
        return false;
    }

    let title = resolve_title(&page, &article.title);
    let author = resolve_author(&page, article.byline.as_deref());

    let content = match distill_markdown::to_markdown(&article.content_html, Some(url)) {
        Ok(md) => md,
        Err(e) => {
            warn!(error = %e, "article conversion failed, declining page");
            return false;
        }
    };

    info!(%title, %author, content_len = content.len(), "article extracted");

    let item = KnowledgeItem::blog(title, content, url.as_str(), author);
    progress.item_added(&item);
    batch.push(item);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readability::ReadableArticle;
    use distill_shared::{ContentType, SilentProgress};

    /// Engine returning a canned result, so tests control the
    /// article/index decision.
    struct FixedEngine(Option<ReadableArticle>);

    impl ReadabilityEngine for FixedEngine {
        fn parse(&self, _html: &str, _url: &Url) -> Option<ReadableArticle> {
            self.0.clone()
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    fn url() -> Url {
        Url::parse("https://blog.example.com/posts/hello-world").unwrap()
    }

    const PAGE: &str = r#"<html><head>
        <meta name="author" content="Meta Author">
        </head><body>
        <header><h1>Example Blog</h1></header>
        <main><h1>Hello World</h1><p>First post.</p></main>
        </body></html>"#;

    #[test]
    fn declines_when_engine_finds_nothing() {
        let mut batch = KnowledgeBatch::new();
        let ok = extract_article(&url(), PAGE, &FixedEngine(None), &mut batch, &SilentProgress);
        assert!(!ok);
        assert!(batch.is_empty());
    }

    #[test]
    fn declines_on_blank_content() {
        let engine = FixedEngine(Some(ReadableArticle {
            title: "Something".into(),
            byline: None,
            content_html: "  \n ".into(),
        }));
        let mut batch = KnowledgeBatch::new();
        assert!(!extract_article(&url(), PAGE, &engine, &mut batch, &SilentProgress));
        assert!(batch.is_empty());
    }

    #[test]
    fn builds_blog_item_with_resolved_fields() {
        let engine = FixedEngine(Some(ReadableArticle {
            title: "Example Blog | Hello World".into(),
            byline: None,
            content_html: "<h2>Intro</h2><p>First <a href=\"/posts/second\">post</a>.</p>".into(),
        }));
        let mut batch = KnowledgeBatch::new();

        assert!(extract_article(&url(), PAGE, &engine, &mut batch, &SilentProgress));
        assert_eq!(batch.len(), 1);

        let item = &batch.items()[0];
        assert_eq!(item.title, "Hello World");
        assert_eq!(item.author, "Meta Author");
        assert_eq!(item.content_type, ContentType::Blog);
        assert_eq!(item.source_url, "https://blog.example.com/posts/hello-world");
        assert_eq!(item.user_id, "");
        assert!(item.content.starts_with("## Intro"));
        assert!(item.content.contains("(https://blog.example.com/posts/second)"));
    }

    #[test]
    fn engine_byline_outranks_page_metadata() {
        let engine = FixedEngine(Some(ReadableArticle {
            title: "T".into(),
            byline: Some(" Engine Byline ".into()),
            content_html: "<p>Body</p>".into(),
        }));
        let mut batch = KnowledgeBatch::new();
        assert!(extract_article(&url(), PAGE, &engine, &mut batch, &SilentProgress));
        assert_eq!(batch.items()[0].author, "Engine Byline");
    }
}
